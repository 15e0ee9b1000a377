//! Channel-based front end for the resolver.
//!
//! [`LookupJob::init`] spawns a long-lived task that owns the
//! [`Resolver`] and serves commands over an mpsc channel. Callers hold a
//! cheap, cloneable [`LookupJobHandle`] and get results back on per-request
//! oneshot channels. Each command is handled on its own task, so a slow
//! upstream fetch never blocks unrelated requests.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::errors::ResolveError;
use crate::fetch::AccountSource;
use crate::resolver::{Resolution, Resolver};
use crate::store::{PageRequest, RecordPage};

type ResolveResponder = oneshot::Sender<Result<Resolution, ResolveError>>;
type ListRecentResponder = oneshot::Sender<Result<RecordPage, ResolveError>>;

pub struct LookupJob;

impl LookupJob {
    /// Initializes the `LookupJob` and returns a `LookupJobHandle`.
    pub fn init<S: AccountSource + 'static>(resolver: Resolver<S>) -> LookupJobHandle {
        let (tx, mut rx) = mpsc::channel(10);
        let resolver = Arc::new(resolver);

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Resolve(cmd) => {
                        let resolver = Arc::clone(&resolver);
                        tokio::spawn(async move {
                            let result = resolver.resolve(&cmd.raw_address).await;
                            if cmd.responder.send(result).is_err() {
                                warn!(address = %cmd.raw_address, "Resolve caller went away");
                            }
                        });
                    }
                    Command::ListRecent(cmd) => {
                        let resolver = Arc::clone(&resolver);
                        tokio::spawn(async move {
                            let result = resolver.list_recent(&cmd.page).await;
                            if cmd.responder.send(result).is_err() {
                                warn!("ListRecent caller went away");
                            }
                        });
                    }
                }
            }
        });

        LookupJobHandle { tx }
    }
}

/// Handle for submitting commands to a running [`LookupJob`].
#[derive(Clone)]
pub struct LookupJobHandle {
    pub tx: mpsc::Sender<Command>,
}

impl LookupJobHandle {
    /// Resolves an address through the job.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ServiceStopped`] if the job task has shut
    /// down, otherwise whatever the resolver returned.
    pub async fn resolve(&self, raw_address: impl Into<String>) -> Result<Resolution, ResolveError> {
        let (responder, rx) = oneshot::channel();
        self.tx
            .send(Command::Resolve(ResolveCommand {
                raw_address: raw_address.into(),
                responder,
            }))
            .await
            .map_err(|_| ResolveError::ServiceStopped)?;
        rx.await.map_err(|_| ResolveError::ServiceStopped)?
    }

    /// Fetches one page of lookup history through the job.
    pub async fn list_recent(&self, page: PageRequest) -> Result<RecordPage, ResolveError> {
        let (responder, rx) = oneshot::channel();
        self.tx
            .send(Command::ListRecent(ListRecentCommand { page, responder }))
            .await
            .map_err(|_| ResolveError::ServiceStopped)?;
        rx.await.map_err(|_| ResolveError::ServiceStopped)?
    }
}

pub enum Command {
    Resolve(ResolveCommand),
    ListRecent(ListRecentCommand),
}

pub struct ResolveCommand {
    pub raw_address: String,
    pub responder: ResolveResponder,
}

pub struct ListRecentCommand {
    pub page: PageRequest,
    pub responder: ListRecentResponder,
}
