//! Error types for TRON address validation.

/// Errors describing why a string cannot denote a valid TRON address.
///
/// These are client errors: no retry is warranted and no I/O was performed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The string is not 34 characters long.
    #[error("Address must be 34 characters, got {length}")]
    InvalidLength {
        /// Length of the rejected string.
        length: usize,
    },

    /// The string contains a character outside the Base58 alphabet.
    #[error("Invalid Base58 character '{character}' at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Zero-based position within the string.
        position: usize,
    },

    /// The decoded payload is not 25 bytes.
    #[error("Decoded address payload must be 25 bytes, got {length}")]
    InvalidPayloadLength {
        /// Length of the decoded payload.
        length: usize,
    },

    /// The version byte is not the TRON mainnet prefix `0x41`.
    #[error("Address version byte must be 0x41, got {byte:#04x}")]
    InvalidVersion {
        /// The decoded version byte.
        byte: u8,
    },

    /// The trailing 4 checksum bytes do not match the payload.
    #[error("Address checksum mismatch")]
    ChecksumMismatch,
}
