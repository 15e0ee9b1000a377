//! TRON address validation.
//!
//! TRON mainnet addresses are Base58Check strings: 34 characters that decode
//! to 25 bytes, where the first byte is the `0x41` version prefix (rendered as
//! the leading `T`), the next 20 bytes are the account hash, and the final 4
//! bytes are a double-SHA256 checksum over the first 21.
//!
//! Validation is pure and performs no I/O. The resolution pipeline runs it
//! before touching the cache or the network, so malformed input never spends
//! upstream quota.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::AddressError;

/// Base58 alphabet (Bitcoin variant, shared by TRON).
const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of a mainnet address string.
const ADDRESS_LEN: usize = 34;

/// Length of the decoded payload: version byte + 20-byte hash + 4-byte checksum.
const DECODED_LEN: usize = 25;

/// Version byte for TRON mainnet addresses.
const VERSION_BYTE: u8 = 0x41;

/// A syntactically valid TRON mainnet address.
///
/// Construction goes through [`TronAddress::parse`], so holding a value of
/// this type is proof that the string passed length, alphabet, version, and
/// checksum validation. The inner string is the canonical Base58Check form.
///
/// # Examples
///
/// ```
/// use trongaze::TronAddress;
///
/// let address = TronAddress::parse("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t").unwrap();
/// assert_eq!(address.as_str().len(), 34);
///
/// assert!(TronAddress::parse("not-an-address").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TronAddress(String);

impl TronAddress {
    /// Validates and wraps an address string.
    ///
    /// # Errors
    ///
    /// Returns a descriptive [`AddressError`] when the string cannot denote a
    /// valid mainnet address: wrong length, a character outside the Base58
    /// alphabet, a version byte other than `0x41`, or a checksum mismatch.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        if raw.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength { length: raw.len() });
        }

        let decoded = base58_decode(raw)?;
        if decoded.len() != DECODED_LEN {
            return Err(AddressError::InvalidPayloadLength {
                length: decoded.len(),
            });
        }

        if decoded[0] != VERSION_BYTE {
            return Err(AddressError::InvalidVersion { byte: decoded[0] });
        }

        let checksum = double_sha256(&decoded[..21]);
        if checksum[..4] != decoded[21..] {
            return Err(AddressError::ChecksumMismatch);
        }

        Ok(Self(raw.to_owned()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TronAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TronAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TronAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TronAddress> for String {
    fn from(address: TronAddress) -> Self {
        address.0
    }
}

/// Decodes a Base58 string into bytes.
///
/// Leading `1` characters map to leading zero bytes, per the Base58Check
/// convention.
fn base58_decode(input: &str) -> Result<Vec<u8>, AddressError> {
    let mut bytes: Vec<u8> = Vec::with_capacity(DECODED_LEN);

    for (position, c) in input.chars().enumerate() {
        let digit = ALPHABET
            .iter()
            .position(|&a| a as char == c)
            .ok_or(AddressError::InvalidCharacter {
                character: c,
                position,
            })? as u32;

        let mut carry = digit;
        for b in bytes.iter_mut() {
            carry += (*b as u32) * 58;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    for c in input.chars() {
        if c == '1' {
            bytes.push(0);
        } else {
            break;
        }
    }

    bytes.reverse();
    Ok(bytes)
}

fn double_sha256(payload: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(payload);
    Sha256::digest(first).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Well-known mainnet addresses.
    const USDT_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
    const BLACK_HOLE: &str = "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb";

    #[test]
    fn valid_addresses_parse() {
        for raw in [USDT_CONTRACT, BLACK_HOLE] {
            let address = TronAddress::parse(raw).unwrap();
            assert_eq!(address.as_str(), raw);
            assert_eq!(address.to_string(), raw);
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = TronAddress::parse("TR7NHqjeKQx").unwrap_err();
        assert!(matches!(err, AddressError::InvalidLength { length: 11 }));

        let long = format!("{USDT_CONTRACT}xx");
        assert!(TronAddress::parse(&long).is_err());
    }

    #[test]
    fn non_base58_character_is_rejected() {
        // '0', 'O', 'I', and 'l' are excluded from the Base58 alphabet.
        let raw = "T000000000000000000000000000000000";
        let err = TronAddress::parse(raw).unwrap_err();
        assert!(matches!(
            err,
            AddressError::InvalidCharacter {
                character: '0',
                position: 1
            }
        ));
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        // Swap two interior characters of a valid address.
        let mut chars: Vec<char> = USDT_CONTRACT.chars().collect();
        chars.swap(10, 11);
        let corrupted: String = chars.into_iter().collect();
        assert_ne!(corrupted, USDT_CONTRACT);
        assert!(TronAddress::parse(&corrupted).is_err());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let address = TronAddress::parse(USDT_CONTRACT).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{USDT_CONTRACT}\""));

        let back: TronAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);

        // Deserialization runs full validation.
        let bad: Result<TronAddress, _> = serde_json::from_str("\"TInvalidInvalidInvalidInvalidInval\"");
        assert!(bad.is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: TronAddress = USDT_CONTRACT.parse().unwrap();
        assert_eq!(parsed.as_str(), USDT_CONTRACT);
    }

    proptest! {
        /// Arbitrary strings never panic and non-34-char strings always fail.
        #[test]
        fn parse_never_panics(raw in ".{0,64}") {
            let result = TronAddress::parse(&raw);
            if raw.len() != 34 {
                prop_assert!(result.is_err());
            }
        }

        /// Mutating any single character of a valid address invalidates it.
        #[test]
        fn single_char_mutation_invalidates(index in 0usize..34, replacement in 0usize..58) {
            let mut chars: Vec<char> = USDT_CONTRACT.chars().collect();
            let original = chars[index];
            let candidate = ALPHABET[replacement] as char;
            prop_assume!(candidate != original);
            chars[index] = candidate;
            let mutated: String = chars.into_iter().collect();
            prop_assert!(TronAddress::parse(&mutated).is_err());
        }
    }
}
