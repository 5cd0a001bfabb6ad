//! Domain primitives: Address and its validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An Ethereum address, kept in the caller's original casing.
///
/// Addresses coming from the indexer are trusted and built with
/// [`Address::new`]; user-supplied addresses go through
/// [`Address::parse`], which checks the shape before any network
/// interaction happens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

/// The address string is not a 0x-prefixed 20-byte hex value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid Ethereum address: {0}")]
pub struct AddressParseError(pub String);

impl Address {
    /// Wrap an upstream-provided address without validation.
    pub fn new(addr: impl Into<String>) -> Self {
        Address(addr.into())
    }

    /// Validate a user-supplied address: `0x` prefix plus exactly 40
    /// hex characters.
    pub fn parse(s: &str) -> Result<Self, AddressParseError> {
        let hex_part = s
            .strip_prefix("0x")
            .ok_or_else(|| AddressParseError(s.to_string()))?;
        if hex_part.len() != 40 || hex::decode(hex_part).is_err() {
            return Err(AddressParseError(s.to_string()));
        }
        Ok(Address(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used in indexer queries and grouping keys.
    /// The upstream is case-sensitive and stores ids lower-cased.
    pub fn to_query(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
