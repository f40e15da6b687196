//! Allowlist records and their canonical leaf encoding.
//!
//! A leaf is the Solidity ABI encoding of `(address identity, uint64 value)`:
//! two 32-byte words, the address left-padded with 12 zero bytes and the value
//! as a big-endian integer left-padded with 24 zero bytes. Every field has a
//! fixed width, so distinct records never share an encoding.

use crate::bytes::Bytes32;
use crate::error::{Result, invalid_record};
use crate::hashes::leaf_hash;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an encoded leaf in bytes.
pub const ENCODED_LEAF_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Record {
    identity: Address,
    value: u64,
}

impl Record {
    pub const fn new(identity: Address, value: u64) -> Self {
        Self { identity, value }
    }

    /// Builds a record from loosely typed input, rejecting anything that does
    /// not fit a 20-byte address and an unsigned 64-bit value.
    pub fn parse(identity: &str, value: &serde_json::Value) -> Result<Self> {
        Ok(Self::new(parse_identity(identity)?, parse_value(value)?))
    }

    pub fn identity(&self) -> Address {
        self.identity
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(ENCODED_LEAF_LEN);
        encoded.extend(self.identity.abi_encode());
        encoded.extend(U256::from(self.value).abi_encode());
        encoded
    }

    #[must_use]
    pub fn leaf_hash(&self) -> Bytes32 {
        leaf_hash(&self.encode())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.identity, self.value)
    }
}

/// Wire form of a record as it appears in allowlist files and tree dumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub identity: String,
    pub value: serde_json::Value,
}

impl TryFrom<&RecordEntry> for Record {
    type Error = crate::error::MerkleTreeError;

    fn try_from(entry: &RecordEntry) -> Result<Self> {
        Record::parse(&entry.identity, &entry.value)
    }
}

impl From<&Record> for RecordEntry {
    fn from(record: &Record) -> Self {
        Self {
            identity: record.identity.to_string(),
            value: serde_json::Value::from(record.value),
        }
    }
}

pub fn parse_identity(s: &str) -> Result<Address> {
    s.trim()
        .parse::<Address>()
        .map_err(|e| invalid_record(format!("Invalid address '{s}': {e}")))
}

pub fn parse_value(value: &serde_json::Value) -> Result<u64> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(u)
            } else if n.as_i64().is_some() {
                Err(invalid_record(format!("Negative value: {n}")))
            } else {
                Err(invalid_record(format!(
                    "Value {n} does not fit an unsigned 64-bit integer"
                )))
            }
        }
        serde_json::Value::String(s) => {
            let s = s.trim();
            let parsed = match s.strip_prefix("0x") {
                Some(hex_str) => u64::from_str_radix(hex_str, 16),
                None => s.parse::<u64>(),
            };
            parsed.map_err(|e| invalid_record(format!("Invalid value '{s}': {e}")))
        }
        _ => Err(invalid_record("Expected number or string for value")),
    }
}
