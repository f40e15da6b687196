use crate::error::{MerkleTreeError, Result};
use alloy_primitives::B256;
use std::cmp::Ordering;

pub type Bytes32 = [u8; 32];
pub type HexString = String;

/// Root of an allowlist with no records.
pub const ZERO_BYTES32: Bytes32 = [0u8; 32];

pub trait ToBytes32 {
    fn to_bytes32(&self) -> Result<Bytes32>;
}

impl ToBytes32 for [u8; 32] {
    fn to_bytes32(&self) -> Result<Bytes32> {
        Ok(*self)
    }
}

impl ToBytes32 for &[u8] {
    fn to_bytes32(&self) -> Result<Bytes32> {
        Bytes32::try_from(*self).map_err(|_| MerkleTreeError::InvalidNodeLength)
    }
}

impl ToBytes32 for Vec<u8> {
    fn to_bytes32(&self) -> Result<Bytes32> {
        self.as_slice().to_bytes32()
    }
}

impl ToBytes32 for &str {
    fn to_bytes32(&self) -> Result<Bytes32> {
        hex_to_bytes32(self)
    }
}

impl ToBytes32 for String {
    fn to_bytes32(&self) -> Result<Bytes32> {
        hex_to_bytes32(self)
    }
}

impl ToBytes32 for B256 {
    fn to_bytes32(&self) -> Result<Bytes32> {
        Ok(self.0)
    }
}

pub fn hex_to_bytes32(s: &str) -> Result<Bytes32> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| MerkleTreeError::HexDecode(e.to_string()))?;
    bytes.as_slice().to_bytes32()
}

#[must_use]
pub fn bytes32_to_hex(bytes: &Bytes32) -> HexString {
    format!("0x{}", hex::encode(bytes))
}

/// Orders two hashes as big-endian unsigned integers.
#[must_use]
pub fn compare_bytes32(a: &Bytes32, b: &Bytes32) -> Ordering {
    a.as_slice().cmp(b.as_slice())
}

/// `min(a, b) || max(a, b)`, the preimage of every internal node.
#[must_use]
pub fn concat_sorted(a: &Bytes32, b: &Bytes32) -> [u8; 64] {
    let (lo, hi) = match compare_bytes32(a, b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };
    let mut result = [0u8; 64];
    result[..32].copy_from_slice(lo);
    result[32..].copy_from_slice(hi);
    result
}
