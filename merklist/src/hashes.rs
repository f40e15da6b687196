use crate::bytes::{Bytes32, concat_sorted};
use sha3::{Digest, Keccak256};

#[must_use]
pub fn keccak256(data: &[u8]) -> Bytes32 {
    Keccak256::digest(data).into()
}

/// Hash of an encoded leaf as it enters level 0 of the tree.
#[must_use]
pub fn leaf_hash(encoded: &[u8]) -> Bytes32 {
    keccak256(encoded)
}

pub type NodeHashFn = fn(&Bytes32, &Bytes32) -> Bytes32;

/// Parent hash under the sort-pairs rule: `keccak256(min(a, b) || max(a, b))`.
#[must_use]
pub fn node_hash(a: &Bytes32, b: &Bytes32) -> Bytes32 {
    keccak256(&concat_sorted(a, b))
}
