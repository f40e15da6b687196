//! Proof verification.
//!
//! Independent verifiers (for example an on-chain contract) must reproduce
//! this exactly: `acc = keccak256(abi.encode(identity, value))`, then for each
//! proof element in order `acc = keccak256(min(acc, p) || max(acc, p))` with
//! hashes compared as big-endian integers, then `acc == root`.

use crate::bytes::{Bytes32, hex_to_bytes32};
use crate::core::process_proof;
use crate::hashes::node_hash;
use crate::record::{Record, parse_identity};

/// True iff `proof` leads from `record`'s leaf hash to `root`.
#[must_use]
pub fn verify(record: &Record, proof: &[Bytes32], root: &Bytes32) -> bool {
    process_proof(&record.leaf_hash(), proof, node_hash) == *root
}

/// [`verify`] over loosely typed input. Unparseable identities, proof
/// elements or roots make the proof invalid rather than an error.
#[must_use]
pub fn verify_hex<S: AsRef<str>>(identity: &str, value: u64, proof: &[S], root: &str) -> bool {
    let Ok(identity) = parse_identity(identity) else {
        return false;
    };
    let Ok(root) = hex_to_bytes32(root) else {
        return false;
    };
    let Ok(proof) = proof
        .iter()
        .map(|p| hex_to_bytes32(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()
    else {
        return false;
    };

    verify(&Record::new(identity, value), &proof, &root)
}
