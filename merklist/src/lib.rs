//! # merklist
//!
//! Merkle allowlist commitments: one 32-byte root commits to a set of
//! `(address, allotment)` records, and each record's membership is shown with
//! a logarithmic-size proof.
//!
//! ## Construction
//!
//! - **Leaf**: `keccak256(abi.encode(address, uint64))`
//! - **Node**: `keccak256(min(a, b) || max(a, b))`, siblings ordered by value
//! - **Odd levels**: the last node is carried up unchanged
//! - **Level 0**: sorted by leaf hash by default, so the root depends only on
//!   the set of records
//!
//! Proofs generated here verify against Solidity-style verifiers that use
//! sorted-pair keccak256 hashing.
//!
//! ## Example
//!
//! ```rust
//! use merklist::{Address, AllowlistTree, MerkleTreeOptions, Record, verify};
//!
//! let records: Vec<Record> = (1..=6)
//!     .map(|i| Record::new(Address::repeat_byte(i), 2))
//!     .collect();
//! let tree = AllowlistTree::of(&records, MerkleTreeOptions::default()).unwrap();
//!
//! let proof = tree.get_proof(&records[0]).unwrap();
//! assert!(verify(&records[0], &proof, &tree.root()));
//! assert!(!verify(&records[0], &[], &tree.root()));
//! ```

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bytes;
pub mod config;
pub mod core;
pub mod error;
pub mod hashes;
pub mod options;
pub mod record;
pub mod tree;
pub mod verify;
pub mod whitelist;

pub use alloy_primitives::Address;
pub use bytes::{Bytes32, HexString, ToBytes32, ZERO_BYTES32};
pub use config::AllowlistFile;
pub use error::{MerkleTreeError, Result};
pub use hashes::{NodeHashFn, keccak256, leaf_hash, node_hash};
pub use options::MerkleTreeOptions;
pub use record::{Record, RecordEntry};
pub use tree::{AllowlistTree, AllowlistTreeData, ValueEntry};
pub use verify::{verify, verify_hex};
pub use whitelist::Whitelist;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::bytes32_to_hex;
    use serde_json::json;

    /// First six Hardhat development accounts.
    const SIGNERS: [&str; 6] = [
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
        "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
        "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
        "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
    ];

    fn signer_records() -> Vec<Record> {
        SIGNERS
            .iter()
            .map(|s| Record::parse(s, &json!(2)).unwrap())
            .collect()
    }

    #[test]
    fn test_six_signer_allowlist_e2e() {
        let records = signer_records();
        let tree = AllowlistTree::of(&records, MerkleTreeOptions::default()).unwrap();
        let root = tree.root();

        assert_eq!(
            tree.root_hex(),
            "0x8305992891526c3ea2fadf6f09ac96dbc60906051419f4492e02a792b16fe215"
        );

        let proof = tree.get_proof(&records[0]).unwrap();
        assert_eq!(
            hashes_hex(&proof),
            vec![
                "0xbd19ff506d92b45639170e62f1a12073921a4358c3ccd05d4584519f78d65103",
                "0xc38a69aed4d4dab68384f0eb0966d084bba5c1be5e2652ea2f18e268539ac030",
                "0xd4acaa9682309f4e43eb3b8c9b3767da3888495102db49e971f781a4660c135f",
            ]
        );
        assert!(verify(&records[0], &proof, &root));
        assert!(!verify(&records[0], &[], &root));

        let whitelist = Whitelist::new(root);
        assert!(whitelist.check_in_whitelist(records[0].identity(), &proof, 2));
        assert!(!whitelist.check_in_whitelist(records[0].identity(), &[], 2));
    }

    #[test]
    fn test_insertion_order_layout() {
        let records = signer_records();
        let options = MerkleTreeOptions::default().with_sort_leaves(false);
        let tree = AllowlistTree::of(&records, options).unwrap();

        assert_eq!(
            tree.root_hex(),
            "0x78c420d20b806e3390af970073bb9fe2c9b09b5f0bb64c7b4ef9d382a2e84567"
        );
        let proof = tree.get_hex_proof(&records[0]).unwrap();
        assert_eq!(
            proof,
            vec![
                "0x6ffab96d4009ce38df68f4dc04583568617773212ffc44bef9feaece2962b766",
                "0x4d599dffc2a93b068ea6425cf6b498ba69604b38f9ebbe824b4a51f29014d932",
                "0xd4acaa9682309f4e43eb3b8c9b3767da3888495102db49e971f781a4660c135f",
            ]
        );
        assert!(verify_hex(SIGNERS[0], 2, &proof[..], &tree.root_hex()));
    }

    #[test]
    fn test_small_sets_known_roots() {
        let records = signer_records();
        let cases = [
            (
                1,
                "0xbc40fbf4394cd00f78fae9763b0c2c71b21ea442c42fdadc5b720537240ebac1",
            ),
            (
                2,
                "0x632857fc45795b05ef446a31b8c68c337da8d48fdc1ad84b4fb1b1ca4987ba5a",
            ),
            (
                3,
                "0xe1cad895f4dba0f06c16fd21242be83007b851a66f8e539b7d467c38e2a13fa1",
            ),
            (
                5,
                "0xb98c79c3e7c2999c0ba3cc6e9922ed42595329a27b95f527480fc671328bd0dd",
            ),
        ];

        for (count, expected) in cases {
            let tree =
                AllowlistTree::of(&records[..count], MerkleTreeOptions::default()).unwrap();
            assert_eq!(tree.root_hex(), expected, "{count} records");
        }
    }

    #[test]
    fn test_stale_proof_rejected() {
        let records = signer_records();
        let old = AllowlistTree::of(&records[..4], MerkleTreeOptions::default()).unwrap();
        let new = AllowlistTree::of(&records, MerkleTreeOptions::default()).unwrap();

        let stale = old.get_proof(&records[0]).unwrap();
        assert!(!verify(&records[0], &stale, &new.root()));
    }

    #[test]
    fn test_dump_load_e2e() {
        let tree = AllowlistTree::of(&signer_records(), MerkleTreeOptions::default()).unwrap();

        let json_str = serde_json::to_string_pretty(&tree.dump()).unwrap();
        let loaded_data: AllowlistTreeData = serde_json::from_str(&json_str).unwrap();
        let loaded = AllowlistTree::load(loaded_data).unwrap();

        assert_eq!(tree.root(), loaded.root());
        for (_, record) in loaded.entries() {
            let proof = loaded.get_proof(record).unwrap();
            assert!(verify(record, &proof, &tree.root()));
        }
    }

    fn hashes_hex(hashes: &[Bytes32]) -> Vec<String> {
        hashes.iter().map(bytes32_to_hex).collect()
    }
}
