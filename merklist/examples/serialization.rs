//! Serialization example.
//!
//! Demonstrates how to dump and load allowlist trees for persistence.
//!
//! Run: `cargo run --example serialization`

use merklist::{AllowlistFile, AllowlistTree, AllowlistTreeData};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const ALLOWLIST: &str = r#"{
    "records": [
        { "identity": "0x1111111111111111111111111111111111111111", "value": 1000 },
        { "identity": "0x2222222222222222222222222222222222222222", "value": "2500" },
        { "identity": "0x3333333333333333333333333333333333333333", "value": "0x1f4" }
    ]
}"#;

fn main() -> Result<()> {
    let file = AllowlistFile::from_json(ALLOWLIST)?;
    let tree = file.build()?;

    println!("Original root: {}", tree.root_hex());

    let json_str = serde_json::to_string_pretty(&tree.dump())?;
    println!("\nSerialized JSON:\n{json_str}");

    let loaded_data: AllowlistTreeData = serde_json::from_str(&json_str)?;
    let loaded_tree = AllowlistTree::load(loaded_data)?;

    println!("\nLoaded root: {}", loaded_tree.root_hex());
    println!("Roots match: {}", tree.root() == loaded_tree.root());

    for (i, record) in loaded_tree.entries() {
        let proof = loaded_tree.get_proof(record)?;
        println!(
            "[{i}] {record}: proof of {} hashes valid = {}",
            proof.len(),
            loaded_tree.verify_proof(record, &proof)
        );
    }

    Ok(())
}
