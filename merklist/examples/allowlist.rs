//! Allowlist example - mint allotments.
//!
//! Commits six accounts with an allotment of 2 each, proves the first one,
//! and checks the proof through a root-only `Whitelist` gate.
//!
//! Run: `cargo run --example allowlist`

use merklist::{AllowlistTree, MerkleTreeOptions, Record, Whitelist, verify_hex};
use serde_json::json;

fn main() -> merklist::Result<()> {
    let accounts = [
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
        "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
        "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
        "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
    ];
    let records = accounts
        .iter()
        .map(|account| Record::parse(account, &json!(2)))
        .collect::<merklist::Result<Vec<_>>>()?;

    let tree = AllowlistTree::of(&records, MerkleTreeOptions::default())?;

    println!("=== Allowlist Merkle Tree ===\n");
    println!("Root: {}", tree.root_hex());
    println!("Accounts: {}\n", tree.len());

    let owner = &records[0];
    let proof = tree.get_proof(owner)?;
    let hex_proof = tree.get_hex_proof(owner)?;

    println!("Account: {owner}");
    println!("Proof:");
    for (i, hash) in hex_proof.iter().enumerate() {
        println!("  [{i}] {hash}");
    }

    // Only the root is stored on the verifying side.
    let whitelist = Whitelist::new(tree.root());
    println!(
        "\nCheck with proof: {}",
        whitelist.check_in_whitelist(owner.identity(), &proof, 2)
    );
    println!(
        "Check with empty proof: {}",
        whitelist.check_in_whitelist(owner.identity(), &[], 2)
    );
    println!(
        "Check with inflated allotment: {}",
        whitelist.check_in_whitelist(owner.identity(), &proof, 3)
    );

    // Hex form, as a client would submit it.
    let valid = verify_hex(accounts[0], 2, &hex_proof, &tree.root_hex());
    println!("Hex verification: {valid}");

    println!("\n=== Tree Structure ===\n");
    println!("{}", tree.render()?);

    Ok(())
}
