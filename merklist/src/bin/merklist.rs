//! # merklist CLI
//!
//! Builds allowlist roots and proofs from a JSON allowlist file and checks
//! proofs against a published root.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use merklist::record::parse_identity;
use merklist::{AllowlistFile, AllowlistTree, Record, verify_hex};

/// Merkle allowlist commitments.
#[derive(Parser, Debug)]
#[command(name = "merklist", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Allowlist JSON file.
    #[arg(short, long)]
    records: PathBuf,

    /// Keep leaves in file order instead of sorting them by hash.
    #[arg(long)]
    unsorted: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the root committing to an allowlist.
    Root(SourceArgs),

    /// Print the proof for one record as a JSON array of hex hashes.
    Proof {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        identity: String,

        #[arg(long)]
        value: u64,
    },

    /// Check a proof against a root. Exits with status 1 when rejected.
    Verify {
        #[arg(long)]
        identity: String,

        #[arg(long)]
        value: u64,

        #[arg(long)]
        root: String,

        /// Comma-separated proof hashes, leaf level first.
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,
    },

    /// Print the full tree as JSON.
    Dump(SourceArgs),

    /// Print the tree structure.
    Render(SourceArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<u8> {
    match command {
        Commands::Root(source) => {
            let tree = load_tree(&source)?;
            println!("{}", tree.root_hex());
        }
        Commands::Proof {
            source,
            identity,
            value,
        } => {
            let tree = load_tree(&source)?;
            let record = Record::new(parse_identity(&identity)?, value);
            let proof = tree
                .get_hex_proof(&record)
                .with_context(|| format!("proving {record}"))?;
            println!("{}", serde_json::to_string_pretty(&proof)?);
        }
        Commands::Verify {
            identity,
            value,
            root,
            proof,
        } => {
            if verify_hex(&identity, value, &proof, &root) {
                println!("accepted");
            } else {
                println!("rejected");
                return Ok(1);
            }
        }
        Commands::Dump(source) => {
            let tree = load_tree(&source)?;
            println!("{}", serde_json::to_string_pretty(&tree.dump())?);
        }
        Commands::Render(source) => {
            let tree = load_tree(&source)?;
            if tree.is_empty() {
                println!("(empty allowlist)");
            } else {
                println!("{}", tree.render()?);
            }
        }
    }
    Ok(0)
}

fn load_tree(source: &SourceArgs) -> anyhow::Result<AllowlistTree> {
    let path = source.records.display();
    let json = std::fs::read_to_string(&source.records)
        .with_context(|| format!("reading allowlist file {path}"))?;
    let mut file =
        AllowlistFile::from_json(&json).with_context(|| format!("parsing allowlist file {path}"))?;
    if source.unsorted {
        file.options = file.options.with_sort_leaves(false);
    }

    tracing::info!(records = file.records.len(), file = %path, "loaded allowlist");
    file.build()
        .with_context(|| format!("building allowlist tree from {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_root() {
        let cli = Cli::try_parse_from(["merklist", "root", "--records", "list.json"]).unwrap();
        let Commands::Root(source) = cli.command else {
            panic!("expected root command");
        };
        assert_eq!(source.records, PathBuf::from("list.json"));
        assert!(!source.unsorted);
    }

    #[test]
    fn cli_parse_proof_unsorted() {
        let cli = Cli::try_parse_from([
            "merklist",
            "-vv",
            "proof",
            "-r",
            "list.json",
            "--unsorted",
            "--identity",
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "--value",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Proof { source, value, .. } = cli.command else {
            panic!("expected proof command");
        };
        assert!(source.unsorted);
        assert_eq!(value, 2);
    }

    #[test]
    fn cli_parse_verify_proof_list() {
        let cli = Cli::try_parse_from([
            "merklist",
            "verify",
            "--identity",
            "0x01",
            "--value",
            "2",
            "--root",
            "0x00",
            "--proof",
            "0xaa,0xbb",
        ])
        .unwrap();
        let Commands::Verify { proof, .. } = cli.command else {
            panic!("expected verify command");
        };
        assert_eq!(proof, vec!["0xaa", "0xbb"]);
    }

    #[test]
    fn cli_parse_verify_without_proof() {
        let cli = Cli::try_parse_from([
            "merklist", "verify", "--identity", "0x01", "--value", "2", "--root", "0x00",
        ])
        .unwrap();
        let Commands::Verify { proof, .. } = cli.command else {
            panic!("expected verify command");
        };
        assert!(proof.is_empty());
    }

    #[test]
    fn cli_rejects_negative_value() {
        let result = Cli::try_parse_from([
            "merklist", "verify", "--identity", "0x01", "--value", "-2", "--root", "0x00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn run_verify_malformed_input_rejects() {
        let code = run(Commands::Verify {
            identity: "0x01".to_string(),
            value: 2,
            root: "0x00".to_string(),
            proof: vec![],
        })
        .unwrap();
        assert_eq!(code, 1);
    }
}
