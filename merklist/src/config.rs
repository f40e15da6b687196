//! Allowlist source files.
//!
//! ```json
//! {
//!   "options": { "sortLeaves": true },
//!   "records": [
//!     { "identity": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "value": 2 }
//!   ]
//! }
//! ```
//!
//! `options` may be omitted. A `value` may be a JSON number or a decimal or
//! `0x`-prefixed hex string.

use crate::error::{MerkleTreeError, Result};
use crate::options::MerkleTreeOptions;
use crate::record::{Record, RecordEntry};
use crate::tree::AllowlistTree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowlistFile {
    #[serde(default)]
    pub options: MerkleTreeOptions,
    pub records: Vec<RecordEntry>,
}

impl AllowlistFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MerkleTreeError::MalformedFile(e.to_string()))
    }

    pub fn records(&self) -> Result<Vec<Record>> {
        self.records.iter().map(Record::try_from).collect()
    }

    pub fn build(&self) -> Result<AllowlistTree> {
        AllowlistTree::of(&self.records()?, self.options)
    }
}
