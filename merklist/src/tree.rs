use crate::bytes::{Bytes32, HexString, ToBytes32, bytes32_to_hex, compare_bytes32};
use crate::core::{
    Levels, get_proof, hashes_to_hex, is_valid_merkle_levels, levels_root, make_merkle_levels,
    process_proof, render_merkle_levels,
};
use crate::error::{MerkleTreeError, Result, invariant};
use crate::hashes::node_hash;
use crate::options::MerkleTreeOptions;
use crate::record::{Record, RecordEntry};
use crate::verify::verify;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

pub const FORMAT: &str = "allowlist-v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowlistTreeData {
    pub format: String,
    pub sort_leaves: bool,
    pub tree: Vec<Vec<HexString>>,
    pub values: Vec<ValueEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueEntry {
    pub value: RecordEntry,
    pub leaf_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IndexedRecord {
    record: Record,
    leaf_index: usize,
}

/// Merkle commitment over a fixed set of allowlist records.
///
/// Values keep the order they were supplied in; `leaf_index` maps each one to
/// its position in level 0.
#[derive(Debug, Clone)]
pub struct AllowlistTree {
    levels: Levels,
    values: Vec<IndexedRecord>,
    hash_lookup: HashMap<Bytes32, usize>,
    sort_leaves: bool,
}

impl AllowlistTree {
    fn new(levels: Levels, values: Vec<IndexedRecord>, sort_leaves: bool) -> Self {
        let hash_lookup: HashMap<Bytes32, usize> = values
            .iter()
            .enumerate()
            .map(|(value_index, entry)| (entry.record.leaf_hash(), value_index))
            .collect();

        Self {
            levels,
            values,
            hash_lookup,
            sort_leaves,
        }
    }

    /// Commits to `records`. Fails if any record appears twice; an empty set
    /// commits to the zero root.
    pub fn of(records: &[Record], options: MerkleTreeOptions) -> Result<Self> {
        let mut seen: HashMap<Bytes32, usize> = HashMap::with_capacity(records.len());
        let mut hashed_values: Vec<(usize, Bytes32)> = Vec::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            let hash = record.leaf_hash();
            if seen.insert(hash, i).is_some() {
                return Err(MerkleTreeError::DuplicateRecord {
                    identity: record.identity().to_string(),
                    value: record.value(),
                });
            }
            hashed_values.push((i, hash));
        }

        if options.sort_leaves {
            hashed_values.sort_by(|a, b| compare_bytes32(&a.1, &b.1));
        }

        let leaves: Vec<Bytes32> = hashed_values.iter().map(|(_, h)| *h).collect();
        let levels = make_merkle_levels(&leaves, node_hash);

        let mut indexed_values: Vec<IndexedRecord> = records
            .iter()
            .map(|&record| IndexedRecord {
                record,
                leaf_index: 0,
            })
            .collect();

        for (leaf_index, (value_index, _)) in hashed_values.iter().enumerate() {
            indexed_values[*value_index].leaf_index = leaf_index;
        }

        let tree = Self::new(levels, indexed_values, options.sort_leaves);
        debug!(
            records = tree.len(),
            depth = tree.depth(),
            sort_leaves = options.sort_leaves,
            root = %tree.root_hex(),
            "built allowlist tree"
        );
        Ok(tree)
    }

    /// Parses `entries` and commits to them. Any malformed entry fails the
    /// whole build.
    pub fn from_entries(entries: &[RecordEntry], options: MerkleTreeOptions) -> Result<Self> {
        let records = entries
            .iter()
            .map(Record::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::of(&records, options)
    }

    pub fn load(data: AllowlistTreeData) -> Result<Self> {
        if data.format != FORMAT {
            return Err(MerkleTreeError::UnknownFormat(data.format));
        }

        let levels = data
            .tree
            .iter()
            .map(|level| {
                level
                    .iter()
                    .map(|node| node.to_bytes32())
                    .collect::<Result<Vec<Bytes32>>>()
            })
            .collect::<Result<Levels>>()?;

        let values = data
            .values
            .iter()
            .map(|entry| {
                Ok(IndexedRecord {
                    record: Record::try_from(&entry.value)?,
                    leaf_index: entry.leaf_index,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let tree = Self::new(levels, values, data.sort_leaves);
        tree.validate()?;
        debug!(records = tree.len(), root = %tree.root_hex(), "loaded allowlist tree");
        Ok(tree)
    }

    /// Recomputes the root from `record` and `proof` and compares it with
    /// `root`. Never fails; malformed input simply does not verify.
    pub fn verify(root: &Bytes32, record: &Record, proof: &[Bytes32]) -> bool {
        verify(record, proof, root)
    }

    pub fn root(&self) -> Bytes32 {
        levels_root(&self.levels)
    }

    pub fn root_hex(&self) -> HexString {
        bytes32_to_hex(&self.root())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of levels, leaves included. Zero for an empty tree.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn at(&self, index: usize) -> Option<&Record> {
        self.values.get(index).map(|e| &e.record)
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.values.iter().enumerate().map(|(i, e)| (i, &e.record))
    }

    pub fn dump(&self) -> AllowlistTreeData {
        AllowlistTreeData {
            format: FORMAT.to_string(),
            sort_leaves: self.sort_leaves,
            tree: self.levels.iter().map(|level| hashes_to_hex(level)).collect(),
            values: self
                .values
                .iter()
                .map(|e| ValueEntry {
                    value: RecordEntry::from(&e.record),
                    leaf_index: e.leaf_index,
                })
                .collect(),
        }
    }

    pub fn render(&self) -> Result<String> {
        render_merkle_levels(&self.levels)
    }

    pub fn validate(&self) -> Result<()> {
        let leaf_count = self.levels.first().map_or(0, Vec::len);
        if leaf_count != self.values.len() || self.hash_lookup.len() != self.values.len() {
            return Err(MerkleTreeError::InvalidTree);
        }

        for entry in &self.values {
            self.validate_value(entry)?;
        }

        if self.values.is_empty() {
            // an empty allowlist commits to the zero root and has no levels
            if !self.levels.is_empty() {
                return Err(MerkleTreeError::InvalidTree);
            }
            return Ok(());
        }

        if self.sort_leaves
            && self.levels[0]
                .windows(2)
                .any(|pair| compare_bytes32(&pair[0], &pair[1]).is_gt())
        {
            return Err(MerkleTreeError::InvalidTree);
        }

        if !is_valid_merkle_levels(&self.levels, node_hash) {
            return Err(MerkleTreeError::InvalidTree);
        }
        Ok(())
    }

    fn validate_value(&self, entry: &IndexedRecord) -> Result<()> {
        let stored_hash = self
            .levels
            .first()
            .and_then(|leaves| leaves.get(entry.leaf_index))
            .ok_or(MerkleTreeError::IndexOutOfBounds)?;
        if entry.record.leaf_hash() != *stored_hash {
            return Err(MerkleTreeError::ValueMismatch);
        }
        Ok(())
    }

    pub fn leaf_hash(&self, record: &Record) -> HexString {
        bytes32_to_hex(&record.leaf_hash())
    }

    /// Index of `record` among the supplied values.
    pub fn leaf_lookup(&self, record: &Record) -> Result<usize> {
        self.hash_lookup
            .get(&record.leaf_hash())
            .copied()
            .ok_or(MerkleTreeError::LeafNotFound)
    }

    pub fn get_proof_by_index(&self, index: usize) -> Result<Vec<Bytes32>> {
        let entry = self
            .values
            .get(index)
            .ok_or(MerkleTreeError::IndexOutOfBounds)?;
        self.validate_value(entry)?;

        let proof = get_proof(&self.levels, entry.leaf_index)?;
        trace!(
            index,
            leaf_index = entry.leaf_index,
            siblings = proof.len(),
            "extracted proof"
        );
        invariant(
            process_proof(&self.levels[0][entry.leaf_index], &proof, node_hash) == self.root(),
            "Unable to prove value",
        )?;
        Ok(proof)
    }

    pub fn get_proof(&self, record: &Record) -> Result<Vec<Bytes32>> {
        let index = self.leaf_lookup(record)?;
        self.get_proof_by_index(index)
    }

    /// Proof for `record` as `0x`-prefixed hex strings.
    pub fn get_hex_proof(&self, record: &Record) -> Result<Vec<HexString>> {
        Ok(hashes_to_hex(&self.get_proof(record)?))
    }

    pub fn verify_proof(&self, record: &Record, proof: &[Bytes32]) -> bool {
        verify(record, proof, &self.root())
    }

    pub fn verify_proof_by_index(&self, index: usize, proof: &[Bytes32]) -> Result<bool> {
        let record = self.at(index).ok_or(MerkleTreeError::IndexOutOfBounds)?;
        Ok(self.verify_proof(record, proof))
    }
}
