//! Level-oriented Merkle tree primitives.
//!
//! A tree is stored as `levels[0..depth]`, `levels[0]` being the leaf hashes
//! and the last level holding only the root. Each level pairs up adjacent
//! nodes of the level below; an odd trailing node has no sibling and is
//! carried up unchanged.

use crate::bytes::{Bytes32, HexString, ZERO_BYTES32, bytes32_to_hex};
use crate::error::{MerkleTreeError, Result, validate_argument};
use crate::hashes::NodeHashFn;

pub type Levels = Vec<Vec<Bytes32>>;

#[inline]
fn sibling_index(i: usize) -> usize {
    i ^ 1
}

#[inline]
fn parent_index(i: usize) -> usize {
    i / 2
}

#[inline]
fn hash_pair(pair: &[Bytes32], node_hash: NodeHashFn) -> Bytes32 {
    match pair.get(1) {
        Some(right) => node_hash(&pair[0], right),
        None => pair[0],
    }
}

#[cfg(feature = "parallel")]
fn next_level(level: &[Bytes32], node_hash: NodeHashFn) -> Vec<Bytes32> {
    use rayon::prelude::*;
    level
        .par_chunks(2)
        .map(|pair| hash_pair(pair, node_hash))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn next_level(level: &[Bytes32], node_hash: NodeHashFn) -> Vec<Bytes32> {
    level
        .chunks(2)
        .map(|pair| hash_pair(pair, node_hash))
        .collect()
}

/// Builds every level above `leaves`. An empty input yields no levels.
pub fn make_merkle_levels(leaves: &[Bytes32], node_hash: NodeHashFn) -> Levels {
    if leaves.is_empty() {
        return Vec::new();
    }

    let mut levels = vec![leaves.to_vec()];
    while let Some(top) = levels.last().filter(|level| level.len() > 1) {
        let next = next_level(top, node_hash);
        levels.push(next);
    }
    levels
}

/// Root of the tree, or the zero hash for a tree without leaves.
#[must_use]
pub fn levels_root(levels: &[Vec<Bytes32>]) -> Bytes32 {
    levels
        .last()
        .and_then(|top| top.first())
        .copied()
        .unwrap_or(ZERO_BYTES32)
}

/// Sibling path for the leaf at `index`, bottom level first. Levels where the
/// node was promoted without a sibling contribute nothing.
pub fn get_proof(levels: &[Vec<Bytes32>], index: usize) -> Result<Vec<Bytes32>> {
    let leaf_count = levels.first().map_or(0, Vec::len);
    if index >= leaf_count {
        return Err(MerkleTreeError::IndexOutOfBounds);
    }

    let mut proof = Vec::with_capacity(levels.len().saturating_sub(1));
    let mut idx = index;

    for level in &levels[..levels.len() - 1] {
        if let Some(sibling) = level.get(sibling_index(idx)) {
            proof.push(*sibling);
        }
        idx = parent_index(idx);
    }

    Ok(proof)
}

/// Folds `proof` into `leaf` with `node_hash`, yielding the implied root.
#[must_use]
pub fn process_proof(leaf: &Bytes32, proof: &[Bytes32], node_hash: NodeHashFn) -> Bytes32 {
    proof
        .iter()
        .fold(*leaf, |acc, sibling| node_hash(&acc, sibling))
}

pub fn is_valid_merkle_levels(levels: &[Vec<Bytes32>], node_hash: NodeHashFn) -> bool {
    let Some(top) = levels.last() else {
        return false;
    };
    if top.len() != 1 {
        return false;
    }

    levels
        .windows(2)
        .all(|pair| pair[0].len() > 1 && next_level(&pair[0], node_hash) == pair[1])
}

pub fn render_merkle_levels(levels: &[Vec<Bytes32>]) -> Result<String> {
    validate_argument(
        levels.last().is_some_and(|top| top.len() == 1),
        "Expected a single root node",
    )?;

    let top = levels.len() - 1;
    let mut stack: Vec<(usize, usize, Vec<usize>)> = vec![(top, 0, vec![])];
    let mut lines = Vec::new();

    while let Some((level, i, path)) = stack.pop() {
        let mut line = String::new();

        for &p in path.iter().take(path.len().saturating_sub(1)) {
            line.push_str(if p == 0 { "   " } else { "│  " });
        }

        if let Some(&last) = path.last() {
            line.push_str(if last == 0 { "└─ " } else { "├─ " });
        }

        line.push_str(&format!("{level}:{i}) {}", bytes32_to_hex(&levels[level][i])));
        lines.push(line);

        if level > 0 {
            let left = 2 * i;
            let right = left + 1;
            if right < levels[level - 1].len() {
                stack.push((level - 1, right, [path.clone(), vec![0]].concat()));
                stack.push((level - 1, left, [path, vec![1]].concat()));
            } else {
                stack.push((level - 1, left, [path, vec![0]].concat()));
            }
        }
    }

    Ok(lines.join("\n"))
}

#[must_use]
pub fn hashes_to_hex(hashes: &[Bytes32]) -> Vec<HexString> {
    hashes.iter().map(bytes32_to_hex).collect()
}
