use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MerkleTreeOptions {
    /// Order level 0 by leaf hash. With this off, leaves keep input order and
    /// the root depends on that order.
    pub sort_leaves: bool,
}

impl Default for MerkleTreeOptions {
    fn default() -> Self {
        Self { sort_leaves: true }
    }
}

impl MerkleTreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_leaves(mut self, sort: bool) -> Self {
        self.sort_leaves = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_sort_leaves() {
        assert!(MerkleTreeOptions::new().sort_leaves);
        assert!(!MerkleTreeOptions::new().with_sort_leaves(false).sort_leaves);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let options: MerkleTreeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, MerkleTreeOptions::default());

        let options: MerkleTreeOptions = serde_json::from_str(r#"{"sortLeaves":false}"#).unwrap();
        assert!(!options.sort_leaves);
    }
}
