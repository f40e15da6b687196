use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Duplicate record for identity {identity} with value {value}")]
    DuplicateRecord { identity: String, value: u64 },

    #[error("Record is not in the allowlist")]
    LeafNotFound,

    #[error("Merkle tree nodes must be 32 bytes")]
    InvalidNodeLength,

    #[error("Index out of bounds")]
    IndexOutOfBounds,

    #[error("Merkle tree is invalid")]
    InvalidTree,

    #[error("Merkle tree does not contain the expected value")]
    ValueMismatch,

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Hex decode error: {0}")]
    HexDecode(String),

    #[error("Malformed allowlist file: {0}")]
    MalformedFile(String),
}

pub type Result<T> = std::result::Result<T, MerkleTreeError>;

#[inline]
pub fn validate_argument<T: AsRef<str>>(condition: bool, message: T) -> Result<()> {
    if !condition {
        Err(MerkleTreeError::InvalidArgument(
            message.as_ref().to_string(),
        ))
    } else {
        Ok(())
    }
}

#[inline]
pub fn invariant<T: AsRef<str>>(condition: bool, message: T) -> Result<()> {
    if !condition {
        Err(MerkleTreeError::Invariant(message.as_ref().to_string()))
    } else {
        Ok(())
    }
}

#[inline]
pub fn invalid_record<T: std::fmt::Display>(message: T) -> MerkleTreeError {
    MerkleTreeError::InvalidRecord(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_argument() {
        assert!(validate_argument(true, "unused").is_ok());
        assert_eq!(
            validate_argument(false, "Index out of range"),
            Err(MerkleTreeError::InvalidArgument(
                "Index out of range".to_string()
            ))
        );
    }

    #[test]
    fn test_invariant() {
        assert!(invariant(true, "unused").is_ok());
        assert!(matches!(
            invariant(false, "broken"),
            Err(MerkleTreeError::Invariant(msg)) if msg == "broken"
        ));
    }

    #[test]
    fn test_duplicate_record_message() {
        let err = MerkleTreeError::DuplicateRecord {
            identity: "0x1111111111111111111111111111111111111111".to_string(),
            value: 2,
        };
        assert_eq!(
            err.to_string(),
            "Duplicate record for identity 0x1111111111111111111111111111111111111111 with value 2"
        );
    }
}
