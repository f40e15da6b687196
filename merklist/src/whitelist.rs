use crate::bytes::{Bytes32, HexString, bytes32_to_hex, hex_to_bytes32};
use crate::error::Result;
use crate::record::Record;
use crate::verify::verify;
use alloy_primitives::Address;
use tracing::warn;

/// Membership gate holding only a committed root.
///
/// Mirrors the allowlist contract that stores the root at deployment and lets
/// a caller prove its own allotment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Whitelist {
    root: Bytes32,
}

impl Whitelist {
    pub const fn new(root: Bytes32) -> Self {
        Self { root }
    }

    pub fn from_hex(root: &str) -> Result<Self> {
        Ok(Self::new(hex_to_bytes32(root)?))
    }

    pub fn root(&self) -> Bytes32 {
        self.root
    }

    pub fn root_hex(&self) -> HexString {
        bytes32_to_hex(&self.root)
    }

    /// Whether `sender` is allowlisted with exactly `max_allowance_to_mint`.
    pub fn check_in_whitelist(
        &self,
        sender: Address,
        proof: &[Bytes32],
        max_allowance_to_mint: u64,
    ) -> bool {
        let accepted = verify(&Record::new(sender, max_allowance_to_mint), proof, &self.root);
        if !accepted {
            warn!(
                %sender,
                allowance = max_allowance_to_mint,
                siblings = proof.len(),
                "allowlist check rejected"
            );
        }
        accepted
    }
}
