//! # Domain Entities for the Commitment Tree
//!
//! ## Witness Layout
//!
//! Both vectors run leaf-to-root: entry `l` describes level `l`.
//!
//! - `siblings[l]`: hash of the sibling subtree at level `l`
//! - `path[l]`: `true` when the node at level `l` is a right child
//!
//! The path bits *are* the slot index, so a witness commits to its own
//! position. Verifiers compare that reconstructed index against the one they
//! expect instead of trusting a separately supplied coordinate.

use super::TreeError;
use serde::{Deserialize, Serialize};
use shared_types::{validate_depth, Hash, SlotIndex, MAX_TREE_DEPTH};

/// Configuration for a commitment tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Number of levels between leaves and root. Domain size is `2^depth`.
    pub depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            depth: MAX_TREE_DEPTH,
        }
    }
}

impl TreeConfig {
    /// Config with an explicit depth.
    pub fn with_depth(depth: usize) -> Self {
        Self { depth }
    }

    /// Reject depths outside `1..=256`.
    pub fn validate(&self) -> Result<usize, TreeError> {
        Ok(validate_depth(self.depth)?)
    }
}

/// Sibling path proving the value held at one slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipWitness {
    /// Sibling hashes, leaf level first.
    pub siblings: Vec<Hash>,
    /// Direction bits, leaf level first (`true` = right child).
    pub path: Vec<bool>,
}

impl MembershipWitness {
    /// Build a witness, checking that both vectors agree in length.
    pub fn new(siblings: Vec<Hash>, path: Vec<bool>) -> Result<Self, TreeError> {
        let witness = Self { siblings, path };
        witness.check_shape()?;
        Ok(witness)
    }

    /// Number of levels covered.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Slot index encoded by the direction bits.
    pub fn index(&self) -> SlotIndex {
        self.path
            .iter()
            .enumerate()
            .fold(SlotIndex::ZERO, |index, (level, right)| {
                index.with_bit(level, *right)
            })
    }

    pub(crate) fn check_shape(&self) -> Result<(), TreeError> {
        if self.siblings.len() != self.path.len() {
            return Err(TreeError::MalformedWitness {
                siblings: self.siblings.len(),
                path: self.path.len(),
            });
        }
        if self.path.is_empty() || self.path.len() > MAX_TREE_DEPTH {
            return Err(TreeError::WitnessLength {
                expected: MAX_TREE_DEPTH,
                actual: self.path.len(),
            });
        }
        Ok(())
    }
}

/// Result of opening a witness against a claimed leaf value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MembershipOpening {
    /// Root recomputed from the witness and the claimed value.
    pub root: Hash,
    /// Slot index the witness points at.
    pub index: SlotIndex,
}
