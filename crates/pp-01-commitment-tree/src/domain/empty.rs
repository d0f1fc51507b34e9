//! Empty-subtree table.

use shared_crypto::DomainHasher;
use shared_types::{Hash, LeafValue};

/// Hashes of all-empty subtrees, one per level.
///
/// `at(0)` is the hash of an empty leaf and `at(depth)` is the root of a
/// tree in which no slot was ever written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptySubtrees {
    levels: Vec<Hash>,
}

impl EmptySubtrees {
    /// Build the table for `depth` levels.
    pub fn new<H: DomainHasher + ?Sized>(hasher: &H, depth: usize) -> Self {
        let mut levels = Vec::with_capacity(depth + 1);
        let mut current = hasher.hash_leaf(LeafValue::EMPTY.as_bytes());
        levels.push(current);
        for _ in 0..depth {
            current = hasher.hash_node(&current, &current);
            levels.push(current);
        }
        Self { levels }
    }

    /// Empty-subtree hash at `level`.
    pub fn at(&self, level: usize) -> Hash {
        self.levels[level]
    }

    /// Root of the empty tree.
    pub fn root(&self) -> Hash {
        self.levels[self.depth()]
    }

    /// Tree depth this table was built for.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }
}
