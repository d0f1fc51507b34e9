use super::{EmptySubtrees, MembershipWitness, TreeConfig, TreeError};
use crate::adapters::InMemoryNodeStore;
use crate::ports::{CommitmentTree, NodeStore};
use shared_crypto::DomainHasher;
use shared_types::{Hash, LeafValue, SlotIndex};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Sparse fixed-depth Merkle tree for off-ledger bookkeeping.
///
/// Only non-empty subtrees are stored; every other node reads as the
/// empty-subtree hash of its level. A write touches exactly `depth + 1`
/// nodes.
pub struct SparseMerkleTree<H: DomainHasher, S: NodeStore = InMemoryNodeStore> {
    hasher: Arc<H>,
    store: S,
    empty: EmptySubtrees,
    leaves: BTreeMap<SlotIndex, LeafValue>,
    depth: usize,
    root: Hash,
}

impl<H: DomainHasher> SparseMerkleTree<H, InMemoryNodeStore> {
    pub fn new(hasher: Arc<H>, config: &TreeConfig) -> Result<Self, TreeError> {
        Self::with_store(hasher, config, InMemoryNodeStore::new())
    }
}

impl<H: DomainHasher, S: NodeStore> SparseMerkleTree<H, S> {
    /// Build an empty tree over `store`. The store must not hold nodes from
    /// another tree.
    pub fn with_store(hasher: Arc<H>, config: &TreeConfig, store: S) -> Result<Self, TreeError> {
        let depth = config.validate()?;
        let empty = EmptySubtrees::new(hasher.as_ref(), depth);
        let root = empty.root();
        Ok(Self {
            hasher,
            store,
            empty,
            leaves: BTreeMap::new(),
            depth,
            root,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Root of the tree with nothing written.
    pub fn empty_root(&self) -> Hash {
        self.empty.root()
    }

    /// Number of slots holding a non-empty value.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    fn check_index(&self, index: &SlotIndex) -> Result<(), TreeError> {
        if index.truncate(self.depth) != *index {
            return Err(TreeError::IndexOutOfRange { depth: self.depth });
        }
        Ok(())
    }

    fn node_at(&self, level: usize, key: &SlotIndex) -> Result<Hash, TreeError> {
        Ok(self
            .store
            .get_node(level, key)?
            .unwrap_or_else(|| self.empty.at(level)))
    }

    fn store_node(&self, level: usize, key: SlotIndex, hash: Hash) -> Result<(), TreeError> {
        if hash == self.empty.at(level) {
            self.store.delete_node(level, &key)
        } else {
            self.store.put_node(level, key, hash)
        }
    }

    fn write_leaf(&mut self, index: SlotIndex, value: LeafValue) -> Result<Hash, TreeError> {
        self.check_index(&index)?;

        let mut current = self.hasher.hash_leaf(value.as_bytes());
        let mut key = index;
        self.store_node(0, key, current)?;

        for level in 0..self.depth {
            let sibling = self.node_at(level, &key.flip_bit(level))?;
            current = if key.bit(level) {
                self.hasher.hash_node(&sibling, &current)
            } else {
                self.hasher.hash_node(&current, &sibling)
            };
            key = key.clear_low_bits(level + 1);
            self.store_node(level + 1, key, current)?;
        }

        if value.is_empty() {
            self.leaves.remove(&index);
        } else {
            self.leaves.insert(index, value);
        }
        self.root = current;
        Ok(current)
    }

    fn build_witness(&self, index: &SlotIndex) -> Result<MembershipWitness, TreeError> {
        self.check_index(index)?;

        let mut siblings = Vec::with_capacity(self.depth);
        let mut path = Vec::with_capacity(self.depth);
        for level in 0..self.depth {
            let key = index.clear_low_bits(level);
            siblings.push(self.node_at(level, &key.flip_bit(level))?);
            path.push(index.bit(level));
        }
        MembershipWitness::new(siblings, path)
    }
}

impl<H: DomainHasher, S: NodeStore> CommitmentTree for SparseMerkleTree<H, S> {
    fn root(&self) -> Hash {
        self.root
    }

    fn get(&self, index: &SlotIndex) -> LeafValue {
        self.leaves.get(index).copied().unwrap_or(LeafValue::EMPTY)
    }

    fn set(&mut self, index: SlotIndex, value: LeafValue) -> Result<Hash, TreeError> {
        self.write_leaf(index, value)
    }

    fn witness(&self, index: &SlotIndex) -> Result<MembershipWitness, TreeError> {
        self.build_witness(index)
    }
}
