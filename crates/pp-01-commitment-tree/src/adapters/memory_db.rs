use crate::domain::TreeError;
use crate::ports::NodeStore;
use parking_lot::RwLock;
use shared_types::{Hash, SlotIndex};
use std::collections::HashMap;

/// In-memory implementation of NodeStore
pub struct InMemoryNodeStore {
    nodes: RwLock<HashMap<(usize, SlotIndex), Hash>>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryNodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for InMemoryNodeStore {
    fn get_node(&self, level: usize, key: &SlotIndex) -> Result<Option<Hash>, TreeError> {
        Ok(self.nodes.read().get(&(level, *key)).copied())
    }

    fn put_node(&self, level: usize, key: SlotIndex, hash: Hash) -> Result<(), TreeError> {
        self.nodes.write().insert((level, key), hash);
        Ok(())
    }

    fn delete_node(&self, level: usize, key: &SlotIndex) -> Result<(), TreeError> {
        self.nodes.write().remove(&(level, *key));
        Ok(())
    }

    fn node_count(&self) -> Result<usize, TreeError> {
        Ok(self.nodes.read().len())
    }
}
