use crate::domain::TreeError;
use shared_types::{Hash, SlotIndex};

/// Node storage abstraction.
///
/// A node is addressed by `(level, key)` where `key` is any slot index under
/// it with the low `level` bits cleared. Absent nodes read as the empty
/// subtree for their level.
pub trait NodeStore: Send + Sync {
    fn get_node(&self, level: usize, key: &SlotIndex) -> Result<Option<Hash>, TreeError>;
    fn put_node(&self, level: usize, key: SlotIndex, hash: Hash) -> Result<(), TreeError>;
    fn delete_node(&self, level: usize, key: &SlotIndex) -> Result<(), TreeError>;
    fn node_count(&self) -> Result<usize, TreeError>;
}
