use crate::domain::{MembershipOpening, MembershipWitness, TreeError};
use shared_types::{Hash, LeafValue, SlotIndex};

/// Membership verification capability consumed by the payroll protocol.
///
/// This is the boundary to the proving/verification engine: an
/// implementation may check the path in the clear (`HashPathVerifier`) or
/// verify a zero-knowledge statement asserting the same predicates.
pub trait MembershipVerifier: Send + Sync {
    /// Depth every accepted witness must have.
    fn depth(&self) -> usize;

    /// Root of a tree in which no slot was written.
    fn empty_root(&self) -> Hash;

    /// Recompute `(root, index)` for `witness` holding `leaf`.
    fn verify_membership(
        &self,
        witness: &MembershipWitness,
        leaf: LeafValue,
    ) -> Result<MembershipOpening, TreeError>;

    /// Root after writing `leaf` at the witness position.
    fn update(&self, witness: &MembershipWitness, leaf: LeafValue) -> Result<Hash, TreeError>;
}

/// Writable commitment tree held by a caller off-ledger.
pub trait CommitmentTree {
    fn root(&self) -> Hash;
    fn get(&self, index: &SlotIndex) -> LeafValue;
    fn set(&mut self, index: SlotIndex, value: LeafValue) -> Result<Hash, TreeError>;
    fn witness(&self, index: &SlotIndex) -> Result<MembershipWitness, TreeError>;
}
