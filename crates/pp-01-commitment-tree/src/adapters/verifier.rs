//! Clear-text membership verifier.

use crate::domain::{
    compute_root_and_index, recompute_root, EmptySubtrees, MembershipOpening, MembershipWitness,
    TreeConfig, TreeError,
};
use crate::ports::MembershipVerifier;
use shared_crypto::DomainHasher;
use shared_types::{Hash, LeafValue};
use std::sync::Arc;

/// Verifies witnesses by recomputing the sibling path with the injected
/// hasher. Rejects witnesses whose depth differs from the configured one.
pub struct HashPathVerifier<H: DomainHasher> {
    hasher: Arc<H>,
    depth: usize,
    empty_root: Hash,
}

impl<H: DomainHasher> HashPathVerifier<H> {
    pub fn new(hasher: Arc<H>, config: &TreeConfig) -> Result<Self, TreeError> {
        let depth = config.validate()?;
        let empty_root = EmptySubtrees::new(hasher.as_ref(), depth).root();
        Ok(Self {
            hasher,
            depth,
            empty_root,
        })
    }

    fn check_depth(&self, witness: &MembershipWitness) -> Result<(), TreeError> {
        if witness.depth() != self.depth {
            return Err(TreeError::WitnessLength {
                expected: self.depth,
                actual: witness.depth(),
            });
        }
        Ok(())
    }
}

impl<H: DomainHasher> MembershipVerifier for HashPathVerifier<H> {
    fn depth(&self) -> usize {
        self.depth
    }

    fn empty_root(&self) -> Hash {
        self.empty_root
    }

    fn verify_membership(
        &self,
        witness: &MembershipWitness,
        leaf: LeafValue,
    ) -> Result<MembershipOpening, TreeError> {
        self.check_depth(witness)?;
        let (root, index) = compute_root_and_index(self.hasher.as_ref(), witness, &leaf)?;
        Ok(MembershipOpening { root, index })
    }

    fn update(&self, witness: &MembershipWitness, leaf: LeafValue) -> Result<Hash, TreeError> {
        self.check_depth(witness)?;
        recompute_root(self.hasher.as_ref(), witness, &leaf)
    }
}
