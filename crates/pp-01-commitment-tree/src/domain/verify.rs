//! # Witness Verification
//!
//! Stateless root recomputation. Walks the witness leaf-to-root in a loop,
//! never recursing, so witness size is bounded by `MAX_TREE_DEPTH` only.

use super::{MembershipWitness, TreeError};
use shared_crypto::DomainHasher;
use shared_types::{Hash, LeafValue, SlotIndex};

/// Recompute the root implied by `witness` holding `leaf`, and the index the
/// witness points at.
pub fn compute_root_and_index<H: DomainHasher + ?Sized>(
    hasher: &H,
    witness: &MembershipWitness,
    leaf: &LeafValue,
) -> Result<(Hash, SlotIndex), TreeError> {
    witness.check_shape()?;

    let mut current = hasher.hash_leaf(leaf.as_bytes());
    let mut index = SlotIndex::ZERO;

    for (level, (sibling, right)) in witness.siblings.iter().zip(&witness.path).enumerate() {
        if *right {
            index = index.with_bit(level, true);
            current = hasher.hash_node(sibling, &current);
        } else {
            current = hasher.hash_node(&current, sibling);
        }
    }

    Ok((current, index))
}

/// Root after replacing the leaf at the witness position with `new_leaf`.
///
/// Only valid when `witness` was itself current for the old root; the
/// caller checks that first.
pub fn recompute_root<H: DomainHasher + ?Sized>(
    hasher: &H,
    witness: &MembershipWitness,
    new_leaf: &LeafValue,
) -> Result<Hash, TreeError> {
    compute_root_and_index(hasher, witness, new_leaf).map(|(root, _)| root)
}
