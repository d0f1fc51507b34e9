//! # Slot Index Derivation
//!
//! `slot = H(SlotIndex, identity || epoch_be)`, truncated to the tree depth.
//!
//! The epoch is in the preimage, so one identity lands on a different slot in
//! every distribution and a witness from one round cannot be replayed in
//! another.

use shared_crypto::{DomainHasher, HashDomain, PublicIdentity};
use shared_types::{Epoch, SlotIndex};

/// Map `(identity, epoch)` to its coordinate in both commitment trees.
pub fn derive_index<H: DomainHasher + ?Sized>(
    hasher: &H,
    identity: &PublicIdentity,
    epoch: Epoch,
    depth: usize,
) -> SlotIndex {
    let digest = hasher.hash(
        HashDomain::SlotIndex,
        &[identity.as_bytes().as_slice(), epoch.to_be_bytes().as_slice()],
    );
    SlotIndex::from_hash(digest).truncate(depth)
}
