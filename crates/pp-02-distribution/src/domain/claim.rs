//! # Claim Protocol
//!
//! Pure verification of one claim against a state snapshot. The caller runs
//! it inside a ledger transaction on the state loaded there, so a witness
//! built against an older root fails with `ProofMismatch` at commit.
//!
//! ## Check Order
//!
//! 1. Derive the slot from the secret's public identity and the epoch.
//! 2. `epoch <= current` (`StaleEpoch`), then `amount > 0` (`ZeroAmount`).
//! 3. Salary witness opening `amount`: index, then root.
//! 4. Claimed witness opening `Unclaimed`: index, then root.
//! 5. New claimed root with the slot set to `Claimed` along the same path.

use super::{derive_index, ClaimRequest, DistributionState, PayrollError, TreeKind};
use pp_01_commitment_tree::{MembershipVerifier, MembershipWitness};
use shared_crypto::DomainHasher;
use shared_types::{Amount, ClaimFlag, Hash, LeafValue, SlotIndex};

/// A verified claim, ready to commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimTransition {
    /// State with the updated claimed root.
    pub next: DistributionState,
    /// Slot flipped to `Claimed`.
    pub slot: SlotIndex,
    pub payout: Amount,
}

/// Verify `request` against `state`.
pub fn verify_claim<V, H>(
    verifier: &V,
    hasher: &H,
    state: &DistributionState,
    request: &ClaimRequest,
) -> Result<ClaimTransition, PayrollError>
where
    V: MembershipVerifier + ?Sized,
    H: DomainHasher + ?Sized,
{
    let identity = request.identity_secret.public_identity();
    let slot = derive_index(hasher, &identity, request.epoch, verifier.depth());

    if request.epoch > state.epoch {
        return Err(PayrollError::StaleEpoch {
            requested: request.epoch,
            current: state.epoch,
        });
    }
    if request.amount == 0 {
        return Err(PayrollError::ZeroAmount);
    }

    open_at_slot(
        verifier,
        TreeKind::Salary,
        &request.salary_witness,
        LeafValue::from_amount(request.amount),
        slot,
        &state.salary_root,
    )?;
    open_at_slot(
        verifier,
        TreeKind::Claimed,
        &request.claimed_witness,
        ClaimFlag::Unclaimed.leaf_value(),
        slot,
        &state.claimed_root,
    )?;

    let claimed_root = verifier.update(&request.claimed_witness, ClaimFlag::Claimed.leaf_value())?;

    Ok(ClaimTransition {
        next: DistributionState {
            claimed_root,
            ..*state
        },
        slot,
        payout: request.amount,
    })
}

fn open_at_slot<V: MembershipVerifier + ?Sized>(
    verifier: &V,
    tree: TreeKind,
    witness: &MembershipWitness,
    leaf: LeafValue,
    slot: SlotIndex,
    root: &Hash,
) -> Result<(), PayrollError> {
    let opening = verifier.verify_membership(witness, leaf)?;
    if opening.index != slot {
        return Err(PayrollError::IndexMismatch {
            tree,
            expected: slot,
            actual: opening.index,
        });
    }
    if opening.root != *root {
        return Err(PayrollError::ProofMismatch { tree });
    }
    Ok(())
}
