//! # Distribution Protocol
//!
//! Advances the epoch and installs a new salary root. Escrow of the batch
//! total is a ledger transfer performed by the service in the same
//! transaction.
//!
//! The new root is not checked against the previous one and the total is
//! not checked against the new leaves. Both are the payer's responsibility.

use super::{DistributionState, PayerAuthorization, PayrollConfig, PayrollError};
use shared_crypto::DomainHasher;
use shared_types::{Amount, Hash};

/// Check that `auth` lets the configured payer distribute `new_salary_root`
/// with `total_amount` on top of `state`.
///
/// Checked in order: signer is the payer, signature is valid, signature was
/// prepared against the current epoch.
pub fn authorize_distribution<H: DomainHasher + ?Sized>(
    hasher: &H,
    config: &PayrollConfig,
    state: &DistributionState,
    new_salary_root: &Hash,
    total_amount: Amount,
    auth: &PayerAuthorization,
) -> Result<(), PayrollError> {
    if auth.payer != config.payer {
        return Err(PayrollError::NotPayer);
    }

    let message =
        PayerAuthorization::message(hasher, auth.snapshot_epoch, new_salary_root, total_amount);
    auth.payer
        .verify(&message, &auth.signature)
        .map_err(|_| PayrollError::Unauthorized)?;

    if auth.snapshot_epoch != state.epoch {
        return Err(PayrollError::StaleAuthorization {
            signed: auth.snapshot_epoch,
            current: state.epoch,
        });
    }
    Ok(())
}

/// State after a distribution of `new_salary_root`.
pub fn apply_distribution(
    state: &DistributionState,
    new_salary_root: Hash,
) -> Result<DistributionState, PayrollError> {
    Ok(DistributionState {
        salary_root: new_salary_root,
        claimed_root: state.claimed_root,
        epoch: state.epoch.next()?,
    })
}
