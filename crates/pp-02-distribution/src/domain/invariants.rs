//! # Domain Invariants
//!
//! Checked by the service on every transition before it is committed. A
//! violation means a bug in this crate, never bad caller input.

use super::{DistributionState, PayrollError};
use std::fmt;

/// Kind of state transition being checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Distribution,
    Claim,
}

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Epoch moves by exactly one on distribution and not at all on claim.
#[must_use]
pub fn check_epoch_step(
    kind: TransitionKind,
    before: &DistributionState,
    after: &DistributionState,
) -> bool {
    match kind {
        TransitionKind::Distribution => before.epoch.0.checked_add(1) == Some(after.epoch.0),
        TransitionKind::Claim => before.epoch == after.epoch,
    }
}

/// Claims never touch the salary root.
#[must_use]
pub fn check_salary_root_untouched(
    kind: TransitionKind,
    before: &DistributionState,
    after: &DistributionState,
) -> bool {
    kind != TransitionKind::Claim || before.salary_root == after.salary_root
}

/// Distributions leave the claimed root alone; claims must move it.
#[must_use]
pub fn check_claimed_root_step(
    kind: TransitionKind,
    before: &DistributionState,
    after: &DistributionState,
) -> bool {
    match kind {
        TransitionKind::Distribution => before.claimed_root == after.claimed_root,
        TransitionKind::Claim => before.claimed_root != after.claimed_root,
    }
}

/// Collect every violated invariant for one transition.
#[must_use]
pub fn collect_violations(
    kind: TransitionKind,
    before: &DistributionState,
    after: &DistributionState,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !check_epoch_step(kind, before, after) {
        violations.push(InvariantViolation::EpochStep {
            kind,
            before: before.epoch.0,
            after: after.epoch.0,
        });
    }

    if !check_salary_root_untouched(kind, before, after) {
        violations.push(InvariantViolation::SalaryRootChangedByClaim);
    }

    if !check_claimed_root_step(kind, before, after) {
        violations.push(InvariantViolation::ClaimedRootStep { kind });
    }

    violations
}

/// `Ok` when every invariant holds, else `InvariantViolated` naming them.
pub fn check_transition(
    kind: TransitionKind,
    before: &DistributionState,
    after: &DistributionState,
) -> Result<(), PayrollError> {
    let violations = collect_violations(kind, before, after);
    if violations.is_empty() {
        return Ok(());
    }
    let joined = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(PayrollError::InvariantViolated(joined))
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    EpochStep {
        kind: TransitionKind,
        before: u64,
        after: u64,
    },
    SalaryRootChangedByClaim,
    ClaimedRootStep {
        kind: TransitionKind,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EpochStep {
                kind,
                before,
                after,
            } => write!(f, "{kind:?} moved epoch {before} -> {after}"),
            Self::SalaryRootChangedByClaim => write!(f, "claim changed the salary root"),
            Self::ClaimedRootStep { kind } => {
                write!(f, "{kind:?} broke the claimed-root rule")
            }
        }
    }
}
