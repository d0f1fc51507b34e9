//! Journal entries emitted after each committed transition.
//!
//! Only public data is carried: roots, epochs, totals and the paying-out
//! account. Identities, secrets and slot indices never appear.

use crate::domain::DistributionState;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount, Epoch, Hash};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PayrollEvent {
    Initialized(InitializedPayload),
    SalaryDistributed(SalaryDistributedPayload),
    SalaryClaimed(SalaryClaimedPayload),
}

impl PayrollEvent {
    /// Epoch in force after the event.
    pub fn epoch(&self) -> Epoch {
        match self {
            PayrollEvent::Initialized(p) => p.epoch,
            PayrollEvent::SalaryDistributed(p) => p.epoch,
            PayrollEvent::SalaryClaimed(p) => p.epoch,
        }
    }
}

/// Published once by `init`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializedPayload {
    #[serde(with = "hex")]
    pub empty_root: Hash,
    pub epoch: Epoch,
}

/// Published by every committed distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryDistributedPayload {
    pub epoch: Epoch,
    #[serde(with = "hex")]
    pub salary_root: Hash,
    #[serde(with = "hex")]
    pub previous_salary_root: Hash,
    pub total_amount: Amount,
    pub pool_balance: Amount,
}

/// Published by every committed claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryClaimedPayload {
    /// Epoch current when the claim committed.
    pub epoch: Epoch,
    #[serde(with = "hex")]
    pub claimed_root: Hash,
    pub amount: Amount,
    #[serde(with = "hex")]
    pub submitter: AccountId,
}

impl InitializedPayload {
    pub fn from_state(state: &DistributionState) -> Self {
        Self {
            empty_root: state.salary_root,
            epoch: state.epoch,
        }
    }
}
