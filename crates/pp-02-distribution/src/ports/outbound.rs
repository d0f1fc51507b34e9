use crate::domain::{DistributionState, PayrollError};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount};

/// Balance holder on the settlement ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Account {
    /// Escrow funded by distributions and drained by claims.
    Pool,
    /// Any external account: the payer, a recipient or a relay.
    Holder(AccountId),
}

/// Transactional view handed to `Ledger::execute`.
///
/// Writes are visible to later reads in the same transaction and reach the
/// committed ledger only if the closure returns `Ok`.
pub trait LedgerTx {
    /// Persisted protocol state; `None` before `init`.
    fn load_state(&self) -> Result<Option<DistributionState>, PayrollError>;
    fn store_state(&mut self, state: &DistributionState) -> Result<(), PayrollError>;
    fn balance(&self, account: &Account) -> Amount;
    /// Move funds, failing with `InsufficientFunds` if `from` cannot cover it.
    fn transfer(&mut self, from: &Account, to: &Account, amount: Amount)
        -> Result<(), PayrollError>;
}

/// Settlement ledger: the sole serialization point for protocol state.
///
/// Transactions commit one at a time in a total order. A transaction that
/// returns an error leaves no trace.
pub trait Ledger: Send + Sync {
    fn balance(&self, account: &Account) -> Amount;

    /// Committed protocol state, read outside any transaction.
    fn read_state(&self) -> Result<Option<DistributionState>, PayrollError>;

    /// Run `f` against a transactional view and commit its writes on `Ok`.
    fn execute<T, F>(&self, f: F) -> Result<T, PayrollError>
    where
        F: FnOnce(&mut dyn LedgerTx) -> Result<T, PayrollError>;
}
