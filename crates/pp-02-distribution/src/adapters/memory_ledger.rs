use crate::domain::{DistributionState, PayrollError};
use crate::ports::{Account, Ledger, LedgerTx};
use parking_lot::Mutex;
use shared_types::Amount;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Default)]
struct LedgerBook {
    balances: HashMap<Account, Amount>,
    state: Option<Vec<u8>>,
}

impl LedgerTx for LedgerBook {
    fn load_state(&self) -> Result<Option<DistributionState>, PayrollError> {
        self.state
            .as_deref()
            .map(DistributionState::decode)
            .transpose()
    }

    fn store_state(&mut self, state: &DistributionState) -> Result<(), PayrollError> {
        self.state = Some(state.encode()?);
        Ok(())
    }

    fn balance(&self, account: &Account) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<(), PayrollError> {
        let available = self.balance(from);
        if available < amount {
            return Err(PayrollError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(PayrollError::BalanceOverflow)?;
        self.balances.insert(*from, available - amount);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

/// In-memory settlement ledger.
///
/// A transaction runs on a copy of the committed book while holding the
/// commit lock; the copy replaces the book only when the closure succeeds.
pub struct InMemoryLedger {
    book: Mutex<LedgerBook>,
    committed: AtomicU64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            book: Mutex::new(LedgerBook::default()),
            committed: AtomicU64::new(0),
        }
    }

    /// Mint `amount` into `account` (funding outside the protocol).
    pub fn credit(&self, account: Account, amount: Amount) -> Result<Amount, PayrollError> {
        let mut book = self.book.lock();
        let updated = book
            .balance(&account)
            .checked_add(amount)
            .ok_or(PayrollError::BalanceOverflow)?;
        book.balances.insert(account, updated);
        Ok(updated)
    }

    /// Number of transactions committed so far.
    pub fn committed_transactions(&self) -> u64 {
        self.committed.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, account: &Account) -> Amount {
        self.book.lock().balance(account)
    }

    fn read_state(&self) -> Result<Option<DistributionState>, PayrollError> {
        self.book.lock().load_state()
    }

    fn execute<T, F>(&self, f: F) -> Result<T, PayrollError>
    where
        F: FnOnce(&mut dyn LedgerTx) -> Result<T, PayrollError>,
    {
        let mut committed = self.book.lock();
        let mut working = committed.clone();
        let output = f(&mut working)?;
        *committed = working;
        self.committed.fetch_add(1, Ordering::Relaxed);
        Ok(output)
    }
}
