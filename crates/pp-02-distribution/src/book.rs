//! # Payroll Book
//!
//! Caller-side record keeping. The protocol stores roots only, so whoever
//! submits a distribution or a claim must hold the trees that produced those
//! roots. `PayrollBook` keeps the payer's cumulative salary tree and a mirror
//! of the claimed tree rebuilt from the caller's own records.
//!
//! Nothing here is consulted by the service; it only builds inputs for it.

use crate::domain::{derive_index, ClaimRequest, PayrollError};
use pp_01_commitment_tree::{CommitmentTree, SparseMerkleTree, TreeConfig};
use serde::{Deserialize, Serialize};
use shared_crypto::{DomainHasher, IdentitySecret, PublicIdentity};
use shared_types::{Amount, ClaimFlag, Epoch, Hash, LeafValue, SlotIndex};
use std::collections::BTreeSet;
use std::sync::Arc;

/// One recipient's salary in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryEntry {
    pub identity: PublicIdentity,
    pub amount: Amount,
}

/// Result of adding a batch to the salary tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBatch {
    /// Epoch the batch is committed under.
    pub epoch: Epoch,
    /// Salary root to distribute.
    pub root: Hash,
    /// Sum of the batch amounts, to escrow.
    pub total: Amount,
    pub entries: usize,
}

/// Off-ledger salary tree plus claimed-tree mirror.
pub struct PayrollBook<H: DomainHasher> {
    hasher: Arc<H>,
    depth: usize,
    salary: SparseMerkleTree<H>,
    claimed: SparseMerkleTree<H>,
    epochs: BTreeSet<Epoch>,
}

impl<H: DomainHasher> PayrollBook<H> {
    pub fn new(hasher: Arc<H>, config: &TreeConfig) -> Result<Self, PayrollError> {
        let depth = config.validate()?;
        Ok(Self {
            salary: SparseMerkleTree::new(hasher.clone(), config)?,
            claimed: SparseMerkleTree::new(hasher.clone(), config)?,
            hasher,
            depth,
            epochs: BTreeSet::new(),
        })
    }

    pub fn salary_root(&self) -> Hash {
        self.salary.root()
    }

    pub fn claimed_root(&self) -> Hash {
        self.claimed.root()
    }

    fn slot(&self, identity: &PublicIdentity, epoch: Epoch) -> SlotIndex {
        derive_index(self.hasher.as_ref(), identity, epoch, self.depth)
    }

    /// Add `entries` under `epoch` (the epoch the next distribution creates).
    ///
    /// Earlier entries stay in the tree, so unclaimed salaries from previous
    /// rounds remain claimable under the new root. The batch is validated in
    /// full before anything is written.
    pub fn commit_batch(
        &mut self,
        epoch: Epoch,
        entries: &[SalaryEntry],
    ) -> Result<SalaryBatch, PayrollError> {
        let mut slots = BTreeSet::new();
        let mut total: Amount = 0;
        let mut writes = Vec::with_capacity(entries.len());

        for entry in entries {
            if entry.amount == 0 {
                return Err(PayrollError::ZeroAmount);
            }
            let slot = self.slot(&entry.identity, epoch);
            if !slots.insert(slot) || !self.salary.get(&slot).is_empty() {
                return Err(PayrollError::DuplicateSlot(slot));
            }
            total = total
                .checked_add(entry.amount)
                .ok_or(PayrollError::BalanceOverflow)?;
            writes.push((slot, LeafValue::from_amount(entry.amount)));
        }

        for (slot, value) in writes {
            self.salary.set(slot, value)?;
        }
        self.epochs.insert(epoch);

        Ok(SalaryBatch {
            epoch,
            root: self.salary.root(),
            total,
            entries: entries.len(),
        })
    }

    /// Committed salary for `identity` at `epoch`, if any.
    pub fn salary_of(&self, identity: &PublicIdentity, epoch: Epoch) -> Option<Amount> {
        let value = self.salary.get(&self.slot(identity, epoch));
        if value.is_empty() {
            return None;
        }
        value.as_amount()
    }

    pub fn is_claimed(&self, identity: &PublicIdentity, epoch: Epoch) -> bool {
        let value = self.claimed.get(&self.slot(identity, epoch));
        ClaimFlag::from_leaf(value) == Some(ClaimFlag::Claimed)
    }

    /// Undo `commit_batch` for a distribution that did not commit.
    pub fn discard_batch(
        &mut self,
        epoch: Epoch,
        entries: &[SalaryEntry],
    ) -> Result<Hash, PayrollError> {
        for entry in entries {
            let slot = self.slot(&entry.identity, epoch);
            self.salary.set(slot, LeafValue::EMPTY)?;
        }
        self.epochs.remove(&epoch);
        Ok(self.salary.root())
    }

    /// Build a claim for the holder of `secret` with witnesses against the
    /// current book roots.
    pub fn claim_request(
        &self,
        secret: &IdentitySecret,
        epoch: Epoch,
    ) -> Result<ClaimRequest, PayrollError> {
        let amount = self
            .salary_of(&secret.public_identity(), epoch)
            .ok_or(PayrollError::NoEntry { epoch })?;
        self.claim_request_for(secret, epoch, amount)
    }

    /// Build a claim asserting `amount`, whatever the book holds.
    pub fn claim_request_for(
        &self,
        secret: &IdentitySecret,
        epoch: Epoch,
        amount: Amount,
    ) -> Result<ClaimRequest, PayrollError> {
        let slot = self.slot(&secret.public_identity(), epoch);
        Ok(ClaimRequest {
            identity_secret: secret.clone(),
            amount,
            epoch,
            salary_witness: self.salary.witness(&slot)?,
            claimed_witness: self.claimed.witness(&slot)?,
        })
    }

    /// Mirror a committed claim; returns the new claimed root.
    pub fn record_claim(
        &mut self,
        identity: &PublicIdentity,
        epoch: Epoch,
    ) -> Result<Hash, PayrollError> {
        let slot = self.slot(identity, epoch);
        Ok(self.claimed.set(slot, ClaimFlag::Claimed.leaf_value())?)
    }

    /// Epochs a batch was committed under.
    pub fn epochs(&self) -> impl Iterator<Item = &Epoch> {
        self.epochs.iter()
    }
}
