//! # Payroll Service
//!
//! Wires the protocol to a ledger and a membership verifier.
//!
//! Every operation loads state *inside* the ledger transaction, so checks
//! always run against the state the transaction commits on top of. A claim
//! prepared against an older claimed root fails with `ProofMismatch` and the
//! caller retries with a witness rebuilt against the new root.

use crate::adapters::InMemoryLedger;
use crate::domain::{
    apply_distribution, authorize_distribution, check_transition, verify_claim, ClaimReceipt,
    ClaimRequest, ClaimTransition, DistributionReceipt, DistributionState, PayerAuthorization,
    PayrollConfig, PayrollError, TransitionKind,
};
use crate::events::{
    InitializedPayload, PayrollEvent, SalaryClaimedPayload, SalaryDistributedPayload,
};
use crate::ports::{Account, Ledger, PayrollApi};
use parking_lot::RwLock;
use pp_01_commitment_tree::{HashPathVerifier, MembershipVerifier};
use shared_crypto::DomainHasher;
use shared_types::{AccountId, Amount, Hash};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Counters kept by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Committed distributions.
    pub distributions: u64,
    /// Committed claims.
    pub claims_paid: u64,
    /// Operations rejected for any reason.
    pub rejected: u64,
    /// Rejections a rebuilt witness or fresh authorization could fix.
    pub stale_rejections: u64,
    /// Sum of escrowed totals.
    pub total_escrowed: u128,
    /// Sum of payouts.
    pub total_paid_out: u128,
}

/// The payroll distribution service.
pub struct PayrollService<L: Ledger, V: MembershipVerifier, H: DomainHasher> {
    config: PayrollConfig,
    ledger: Arc<L>,
    verifier: Arc<V>,
    hasher: Arc<H>,
    journal: RwLock<Vec<PayrollEvent>>,
    stats: RwLock<ServiceStats>,
}

impl<H: DomainHasher> PayrollService<InMemoryLedger, HashPathVerifier<H>, H> {
    /// Service over a fresh in-memory ledger and a clear-text verifier.
    pub fn in_memory(config: PayrollConfig, hasher: Arc<H>) -> Result<Self, PayrollError> {
        let verifier = HashPathVerifier::new(hasher.clone(), &config.tree)?;
        Self::new(
            config,
            Arc::new(InMemoryLedger::new()),
            Arc::new(verifier),
            hasher,
        )
    }
}

impl<L: Ledger, V: MembershipVerifier, H: DomainHasher> PayrollService<L, V, H> {
    pub fn new(
        config: PayrollConfig,
        ledger: Arc<L>,
        verifier: Arc<V>,
        hasher: Arc<H>,
    ) -> Result<Self, PayrollError> {
        config.validate()?;
        if verifier.depth() != config.tree.depth {
            return Err(PayrollError::InvalidConfig(format!(
                "verifier depth {} does not match tree depth {}",
                verifier.depth(),
                config.tree.depth
            )));
        }
        info!(
            depth = config.tree.depth,
            hasher = hasher.name(),
            payer = %config.payer.account_id().short(),
            "Payroll service created"
        );
        Ok(Self {
            config,
            ledger,
            verifier,
            hasher,
            journal: RwLock::new(Vec::new()),
            stats: RwLock::new(ServiceStats::default()),
        })
    }

    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    pub fn hasher(&self) -> &Arc<H> {
        &self.hasher
    }

    /// Ledger account the payer escrows from.
    pub fn payer_account(&self) -> Account {
        Account::Holder(self.config.payer.account_id())
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// Events in commit order.
    pub fn events(&self) -> Vec<PayrollEvent> {
        self.journal.read().clone()
    }

    /// Run every claim check against the committed state without writing.
    ///
    /// Passing is no guarantee: `claim` re-runs the checks at commit.
    pub fn preflight_claim(&self, request: &ClaimRequest) -> Result<ClaimTransition, PayrollError> {
        let state = self.state()?;
        verify_claim(self.verifier.as_ref(), self.hasher.as_ref(), &state, request)
    }

    fn record_rejection(&self, operation: &'static str, error: &PayrollError) {
        let mut stats = self.stats.write();
        stats.rejected += 1;
        if error.is_stale_state() {
            stats.stale_rejections += 1;
        }
        warn!(operation, error = %error, "Operation rejected");
    }

    fn publish(&self, event: PayrollEvent) {
        debug!(?event, "Publishing event");
        self.journal.write().push(event);
    }
}

impl<L: Ledger, V: MembershipVerifier, H: DomainHasher> PayrollApi for PayrollService<L, V, H> {
    #[instrument(skip(self))]
    fn init(&self) -> Result<DistributionState, PayrollError> {
        let genesis = DistributionState::genesis(self.verifier.empty_root());
        let result = self.ledger.execute(|tx| {
            if tx.load_state()?.is_some() {
                return Err(PayrollError::AlreadyInitialized);
            }
            tx.store_state(&genesis)?;
            Ok(genesis)
        });

        match result {
            Ok(state) => {
                info!(
                    empty_root = %hex::encode(state.salary_root),
                    "Distribution state initialized"
                );
                self.publish(PayrollEvent::Initialized(InitializedPayload::from_state(
                    &state,
                )));
                Ok(state)
            }
            Err(e) => {
                self.record_rejection("init", &e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self, new_salary_root, auth), fields(snapshot_epoch = %auth.snapshot_epoch))]
    fn distribute(
        &self,
        new_salary_root: Hash,
        total_amount: Amount,
        auth: &PayerAuthorization,
    ) -> Result<DistributionReceipt, PayrollError> {
        let payer_account = self.payer_account();
        let result = self.ledger.execute(|tx| {
            let before = tx.load_state()?.ok_or(PayrollError::NotInitialized)?;
            authorize_distribution(
                self.hasher.as_ref(),
                &self.config,
                &before,
                &new_salary_root,
                total_amount,
                auth,
            )?;
            let after = apply_distribution(&before, new_salary_root)?;
            check_transition(TransitionKind::Distribution, &before, &after)?;

            tx.transfer(&payer_account, &Account::Pool, total_amount)?;
            tx.store_state(&after)?;
            Ok((before, after, tx.balance(&Account::Pool)))
        });

        match result {
            Ok((before, after, pool_balance)) => {
                {
                    let mut stats = self.stats.write();
                    stats.distributions += 1;
                    stats.total_escrowed += u128::from(total_amount);
                }
                info!(
                    epoch = %after.epoch,
                    salary_root = %hex::encode(after.salary_root),
                    pool_balance,
                    "Salary distributed"
                );
                self.publish(PayrollEvent::SalaryDistributed(SalaryDistributedPayload {
                    epoch: after.epoch,
                    salary_root: after.salary_root,
                    previous_salary_root: before.salary_root,
                    total_amount,
                    pool_balance,
                }));
                Ok(DistributionReceipt {
                    state: after,
                    total_amount,
                    pool_balance,
                })
            }
            Err(e) => {
                self.record_rejection("distribute", &e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self, request), fields(submitter = %submitter.short(), epoch = %request.epoch))]
    fn claim(
        &self,
        submitter: AccountId,
        request: &ClaimRequest,
    ) -> Result<ClaimReceipt, PayrollError> {
        let result = self.ledger.execute(|tx| {
            let before = tx.load_state()?.ok_or(PayrollError::NotInitialized)?;
            let transition =
                verify_claim(self.verifier.as_ref(), self.hasher.as_ref(), &before, request)?;
            check_transition(TransitionKind::Claim, &before, &transition.next)?;

            tx.transfer(
                &Account::Pool,
                &Account::Holder(submitter),
                transition.payout,
            )?;
            tx.store_state(&transition.next)?;
            Ok(transition)
        });

        match result {
            Ok(transition) => {
                {
                    let mut stats = self.stats.write();
                    stats.claims_paid += 1;
                    stats.total_paid_out += u128::from(transition.payout);
                }
                info!(
                    claimed_root = %hex::encode(transition.next.claimed_root),
                    "Salary claimed"
                );
                self.publish(PayrollEvent::SalaryClaimed(SalaryClaimedPayload {
                    epoch: transition.next.epoch,
                    claimed_root: transition.next.claimed_root,
                    amount: transition.payout,
                    submitter,
                }));
                Ok(ClaimReceipt {
                    state: transition.next,
                    payout: transition.payout,
                    recipient_account: submitter,
                })
            }
            Err(e) => {
                self.record_rejection("claim", &e);
                Err(e)
            }
        }
    }

    fn state(&self) -> Result<DistributionState, PayrollError> {
        self.ledger.read_state()?.ok_or(PayrollError::NotInitialized)
    }

    fn pool_balance(&self) -> Amount {
        self.ledger.balance(&Account::Pool)
    }
}
