//! # Scenario Runner
//!
//! Replays a `Scenario` against a `PayrollService` over a fresh in-memory
//! ledger. The runner plays every off-ledger role: it keeps the payer's
//! `PayrollBook`, signs authorizations and builds claim witnesses.

use crate::errors::RuntimeError;
use crate::scenario::{Expectation, Scenario, Step};
use pp_01_commitment_tree::HashPathVerifier;
use pp_02_distribution::{
    Account, ClaimRequest, InMemoryLedger, Ledger, PayerAuthorization, PayrollApi, PayrollBook,
    PayrollConfig, PayrollError, PayrollEvent, PayrollService, SalaryEntry,
};
use serde::Serialize;
use shared_crypto::{DomainHasher, IdentitySecret};
use shared_types::{AccountId, Amount, Epoch};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{info, warn};

type InMemoryService<H> = PayrollService<InMemoryLedger, HashPathVerifier<H>, H>;

/// Result of one replayed step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub description: String,
    pub outcome: String,
}

/// Final state after a replay.
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub hasher: &'static str,
    pub depth: usize,
    pub steps: Vec<StepOutcome>,
    pub epoch: u64,
    pub salary_root: String,
    pub claimed_root: String,
    pub pool_balance: Amount,
    /// Ledger balance of the payer and every participant, by name.
    pub balances: BTreeMap<String, Amount>,
    #[serde(skip)]
    pub events: Vec<PayrollEvent>,
}

pub struct ScenarioRunner<H: DomainHasher> {
    service: InMemoryService<H>,
    book: PayrollBook<H>,
    payer: IdentitySecret,
    participants: BTreeMap<String, IdentitySecret>,
    submitted: HashMap<(String, Epoch), ClaimRequest>,
}

impl<H: DomainHasher> ScenarioRunner<H> {
    /// Fund the payer and initialize the protocol state.
    pub fn new(hasher: Arc<H>, depth: usize, scenario: &Scenario) -> Result<Self, RuntimeError> {
        let payer = IdentitySecret::from_hex(&scenario.payer_seed)?;
        let config = PayrollConfig::new(payer.public_identity()).with_depth(depth);
        let service = PayrollService::in_memory(config, hasher.clone())?;
        let book = PayrollBook::new(hasher, &service.config().tree)?;

        let mut participants = BTreeMap::new();
        for participant in &scenario.participants {
            let secret = IdentitySecret::from_hex(&participant.seed)?;
            if participants
                .insert(participant.name.clone(), secret)
                .is_some()
            {
                return Err(RuntimeError::InvalidScenario(format!(
                    "participant '{}' listed twice",
                    participant.name
                )));
            }
        }

        service
            .ledger()
            .credit(service.payer_account(), scenario.payer_funds)?;
        service.init()?;

        Ok(Self {
            service,
            book,
            payer,
            participants,
            submitted: HashMap::new(),
        })
    }

    pub fn service(&self) -> &InMemoryService<H> {
        &self.service
    }

    fn participant(&self, name: &str) -> Result<&IdentitySecret, RuntimeError> {
        self.participants
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownParticipant(name.to_string()))
    }

    /// Replay every step, stopping at the first outcome that differs from
    /// its expectation.
    pub fn run(mut self, scenario: &Scenario) -> Result<ScenarioReport, RuntimeError> {
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            let outcome = self.run_step(index, step)?;
            info!(step = index, outcome = %outcome.outcome, "{}", outcome.description);
            steps.push(outcome);
        }
        self.report(steps)
    }

    fn run_step(&mut self, index: usize, step: &Step) -> Result<StepOutcome, RuntimeError> {
        match step {
            Step::Distribute { salaries, expect } => {
                let mut entries = Vec::with_capacity(salaries.len());
                for line in salaries {
                    entries.push(SalaryEntry {
                        identity: self.participant(&line.recipient)?.public_identity(),
                        amount: line.amount,
                    });
                }
                let snapshot = self.service.state()?.epoch;
                let epoch = snapshot.next().map_err(PayrollError::from)?;
                let batch = match self.book.commit_batch(epoch, &entries) {
                    Ok(batch) => batch,
                    // Nothing was written to the book or the ledger
                    Err(e) => {
                        let description = format!(
                            "build {} salaries for epoch {epoch}",
                            entries.len()
                        );
                        return check(index, *expect, description, &Err::<(), _>(e));
                    }
                };
                let auth = PayerAuthorization::sign(
                    self.service.hasher().as_ref(),
                    &self.payer,
                    snapshot,
                    &batch.root,
                    batch.total,
                );

                let result = self.service.distribute(batch.root, batch.total, &auth);
                if result.is_err() {
                    self.book.discard_batch(epoch, &entries)?;
                }
                let description = format!(
                    "distribute {} salaries totalling {} for epoch {epoch}",
                    entries.len(),
                    batch.total
                );
                check(index, *expect, description, &result)
            }
            Step::Claim {
                recipient,
                epoch,
                submitter,
                amount,
                reuse_witnesses,
                expect,
            } => {
                let epoch = Epoch(*epoch);
                let secret = self.participant(recipient)?.clone();
                let submitter_account = self
                    .participant(submitter)?
                    .public_identity()
                    .account_id();
                let key = (recipient.clone(), epoch);

                let mut request = if *reuse_witnesses {
                    self.submitted.get(&key).cloned().ok_or_else(|| {
                        RuntimeError::InvalidScenario(format!(
                            "step {index}: no earlier claim by '{recipient}' for epoch {epoch}"
                        ))
                    })?
                } else {
                    let committed = self.book.salary_of(&secret.public_identity(), epoch);
                    self.book
                        .claim_request_for(&secret, epoch, committed.unwrap_or(0))?
                };
                if let Some(amount) = amount {
                    request.amount = *amount;
                }

                let result = self.service.claim(submitter_account, &request);
                if result.is_ok() {
                    self.book.record_claim(&secret.public_identity(), epoch)?;
                }
                self.submitted.insert(key, request);

                let description =
                    format!("claim by '{recipient}' for epoch {epoch} via '{submitter}'");
                check(index, *expect, description, &result)
            }
        }
    }

    fn report(self, steps: Vec<StepOutcome>) -> Result<ScenarioReport, RuntimeError> {
        let state = self.service.state()?;
        let ledger = self.service.ledger();

        let mut balances = BTreeMap::new();
        balances.insert(
            "payer".to_string(),
            ledger.balance(&self.service.payer_account()),
        );
        for (name, secret) in &self.participants {
            let account = Account::Holder(secret.public_identity().account_id());
            balances.insert(name.clone(), ledger.balance(&account));
        }

        Ok(ScenarioReport {
            hasher: self.service.hasher().name(),
            depth: self.service.config().tree.depth,
            steps,
            epoch: state.epoch.0,
            salary_root: hex::encode(state.salary_root),
            claimed_root: hex::encode(state.claimed_root),
            pool_balance: self.service.pool_balance(),
            balances,
            events: self.service.events(),
        })
    }
}

impl ScenarioReport {
    /// Ledger balance of `name` at the end of the run.
    pub fn balance_of(&self, name: &str) -> Amount {
        self.balances.get(name).copied().unwrap_or(0)
    }
}

fn check<T>(
    step: usize,
    expect: Expectation,
    description: String,
    result: &Result<T, PayrollError>,
) -> Result<StepOutcome, RuntimeError> {
    let outcome = match result {
        Ok(_) => "ok".to_string(),
        Err(e) => e.to_string(),
    };
    if !expect.matches(result) {
        warn!(step, expected = ?expect, %outcome, "Unexpected outcome");
        return Err(RuntimeError::UnexpectedOutcome {
            step,
            expected: format!("{expect:?}"),
            actual: outcome,
        });
    }
    Ok(StepOutcome {
        step,
        description,
        outcome,
    })
}

/// Submitting account for a named participant, for callers holding only the
/// scenario.
pub fn participant_account(scenario: &Scenario, name: &str) -> Result<AccountId, RuntimeError> {
    let participant = scenario
        .participants
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| RuntimeError::UnknownParticipant(name.to_string()))?;
    Ok(IdentitySecret::from_hex(&participant.seed)?
        .public_identity()
        .account_id())
}
