//! # Scenario Format
//!
//! A scenario names its participants by seed and lists the operations to
//! replay in order:
//!
//! ```json
//! {
//!   "payer_seed": "aa…aa",
//!   "payer_funds": 21,
//!   "participants": [{ "name": "alice", "seed": "01…01" }],
//!   "steps": [
//!     { "op": "distribute", "salaries": [{ "recipient": "alice", "amount": 1 }] },
//!     { "op": "claim", "recipient": "alice", "epoch": 1, "submitter": "alice" }
//!   ]
//! }
//! ```
//!
//! Seeds are 32-byte hex strings. A step's `expect` defaults to `success`.
//! Batches the payer refuses to build (zero amounts, a recipient listed
//! twice, totals past `u64`) are outcomes like ledger rejections and can be
//! expected.

use pp_02_distribution::PayrollError;
use serde::{Deserialize, Serialize};
use shared_types::Amount;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub payer_seed: String,
    /// Balance credited to the payer before the first step.
    pub payer_funds: Amount,
    pub participants: Vec<Participant>,
    pub steps: Vec<Step>,
}

/// Recipient or relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub seed: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryLine {
    pub recipient: String,
    pub amount: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Commit a salary batch for the next epoch and distribute its root.
    Distribute {
        salaries: Vec<SalaryLine>,
        #[serde(default)]
        expect: Expectation,
    },
    /// Claim `recipient`'s salary for `epoch`, submitted by `submitter`.
    Claim {
        recipient: String,
        epoch: u64,
        submitter: String,
        /// Override the committed amount.
        #[serde(default)]
        amount: Option<Amount>,
        /// Resubmit the witnesses of this recipient's previous claim for the
        /// same epoch instead of rebuilding them.
        #[serde(default)]
        reuse_witnesses: bool,
        #[serde(default)]
        expect: Expectation,
    },
}

/// Expected result of a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    #[default]
    Success,
    StaleEpoch,
    ProofMismatch,
    IndexMismatch,
    InsufficientFunds,
    ZeroAmount,
    /// Two salary lines land on the same slot.
    DuplicateSlot,
    BalanceOverflow,
}

impl Expectation {
    /// Whether `result` is what this expectation describes.
    pub fn matches<T>(self, result: &Result<T, PayrollError>) -> bool {
        match (self, result) {
            (Expectation::Success, Ok(_)) => true,
            (Expectation::StaleEpoch, Err(PayrollError::StaleEpoch { .. })) => true,
            (Expectation::ProofMismatch, Err(PayrollError::ProofMismatch { .. })) => true,
            (Expectation::IndexMismatch, Err(PayrollError::IndexMismatch { .. })) => true,
            (Expectation::InsufficientFunds, Err(PayrollError::InsufficientFunds { .. })) => true,
            (Expectation::ZeroAmount, Err(PayrollError::ZeroAmount)) => true,
            (Expectation::DuplicateSlot, Err(PayrollError::DuplicateSlot(_))) => true,
            (Expectation::BalanceOverflow, Err(PayrollError::BalanceOverflow)) => true,
            _ => false,
        }
    }
}

const PAYER_SEED: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

fn participant(name: &str, byte: u8) -> Participant {
    Participant {
        name: name.to_string(),
        seed: hex::encode([byte; 32]),
    }
}

fn salaries(amounts: &[(&str, Amount)]) -> Vec<SalaryLine> {
    amounts
        .iter()
        .map(|(recipient, amount)| SalaryLine {
            recipient: recipient.to_string(),
            amount: *amount,
        })
        .collect()
}

fn claim(recipient: &str, epoch: u64, submitter: &str, expect: Expectation) -> Step {
    Step::Claim {
        recipient: recipient.to_string(),
        epoch,
        submitter: submitter.to_string(),
        amount: None,
        reuse_witnesses: false,
        expect,
    }
}

impl Scenario {
    /// Two payroll rounds over three recipients and one relay.
    ///
    /// Round one pays `[1, 2, 3]`; recipient 0 claims through the relay, then
    /// replays the same witnesses and is refused; recipient 1 claims. Round
    /// two pays `[4, 5, 6]` and recipient 0 claims again at epoch 2.
    pub fn two_round_payroll() -> Self {
        Scenario {
            payer_seed: PAYER_SEED.to_string(),
            payer_funds: 21,
            participants: vec![
                participant("recipient-0", 0x01),
                participant("recipient-1", 0x02),
                participant("recipient-2", 0x03),
                participant("relay", 0x0F),
            ],
            steps: vec![
                Step::Distribute {
                    salaries: salaries(&[
                        ("recipient-0", 1),
                        ("recipient-1", 2),
                        ("recipient-2", 3),
                    ]),
                    expect: Expectation::Success,
                },
                claim("recipient-0", 1, "relay", Expectation::Success),
                Step::Claim {
                    recipient: "recipient-0".to_string(),
                    epoch: 1,
                    submitter: "relay".to_string(),
                    amount: None,
                    reuse_witnesses: true,
                    expect: Expectation::ProofMismatch,
                },
                claim("recipient-1", 1, "recipient-1", Expectation::Success),
                Step::Distribute {
                    salaries: salaries(&[
                        ("recipient-0", 4),
                        ("recipient-1", 5),
                        ("recipient-2", 6),
                    ]),
                    expect: Expectation::Success,
                },
                claim("recipient-0", 2, "recipient-0", Expectation::Success),
            ],
        }
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
