//! # Domain Entities for Payroll Distribution
//!
//! ## Persisted Layout
//!
//! The ledger stores exactly three scalars, encoded with bincode's fixed-width
//! integers:
//!
//! | Field | Bytes |
//! |-------|-------|
//! | `salary_root` | 32 |
//! | `claimed_root` | 32 |
//! | `epoch` | 8 |

use super::PayrollError;
use pp_01_commitment_tree::{MembershipWitness, TreeConfig};
use serde::{Deserialize, Serialize};
use shared_crypto::{DomainHasher, HashDomain, IdentitySecret, IdentitySignature, PublicIdentity};
use shared_types::{AccountId, Amount, Epoch, Hash};
use std::fmt;

/// Exact size of an encoded `DistributionState`.
pub const ENCODED_STATE_LEN: usize = 72;

/// The protocol's persisted state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionState {
    /// Root of the salary tree installed by the latest distribution.
    pub salary_root: Hash,
    /// Root of the claim-flag tree.
    pub claimed_root: Hash,
    /// Number of distributions so far.
    pub epoch: Epoch,
}

impl DistributionState {
    /// State after `init`: both roots empty, epoch zero.
    pub fn genesis(empty_root: Hash) -> Self {
        Self {
            salary_root: empty_root,
            claimed_root: empty_root,
            epoch: Epoch::ZERO,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, PayrollError> {
        bincode::serialize(self).map_err(|e| PayrollError::StateEncoding(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PayrollError> {
        if bytes.len() != ENCODED_STATE_LEN {
            return Err(PayrollError::StateEncoding(format!(
                "expected {ENCODED_STATE_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        bincode::deserialize(bytes).map_err(|e| PayrollError::StateEncoding(e.to_string()))
    }
}

/// Protocol configuration, fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Shape of both commitment trees.
    pub tree: TreeConfig,
    /// The only identity allowed to distribute.
    pub payer: PublicIdentity,
}

impl PayrollConfig {
    /// Default tree shape with the given payer.
    pub fn new(payer: PublicIdentity) -> Self {
        Self {
            tree: TreeConfig::default(),
            payer,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.tree = TreeConfig::with_depth(depth);
        self
    }

    pub fn validate(&self) -> Result<(), PayrollError> {
        self.tree.validate()?;
        Ok(())
    }
}

/// Payer's signature over one distribution, bound to the epoch it was
/// prepared against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayerAuthorization {
    /// Claimed signer.
    pub payer: PublicIdentity,
    /// Epoch read when the distribution was prepared.
    pub snapshot_epoch: Epoch,
    pub signature: IdentitySignature,
}

impl PayerAuthorization {
    /// Digest the payer signs.
    pub fn message<H: DomainHasher + ?Sized>(
        hasher: &H,
        snapshot_epoch: Epoch,
        new_salary_root: &Hash,
        total_amount: Amount,
    ) -> Hash {
        hasher.hash(
            HashDomain::Authorization,
            &[
                snapshot_epoch.to_be_bytes().as_slice(),
                new_salary_root.as_slice(),
                total_amount.to_be_bytes().as_slice(),
            ],
        )
    }

    /// Sign a distribution of `new_salary_root` / `total_amount` prepared
    /// against `snapshot_epoch`.
    pub fn sign<H: DomainHasher + ?Sized>(
        hasher: &H,
        payer: &IdentitySecret,
        snapshot_epoch: Epoch,
        new_salary_root: &Hash,
        total_amount: Amount,
    ) -> Self {
        let message = Self::message(hasher, snapshot_epoch, new_salary_root, total_amount);
        Self {
            payer: payer.public_identity(),
            snapshot_epoch,
            signature: payer.sign(&message),
        }
    }
}

/// Everything a recipient (or its relay) submits to claim one salary entry.
#[derive(Clone, Debug)]
pub struct ClaimRequest {
    pub identity_secret: IdentitySecret,
    /// Amount committed for the slot.
    pub amount: Amount,
    /// Distribution the entry belongs to.
    pub epoch: Epoch,
    /// Opens `amount` at the slot against the salary root.
    pub salary_witness: MembershipWitness,
    /// Opens `Unclaimed` at the slot against the claimed root.
    pub claimed_witness: MembershipWitness,
}

/// Outcome of a committed distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReceipt {
    pub state: DistributionState,
    pub total_amount: Amount,
    pub pool_balance: Amount,
}

/// Outcome of a committed claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub state: DistributionState,
    pub payout: Amount,
    /// Account that received the payout.
    pub recipient_account: AccountId,
}

/// Which commitment tree a check ran against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    Salary,
    Claimed,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Salary => f.write_str("salary"),
            TreeKind::Claimed => f.write_str("claimed"),
        }
    }
}
