use super::TreeKind;
use pp_01_commitment_tree::TreeError;
use shared_types::{Amount, Epoch, PrimitiveError, SlotIndex};
use thiserror::Error;

/// Every failure is detected before any mutation; the ledger discards the
/// transaction's writes when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayrollError {
    #[error("Stale epoch: claim references epoch {requested}, current is {current}")]
    StaleEpoch { requested: Epoch, current: Epoch },

    #[error("Proof mismatch: {tree} witness does not reproduce the stored root")]
    ProofMismatch { tree: TreeKind },

    #[error("Index mismatch: {tree} witness opens a different slot than the claimant's")]
    IndexMismatch {
        tree: TreeKind,
        expected: SlotIndex,
        actual: SlotIndex,
    },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },

    #[error("Authorization not signed by the configured payer")]
    NotPayer,

    #[error("Invalid payer authorization signature")]
    Unauthorized,

    #[error("Stale authorization: signed for epoch {signed}, current is {current}")]
    StaleAuthorization { signed: Epoch, current: Epoch },

    #[error("Distribution state not initialized")]
    NotInitialized,

    #[error("Distribution state already initialized")]
    AlreadyInitialized,

    #[error("Claim amount must be non-zero")]
    ZeroAmount,

    #[error("Epoch overflow at {current}")]
    EpochOverflow { current: Epoch },

    #[error("Balance overflow")]
    BalanceOverflow,

    #[error("State encoding error: {0}")]
    StateEncoding(String),

    #[error("No salary entries committed for epoch {epoch}")]
    NoEntry { epoch: Epoch },

    #[error("Duplicate slot in salary batch: {0:?}")]
    DuplicateSlot(SlotIndex),

    #[error("Invariant violated: {0}")]
    InvariantViolated(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

impl From<PrimitiveError> for PayrollError {
    fn from(e: PrimitiveError) -> Self {
        match e {
            PrimitiveError::EpochOverflow { current } => PayrollError::EpochOverflow {
                current: Epoch(current),
            },
            other => PayrollError::InvalidConfig(other.to_string()),
        }
    }
}

impl PayrollError {
    /// Whether rebuilding witnesses against fresh state could make a retry
    /// succeed. Every other error needs different inputs.
    pub fn is_stale_state(&self) -> bool {
        matches!(
            self,
            PayrollError::ProofMismatch { .. } | PayrollError::StaleAuthorization { .. }
        )
    }
}
