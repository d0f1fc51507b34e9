use shared_types::PrimitiveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Witness length mismatch: expected {expected} levels, got {actual}")]
    WitnessLength { expected: usize, actual: usize },

    #[error("Malformed witness: {siblings} siblings but {path} path bits")]
    MalformedWitness { siblings: usize, path: usize },

    #[error("Slot index has bits above tree depth {depth}")]
    IndexOutOfRange { depth: usize },

    #[error("Invalid tree configuration: {0}")]
    InvalidConfig(#[from] PrimitiveError),

    #[error("Node store error: {0}")]
    StoreError(String),
}
