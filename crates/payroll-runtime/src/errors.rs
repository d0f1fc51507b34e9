use pp_02_distribution::PayrollError;
use shared_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid configuration: {key}={value}: {reason}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown participant '{0}'")]
    UnknownParticipant(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Step {step}: expected {expected}, got {actual}")]
    UnexpectedOutcome {
        step: usize,
        expected: String,
        actual: String,
    },

    #[error("Payroll error: {0}")]
    Payroll(#[from] PayrollError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
