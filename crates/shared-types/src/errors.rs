//! # Error Types
//!
//! Errors raised by primitive conversions.

use thiserror::Error;

/// Errors produced while building or converting primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Epoch counter would wrap.
    #[error("Epoch overflow: cannot advance past {current}")]
    EpochOverflow { current: u64 },

    /// Tree depth outside the supported range.
    #[error("Invalid tree depth: {depth} (supported 1..={max})")]
    InvalidDepth { depth: usize, max: usize },
}
