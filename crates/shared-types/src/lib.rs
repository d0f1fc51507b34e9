//! # Shared Types Crate
//!
//! Primitive values that flow between the commitment tree, the distribution
//! protocol and the ledger boundary.
//!
//! ## Design Principles
//!
//! - **Fixed width**: every persisted or hashed value is a fixed-size array,
//!   so encodings are canonical.
//! - **Explicit sentinels**: the empty leaf is a named constant
//!   (`LeafValue::EMPTY`), never an implicit default.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
