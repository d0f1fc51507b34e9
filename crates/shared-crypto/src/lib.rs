//! # Shared Crypto - Payroll Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256, BLAKE3 | Domain-separated commitment hashing |
//! | `identity` | Ed25519 | Recipient identities, payer authorization |
//!
//! ## Security Properties
//!
//! - **Domain separation**: every digest is prefixed with a `HashDomain` tag,
//!   so a leaf hash can never be replayed as an inner node or a slot index.
//! - **Ed25519**: deterministic signatures, no RNG at signing time.
//! - **Secrets**: `IdentitySecret` is zeroized on drop and redacted in `Debug`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod identity;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{Blake3Hasher, DomainHasher, HashDomain, Keccak256Hasher};
pub use identity::{IdentitySecret, IdentitySignature, PublicIdentity};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
