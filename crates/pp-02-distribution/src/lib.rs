//! # pp-02-distribution
//!
//! Confidential payroll distribution protocol.
//!
//! ## Role in System
//!
//! - **Payer**: commits one salary root per epoch and escrows the batch total.
//! - **Recipient (or relay)**: proves an amount is committed for its slot and
//!   that the slot is still unclaimed, then receives the amount exactly once.
//! - **Ledger** (external): sole serialization point; every operation loads
//!   the current state inside a ledger transaction and commits all-or-nothing.
//!
//! ## Flow
//!
//! ```text
//!  payer (off-ledger)                    ledger                 recipient (off-ledger)
//!  ─────────────────                     ──────                 ──────────────────────
//!  build salary tree ──distribute(root, total, auth)──→ epoch+1
//!                                        salary_root := root
//!                                        payer ──total──→ pool
//!
//!                                        claim(secret, amount,  ←── salary witness
//!                                              epoch, witnesses) ←── claimed witness
//!                                        slot := H(id, epoch)
//!                                        check epoch, indices, roots
//!                                        claimed_root := update
//!                                        pool ──amount──→ submitter
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Epoch advances by exactly 1 per distribution | `domain/invariants.rs` |
//! | Claims never touch salary root or epoch | `domain/invariants.rs` |
//! | Precondition failures leave state untouched | `adapters/memory_ledger.rs` (commit on `Ok` only) |
//! | Both witnesses resolve to the derived slot | `domain/claim.rs` |
//!
//! ## Trust Boundary
//!
//! `distribute` does not check that the new salary root preserves earlier
//! unclaimed entries or that `total_amount` matches the new leaves. The payer
//! is trusted for both.

pub mod adapters;
pub mod book;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use book::*;
pub use domain::*;
pub use events::*;
pub use ports::*;
pub use service::*;
