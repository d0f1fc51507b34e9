//! # pp-01-commitment-tree
//!
//! Sparse, fixed-depth, hash-based commitment tree used twice by the payroll
//! protocol: once over salary amounts and once over claim flags.
//!
//! ## Role in System
//!
//! - **Off-chain**: the payer and recipients build `SparseMerkleTree`s from
//!   their private records and extract `MembershipWitness`es.
//! - **On-ledger**: the protocol only ever sees roots and witnesses; the
//!   `MembershipVerifier` port recomputes `(root, index)` from a witness and a
//!   claimed leaf value.
//!
//! ```text
//!   level d            root
//!                    /      \
//!   level 1       n0          n1
//!                /  \        /  \
//!   level 0   leaf  leaf  leaf  leaf      leaf hash = H(Leaf, value)
//!                                         node hash = H(Node, left, right)
//! ```
//!
//! Unwritten slots hold `LeafValue::EMPTY`; their subtrees collapse to the
//! precomputed empty-subtree table, so a depth-256 tree stays cheap.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
