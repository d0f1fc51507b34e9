//! # Payroll Test Suite
//!
//! Unified cross-crate tests.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── e2e_payroll.rs   # Two-round payroll, relayed claims, rejections
//!     ├── concurrency.rs   # Racing claims and distributions, witness rebuild
//!     └── properties.rs    # Randomized protocol properties (proptest)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pp-tests
//! cargo test -p pp-tests integration::concurrency::
//! cargo bench -p pp-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
