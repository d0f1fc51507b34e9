//! # Payroll Runtime Library
//!
//! Configuration, scenario format and scenario runner behind the
//! `payroll-runtime` binary. Exposed as a library for testing.
//!
//! ## Startup Sequence
//!
//! 1. Load `RuntimeConfig` from the environment
//! 2. Install the tracing subscriber (`RUST_LOG`, default `info`)
//! 3. Load the scenario (`PP_SCENARIO`, else the built-in two-round payroll)
//! 4. Replay every step against a fresh in-memory ledger
//! 5. Print the report, and the event journal when `PP_EVENTS_JSON` is set

pub mod config;
pub mod errors;
pub mod runner;
pub mod scenario;

pub use config::{HasherKind, RuntimeConfig};
pub use errors::RuntimeError;
pub use runner::{ScenarioReport, ScenarioRunner, StepOutcome};
pub use scenario::{Expectation, Participant, SalaryLine, Scenario, Step};
