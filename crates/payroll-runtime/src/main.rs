//! # Payroll Runtime
//!
//! Replays a payroll scenario against an in-memory ledger and prints the
//! outcome of every step, the final roots and the ledger balances.
//!
//! ```text
//! RUST_LOG=debug PP_TREE_DEPTH=32 PP_EVENTS_JSON=1 payroll-runtime
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use payroll_runtime::{HasherKind, RuntimeConfig, Scenario, ScenarioReport, ScenarioRunner};
use shared_crypto::{Blake3Hasher, DomainHasher, Keccak256Hasher};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    Ok(())
}

fn load_scenario(config: &RuntimeConfig) -> Result<Scenario> {
    match &config.scenario_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario {}", path.display()))?;
            Scenario::from_json(&raw)
                .with_context(|| format!("failed to parse scenario {}", path.display()))
        }
        None => Ok(Scenario::two_round_payroll()),
    }
}

fn replay<H: DomainHasher>(
    hasher: H,
    config: &RuntimeConfig,
    scenario: &Scenario,
) -> Result<ScenarioReport> {
    let runner = ScenarioRunner::new(Arc::new(hasher), config.tree_depth, scenario)
        .context("failed to set up scenario")?;
    runner.run(scenario).context("scenario replay failed")
}

fn main() -> Result<()> {
    init_tracing()?;

    let config = RuntimeConfig::from_env().context("invalid runtime configuration")?;
    info!(
        depth = config.tree_depth,
        hasher = ?config.hasher,
        scenario = ?config.scenario_path,
        "Starting payroll runtime"
    );

    let scenario = load_scenario(&config)?;
    let report = match config.hasher {
        HasherKind::Keccak => replay(Keccak256Hasher, &config, &scenario)?,
        HasherKind::Blake3 => replay(Blake3Hasher, &config, &scenario)?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    if config.print_events_json {
        println!("{}", serde_json::to_string_pretty(&report.events)?);
    }

    info!(
        epoch = report.epoch,
        pool_balance = report.pool_balance,
        "Scenario complete"
    );
    Ok(())
}
