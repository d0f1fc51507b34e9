//! # Runtime Configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PP_TREE_DEPTH` | `256` | Commitment tree depth (1..=256) |
//! | `PP_HASHER` | `keccak` | `keccak` or `blake3` |
//! | `PP_SCENARIO` | unset | Path to a JSON scenario; built-in scenario when unset |
//! | `PP_EVENTS_JSON` | `false` | Print the event journal as JSON |

use crate::errors::RuntimeError;
use shared_types::{validate_depth, MAX_TREE_DEPTH};
use std::path::PathBuf;

/// Hash back-end selected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HasherKind {
    #[default]
    Keccak,
    Blake3,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub tree_depth: usize,
    pub hasher: HasherKind,
    pub scenario_path: Option<PathBuf>,
    pub print_events_json: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tree_depth: MAX_TREE_DEPTH,
            hasher: HasherKind::default(),
            scenario_path: None,
            print_events_json: false,
        }
    }
}

impl RuntimeConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, RuntimeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(depth) = lookup("PP_TREE_DEPTH") {
            let parsed = depth
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid("PP_TREE_DEPTH", &depth, e))?;
            config.tree_depth =
                validate_depth(parsed).map_err(|e| invalid("PP_TREE_DEPTH", &depth, e))?;
        }

        if let Some(hasher) = lookup("PP_HASHER") {
            config.hasher = match hasher.trim().to_ascii_lowercase().as_str() {
                "keccak" | "keccak256" => HasherKind::Keccak,
                "blake3" => HasherKind::Blake3,
                _ => return Err(invalid("PP_HASHER", &hasher, "expected keccak or blake3")),
            };
        }

        if let Some(path) = lookup("PP_SCENARIO") {
            if !path.trim().is_empty() {
                config.scenario_path = Some(PathBuf::from(path.trim()));
            }
        }

        if let Some(flag) = lookup("PP_EVENTS_JSON") {
            config.print_events_json = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(invalid("PP_EVENTS_JSON", &flag, "expected a boolean")),
            };
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> RuntimeError {
    RuntimeError::InvalidConfig {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
