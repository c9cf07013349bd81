//! Driver settings read from the environment.
//!
//! - `AEROCOMBAT_TUNING`: path to a JSON tuning file (defaults when unset)
//! - `AEROCOMBAT_SEED`: RNG seed (default 42)
//! - `AEROCOMBAT_RUN_SECS`: wall-clock seconds to run (default 30)

use std::path::Path;

use aerocombat_core::config::{ConfigError, Tuning};
use aerocombat_sim::SimConfig;

pub const TUNING_VAR: &str = "AEROCOMBAT_TUNING";
pub const SEED_VAR: &str = "AEROCOMBAT_SEED";
pub const RUN_SECS_VAR: &str = "AEROCOMBAT_RUN_SECS";

const DEFAULT_RUN_SECS: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct Settings {
    pub sim: SimConfig,
    pub run_secs: f64,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let tuning = match lookup(TUNING_VAR) {
            Some(path) => Tuning::load(Path::new(&path))?,
            None => Tuning::default(),
        };

        let seed = match lookup(SEED_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                field: SEED_VAR,
                reason: format!("{raw:?} is not an unsigned integer: {e}"),
            })?,
            None => SimConfig::default().seed,
        };

        let run_secs = match lookup(RUN_SECS_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<f64>().map_err(|e| ConfigError::Invalid {
                    field: RUN_SECS_VAR,
                    reason: format!("{raw:?} is not a number: {e}"),
                })?;
                if !secs.is_finite() || secs <= 0.0 {
                    return Err(ConfigError::Invalid {
                        field: RUN_SECS_VAR,
                        reason: format!("must be positive, got {secs}"),
                    });
                }
                secs
            }
            None => DEFAULT_RUN_SECS,
        };

        Ok(Self {
            sim: SimConfig { seed, tuning },
            run_secs,
        })
    }
}
