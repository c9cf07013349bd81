//! Wind system: recomputes the wind vector from elapsed session time.

use glam::DVec3;

use aerocombat_core::config::Tuning;
use aerocombat_core::types::WorldEnv;

/// Slowly rotating horizontal wind. Deterministic in elapsed time.
pub fn wind_at(elapsed_secs: f64, tuning: &Tuning) -> DVec3 {
    DVec3::new(
        (elapsed_secs * tuning.wind_freq_x).sin(),
        0.0,
        (elapsed_secs * tuning.wind_freq_z).cos(),
    ) * tuning.wind_strength
}

pub fn run(env: &mut WorldEnv, tuning: &Tuning) {
    env.wind = wind_at(env.time.elapsed_secs, tuning);
}
