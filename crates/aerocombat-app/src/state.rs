//! State shared between the driver thread and the game loop thread.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use aerocombat_core::commands::{ControlInput, PlayerCommand};
use aerocombat_core::state::{ScoreView, SimSnapshot};

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// New latched flight controls.
    Controls(ControlInput),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, updated by the game loop after every frame.
pub type SharedSnapshot = Arc<Mutex<Option<SimSnapshot>>>;

/// What the game loop saw over its lifetime. Returned when it shuts down.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionReport {
    pub frames: u64,
    pub sim_secs: f64,
    pub score: ScoreView,
    /// Drained events tallied by name, e.g. `"explosion"` or `"sound:hit"`.
    pub event_counts: BTreeMap<String, u64>,
}

impl SessionReport {
    pub fn record_event(&mut self, name: &str) {
        *self.event_counts.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn event_count(&self, name: &str) -> u64 {
        self.event_counts.get(name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tallies_events() {
        let mut report = SessionReport::default();
        report.record_event("explosion");
        report.record_event("explosion");
        report.record_event("sound:hit");
        assert_eq!(report.event_count("explosion"), 2);
        assert_eq!(report.event_count("sound:hit"), 1);
        assert_eq!(report.event_count("impact"), 0);
    }

    #[test]
    fn test_shared_snapshot_starts_empty() {
        let shared: SharedSnapshot = Arc::default();
        assert!(shared.lock().unwrap().is_none());
    }
}
