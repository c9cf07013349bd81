//! Simulation snapshot: the read-only view handed to the renderer each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Orientation, SimTime};

/// Complete visible state after a tick. Buildings are fetched once separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub wind: DVec3,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: Orientation,
    pub health: f64,
    pub max_health: f64,
    pub fuel: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: DVec3,
    pub orientation: Orientation,
    pub health: f64,
    pub max_health: f64,
    /// Exposed for visual feedback (e.g. tinting fleeing enemies).
    pub ai_state: AiState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec3,
    pub velocity: DVec3,
    pub faction: Faction,
}

/// Running score for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: u32,
    pub deaths: u32,
    pub shots_fired: u32,
    pub enemies_spawned: u32,
}
