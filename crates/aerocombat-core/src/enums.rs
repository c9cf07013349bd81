//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy behavior state. Exactly one is active per enemy at all times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    /// Wandering between random points near home.
    #[default]
    Patrol,
    /// Closing on the player's predicted position.
    Chase,
    /// Within weapons range; fires on cooldown.
    Attack,
    /// Running directly away from the player to regenerate.
    Flee,
}

/// Who fired a projectile. Decides which entities it can damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Visual effect categories consumed by the effects collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Explosion,
    Impact,
    MuzzleFlash,
    EngineTrail,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explosion => "explosion",
            Self::Impact => "impact",
            Self::MuzzleFlash => "muzzle-flash",
            Self::EngineTrail => "engine-trail",
        }
    }
}

/// Named sound triggers consumed by the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Hit,
    Explosion,
    PlayerShoot,
    EnemyShoot,
    Impact,
}

impl SoundCue {
    /// Name used by the audio collaborator's sound bank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Explosion => "explosion",
            Self::PlayerShoot => "playerShoot",
            Self::EnemyShoot => "enemyShoot",
            Self::Impact => "impact",
        }
    }
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session started yet.
    #[default]
    Idle,
    Active,
    Paused,
}
