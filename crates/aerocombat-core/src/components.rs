//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems, with the
//! exception of a few small helpers that keep clamping rules in one place.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Aabb;

/// Position and velocity of anything that moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl Kinematics {
    pub fn new(position: DVec3, velocity: DVec3) -> Self {
        Self { position, velocity }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Hit points, always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount` and clamp. Returns true if this brought health to zero.
    pub fn damage(&mut self, amount: f64) -> bool {
        let was_alive = self.current > 0.0;
        self.current = (self.current - amount).clamp(0.0, self.max);
        was_alive && self.current <= 0.0
    }

    pub fn heal(&mut self, amount: f64) {
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Per-body integration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    /// Multiplicative velocity decay applied once per tick.
    pub drag: f64,
    pub gravity_scale: f64,
    /// Minimum altitude above ground.
    pub ground_margin: f64,
    /// Floor for vertical speed when clamped to the ground margin.
    pub min_vertical_speed: f64,
}

/// Marks the player's aircraft and carries its pilot state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub fuel: f64,
    /// Derived |velocity|, refreshed after movement.
    pub speed: f64,
    /// Seconds until the gun can fire again.
    pub fire_cooldown: f64,
    /// Seconds of immunity from building contact damage.
    pub contact_grace: f64,
    /// Seconds until the next engine trail puff.
    pub trail_timer: f64,
}

/// Enemy aircraft state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub ai_state: AiState,
    /// Seconds until the next shot is allowed. Counts down to zero.
    pub shot_timer: f64,
    /// Cooldown between shots, randomized per spawn.
    pub shoot_cooldown: f64,
    pub aggro_range: f64,
    pub attack_range: f64,
    pub patrol_target: DVec3,
    /// Spawn point; patrol points are drawn around it.
    pub home: DVec3,
    pub speed: f64,
    /// Steering acceleration chosen by the AI, applied by the integrator.
    pub steering: DVec3,
}

/// A live projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Remaining life in seconds.
    pub life: f64,
    pub damage: f64,
    pub faction: Faction,
}

/// Static box collider handed over by world generation.
/// `position` is the center of the base; the box rises `height` above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub position: DVec3,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Building {
    pub fn new(position: DVec3, width: f64, height: f64, depth: f64) -> Self {
        Self {
            position,
            width,
            height,
            depth,
        }
    }

    pub fn bounds(&self) -> Aabb {
        let half = DVec3::new(self.width * 0.5, 0.0, self.depth * 0.5);
        Aabb::new(
            self.position - half,
            self.position + half + DVec3::new(0.0, self.height, 0.0),
        )
    }
}
