//! Fundamental geometric and simulation types.
//!
//! Vectors are `glam::DVec3` with Y up (altitude). Yaw 0 faces +Z.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Aircraft attitude in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Orientation {
    /// Orientation facing along `direction`, with zero roll.
    /// A zero-length direction yields the level default.
    pub fn facing(direction: DVec3) -> Self {
        let dir = direction.normalize_or_zero();
        if dir == DVec3::ZERO {
            return Self::default();
        }
        Self {
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
            yaw: dir.x.atan2(dir.z),
            roll: 0.0,
        }
    }

    /// Unit vector the nose points along.
    pub fn forward(&self) -> DVec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        DVec3::new(sy * cp, sp, cy * cp)
    }

    /// Unit vector along the right wing, kept horizontal (forward x up).
    pub fn right(&self) -> DVec3 {
        let (sy, cy) = self.yaw.sin_cos();
        DVec3::new(-cy, 0.0, sy)
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Grow the box by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        let m = DVec3::splat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> DVec3 {
        (self.max - self.min) * 0.5
    }
}

/// Global environment for a session: constants plus the time-varying wind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldEnv {
    pub gravity: f64,
    /// Wind acceleration, recomputed every tick.
    pub wind: DVec3,
    pub ground_height: f64,
    pub time: SimTime,
}

impl WorldEnv {
    pub fn new(gravity: f64, ground_height: f64) -> Self {
        Self {
            gravity,
            wind: DVec3::ZERO,
            ground_height,
            time: SimTime::default(),
        }
    }
}
