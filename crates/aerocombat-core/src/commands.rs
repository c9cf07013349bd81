//! Player commands and control input sent from the input collaborator.
//!
//! Discrete commands are queued for processing at the next tick boundary.
//! Continuous control axes are latched and read every tick.

use serde::{Deserialize, Serialize};

/// Discrete player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Weapons ---
    /// Fire the gun along the nose, subject to the fire interval.
    FireWeapon,

    // --- Session control ---
    /// Start a session from idle: spawn the player and the initial wave.
    StartSession,
    /// Tear down the current session and start a fresh one.
    Restart,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}

/// Continuous flight controls. Axes are in `[-1, 1]`, rates in rad/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub forward: f64,
    pub strafe: f64,
    pub vertical: f64,
    pub yaw_rate: f64,
    pub pitch_rate: f64,
}

impl ControlInput {
    /// Clamp axes to `[-1, 1]` and zero anything non-finite.
    pub fn sanitized(self) -> Self {
        fn axis(v: f64) -> f64 {
            if v.is_finite() {
                v.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
        fn rate(v: f64) -> f64 {
            if v.is_finite() {
                v
            } else {
                0.0
            }
        }
        Self {
            forward: axis(self.forward),
            strafe: axis(self.strafe),
            vertical: axis(self.vertical),
            yaw_rate: rate(self.yaw_rate),
            pitch_rate: rate(self.pitch_rate),
        }
    }
}
