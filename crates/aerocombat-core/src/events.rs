//! Events emitted by the simulation for effects and audio.
//!
//! The simulation appends to an event queue during a tick; the presentation
//! layer drains and interprets it afterwards.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Spawn a visual effect at a world position.
    Effect { kind: EffectKind, position: DVec3 },
    /// Play a named sound.
    Sound { cue: SoundCue },
}

impl SimEvent {
    pub fn effect(kind: EffectKind, position: DVec3) -> Self {
        Self::Effect { kind, position }
    }

    pub fn sound(cue: SoundCue) -> Self {
        Self::Sound { cue }
    }
}
