//! End-of-tick guard against non-finite state.
//!
//! A NaN or infinity that leaks into a position or velocity would otherwise
//! spread through every later distance check. The player is respawned, any
//! other offending entity is removed.

use hecs::{Entity, World};
use tracing::warn;

use aerocombat_core::components::{Kinematics, Player};
use aerocombat_core::config::Tuning;

use crate::world_setup;

pub fn run(world: &mut World, player: Entity, tuning: &Tuning, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, kinematics) in world.query_mut::<hecs::Without<&Kinematics, &Player>>() {
        if !kinematics.is_finite() {
            warn!(entity = ?entity, ?kinematics, "removing entity with non-finite kinematics");
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    let player_broken = world
        .get::<&Kinematics>(player)
        .map(|k| !k.is_finite())
        .unwrap_or(false);
    if player_broken {
        warn!("player kinematics became non-finite, respawning");
        world_setup::respawn_player(world, player, tuning);
    }
}
