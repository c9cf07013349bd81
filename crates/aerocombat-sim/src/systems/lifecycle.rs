//! Lifecycle system: removes destroyed and far-away enemies, then tops the
//! population back up with a time-ramped spawn chance.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use aerocombat_core::components::{Enemy, Health, Kinematics};
use aerocombat_core::config::Tuning;
use aerocombat_core::types::WorldEnv;

use crate::score::ScoreState;
use crate::world_setup;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    env: &WorldEnv,
    tuning: &Tuning,
    dt: f64,
    score: &mut ScoreState,
    despawn_buffer: &mut Vec<Entity>,
) {
    let Ok(player_position) = world.get::<&Kinematics>(player).map(|k| k.position) else {
        return;
    };

    despawn_buffer.clear();
    let radius_sq = tuning.despawn_radius * tuning.despawn_radius;

    for (entity, (_enemy, kinematics, health)) in
        world.query_mut::<(&Enemy, &Kinematics, &Health)>()
    {
        if health.is_dead() {
            score.kills += 1;
            despawn_buffer.push(entity);
        } else if kinematics.position.distance_squared(player_position) > radius_sq {
            debug!(enemy = ?entity, "enemy culled beyond despawn radius");
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    let elapsed = env.time.elapsed_secs;
    let alive = world.query_mut::<&Enemy>().into_iter().count() as u32;
    if alive >= enemy_cap(elapsed, tuning) {
        return;
    }

    if rng.gen_bool(spawn_chance(elapsed, dt, tuning)) {
        let entity = world_setup::spawn_enemy_near(world, rng, player_position, tuning);
        score.enemies_spawned += 1;
        debug!(enemy = ?entity, alive = alive + 1, elapsed, "enemy spawned");
    }
}

/// Population cap: grows by one every `cap_growth_secs` up to `enemy_cap_max`.
pub fn enemy_cap(elapsed_secs: f64, tuning: &Tuning) -> u32 {
    let growth = (elapsed_secs.max(0.0) / tuning.cap_growth_secs).floor() as u32;
    tuning.enemy_cap.saturating_add(growth).min(tuning.enemy_cap_max)
}

/// Per-tick spawn probability, ramped up with elapsed time.
pub fn spawn_chance(elapsed_secs: f64, dt: f64, tuning: &Tuning) -> f64 {
    let ramp = 1.0 + elapsed_secs.max(0.0) / tuning.difficulty_ramp_secs;
    let chance = tuning.spawn_rate * dt * ramp;
    if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_grows_then_saturates() {
        let tuning = Tuning::default();
        assert_eq!(enemy_cap(0.0, &tuning), tuning.enemy_cap);
        assert_eq!(enemy_cap(tuning.cap_growth_secs * 2.5, &tuning), tuning.enemy_cap + 2);
        assert_eq!(enemy_cap(1.0e6, &tuning), tuning.enemy_cap_max);
    }

    #[test]
    fn spawn_chance_ramps_with_time() {
        let tuning = Tuning::default();
        let early = spawn_chance(0.0, 1.0 / 60.0, &tuning);
        let late = spawn_chance(tuning.difficulty_ramp_secs, 1.0 / 60.0, &tuning);
        assert!((late - 2.0 * early).abs() < 1e-12);
    }

    #[test]
    fn spawn_chance_is_a_probability() {
        let tuning = Tuning {
            spawn_rate: 50.0,
            ..Tuning::default()
        };
        assert_eq!(spawn_chance(1000.0, 0.1, &tuning), 1.0);
        assert_eq!(spawn_chance(0.0, 0.0, &tuning), 0.0);
    }
}
