//! Enemy AI system: runs the behavior FSM for every live enemy.
//!
//! Calls the FSM from aerocombat-ai, then writes the new state, steering and
//! orientation back into components. Shots become fire requests that the
//! projectile system spawns later in the tick.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use aerocombat_ai::fsm::{evaluate, EnemyContext};
use aerocombat_ai::patrol::random_patrol_point;
use aerocombat_core::components::{Enemy, Health, Kinematics};
use aerocombat_core::config::Tuning;
use aerocombat_core::types::Orientation;

use crate::systems::projectiles::FireRequest;

pub fn run(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    dt: f64,
    fire_requests: &mut Vec<FireRequest>,
) {
    let (player_position, player_velocity) = match world.get::<&Kinematics>(player) {
        Ok(k) => (k.position, k.velocity),
        Err(_) => return,
    };

    for (entity, (enemy, kinematics, orientation, health)) in world
        .query_mut::<(&mut Enemy, &Kinematics, &mut Orientation, &mut Health)>()
    {
        if health.is_dead() {
            continue;
        }

        enemy.shot_timer = (enemy.shot_timer - dt).max(0.0);

        let ctx = EnemyContext {
            state: enemy.ai_state,
            position: kinematics.position,
            health: health.current,
            max_health: health.max,
            aggro_range: enemy.aggro_range,
            attack_range: enemy.attack_range,
            speed: enemy.speed,
            patrol_target: enemy.patrol_target,
            patrol_arrive_distance: tuning.patrol_arrive_distance,
            player_position,
            player_velocity,
            shot_ready: enemy.shot_timer <= 0.0,
        };

        let update = evaluate(&ctx);
        if update.state_changed {
            debug!(
                enemy = ?entity,
                from = ?enemy.ai_state,
                to = ?update.new_state,
                distance = ctx.distance_to_player(),
                "enemy state change"
            );
        }

        enemy.ai_state = update.new_state;
        enemy.steering = update.steering;
        *orientation = update.orientation;

        if update.restore_health {
            health.restore();
        }

        if let Some(aim_point) = update.fire_at {
            fire_requests.push(FireRequest::enemy(
                kinematics.position,
                aim_point - kinematics.position,
                tuning,
            ));
            enemy.shot_timer = enemy.shoot_cooldown;
        }

        if update.patrol_reached {
            enemy.patrol_target = random_patrol_point(
                rng,
                enemy.home,
                tuning.patrol_radius_min,
                tuning.patrol_radius_max,
                tuning.ground_height + tuning.enemy_ground_margin,
            );
        }
    }
}
