//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player and enemy entities with appropriate component bundles.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aerocombat_ai::patrol::random_patrol_point;
use aerocombat_core::components::*;
use aerocombat_core::config::Tuning;
use aerocombat_core::enums::AiState;
use aerocombat_core::types::Orientation;

/// Spawn the player at the configured spawn point, level and at rest.
pub fn spawn_player(world: &mut World, tuning: &Tuning) -> Entity {
    world.spawn((
        Player {
            fuel: tuning.player_max_fuel,
            speed: 0.0,
            fire_cooldown: 0.0,
            contact_grace: 0.0,
            trail_timer: 0.0,
        },
        Kinematics::new(tuning.player_spawn(), DVec3::ZERO),
        Orientation::default(),
        Health::full(tuning.player_max_health),
    ))
}

/// Put the player back at spawn with full health and fuel.
pub fn respawn_player(world: &mut World, player: Entity, tuning: &Tuning) {
    if let Ok((pilot, kinematics, orientation, health)) = world
        .query_one_mut::<(&mut Player, &mut Kinematics, &mut Orientation, &mut Health)>(player)
    {
        *kinematics = Kinematics::new(tuning.player_spawn(), DVec3::ZERO);
        *orientation = Orientation::default();
        health.restore();
        pilot.fuel = tuning.player_max_fuel;
        pilot.speed = 0.0;
        pilot.fire_cooldown = 0.0;
        pilot.contact_grace = 0.0;
        pilot.trail_timer = 0.0;
    }
}

/// Spawn the opening wave around `center`. Returns how many were spawned.
pub fn spawn_initial_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    center: DVec3,
    tuning: &Tuning,
) -> u32 {
    let count = rng.gen_range(tuning.initial_wave_min..=tuning.initial_wave_max);
    for _ in 0..count {
        spawn_enemy_near(world, rng, center, tuning);
    }
    count
}

/// Spawn one enemy at a random bearing and distance from `center`.
pub fn spawn_enemy_near(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    center: DVec3,
    tuning: &Tuning,
) -> Entity {
    let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = rng.gen_range(tuning.spawn_distance_min..=tuning.spawn_distance_max);
    let jitter = rng.gen_range(-tuning.spawn_altitude_jitter..=tuning.spawn_altitude_jitter);

    let floor = tuning.ground_height + tuning.enemy_ground_margin;
    let position = DVec3::new(
        center.x + distance * bearing.sin(),
        (center.y + jitter).max(floor),
        center.z + distance * bearing.cos(),
    );
    spawn_enemy(world, rng, position, tuning)
}

/// Spawn one patrolling enemy at `position` with a randomized shot cooldown.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: DVec3,
    tuning: &Tuning,
) -> Entity {
    let shoot_cooldown = rng.gen_range(tuning.enemy_cooldown_min..=tuning.enemy_cooldown_max);
    let patrol_target = random_patrol_point(
        rng,
        position,
        tuning.patrol_radius_min,
        tuning.patrol_radius_max,
        tuning.ground_height + tuning.enemy_ground_margin,
    );

    let enemy = Enemy {
        ai_state: AiState::Patrol,
        shot_timer: 0.0,
        shoot_cooldown,
        aggro_range: tuning.enemy_aggro_range,
        attack_range: tuning.enemy_attack_range,
        patrol_target,
        home: position,
        speed: tuning.enemy_speed,
        steering: DVec3::ZERO,
    };

    world.spawn((
        enemy,
        Kinematics::new(position, DVec3::ZERO),
        Orientation::facing(patrol_target - position),
        Health::full(tuning.enemy_max_health),
    ))
}
