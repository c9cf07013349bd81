//! Projectile system: spawning, integration, hit tests and retirement.
//!
//! Hit tests are point-vs-sphere against aircraft and point-vs-box against
//! buildings, with no swept collision. The engine's delta-time clamp bounds
//! how far a projectile can jump in one tick. A projectile is retired on its
//! first collision, so it never damages more than one target.

use glam::DVec3;
use hecs::{Entity, World};

use aerocombat_core::components::{Building, Enemy, Health, Kinematics, Projectile};
use aerocombat_core::config::Tuning;
use aerocombat_core::enums::{EffectKind, Faction, SoundCue};
use aerocombat_core::events::SimEvent;
use aerocombat_core::types::WorldEnv;

use crate::score::ScoreState;

/// A request to spawn one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    pub origin: DVec3,
    /// Firing direction; need not be normalized.
    pub direction: DVec3,
    pub speed: f64,
    pub damage: f64,
    pub life: f64,
    pub faction: Faction,
    /// Shooter velocity added to the muzzle velocity.
    pub inherited_velocity: DVec3,
}

impl FireRequest {
    /// Player shot, inheriting the aircraft's momentum.
    pub fn player(origin: DVec3, direction: DVec3, shooter_velocity: DVec3, tuning: &Tuning) -> Self {
        Self {
            origin,
            direction,
            speed: tuning.player_shot_speed,
            damage: tuning.player_shot_damage,
            life: tuning.player_shot_life,
            faction: Faction::Player,
            inherited_velocity: shooter_velocity,
        }
    }

    /// Enemy shot. Enemy shots do not inherit momentum.
    pub fn enemy(origin: DVec3, direction: DVec3, tuning: &Tuning) -> Self {
        Self {
            origin,
            direction,
            speed: tuning.enemy_shot_speed,
            damage: tuning.enemy_shot_damage,
            life: tuning.enemy_shot_life,
            faction: Faction::Enemy,
            inherited_velocity: DVec3::ZERO,
        }
    }
}

/// Spawn a projectile. A zero-length or non-finite direction fires nothing.
pub fn fire(world: &mut World, request: &FireRequest, events: &mut Vec<SimEvent>) -> Option<Entity> {
    let direction = request.direction.try_normalize()?;

    let velocity = direction * request.speed + request.inherited_velocity;
    let entity = world.spawn((
        Projectile {
            life: request.life,
            damage: request.damage,
            faction: request.faction,
        },
        Kinematics::new(request.origin, velocity),
    ));

    events.push(SimEvent::effect(EffectKind::MuzzleFlash, request.origin));
    events.push(SimEvent::sound(match request.faction {
        Faction::Player => SoundCue::PlayerShoot,
        Faction::Enemy => SoundCue::EnemyShoot,
    }));
    Some(entity)
}

/// An enemy as seen by this tick's hit tests.
struct Target {
    entity: Entity,
    position: DVec3,
    health: f64,
    hit: bool,
}

/// Advance and resolve every live projectile, then spawn this tick's
/// fire requests. Damage is written back after the pass; removal goes
/// through `despawn_buffer`.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: Entity,
    buildings: &[Building],
    env: &WorldEnv,
    tuning: &Tuning,
    dt: f64,
    fire_requests: &mut Vec<FireRequest>,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let player_position = world
        .get::<&Kinematics>(player)
        .map(|k| k.position)
        .ok();
    let mut player_damage = 0.0;

    let mut targets: Vec<Target> = world
        .query::<(&Enemy, &Kinematics, &Health)>()
        .iter()
        .map(|(entity, (_enemy, kinematics, health))| Target {
            entity,
            position: kinematics.position,
            health: health.current,
            hit: false,
        })
        .collect();

    let boxes: Vec<_> = buildings
        .iter()
        .map(|b| b.bounds().expanded(tuning.projectile_radius))
        .collect();

    for (entity, (projectile, kinematics)) in
        world.query_mut::<(&mut Projectile, &mut Kinematics)>()
    {
        kinematics.position += kinematics.velocity * dt;
        projectile.life -= dt;
        let position = kinematics.position;

        if projectile.life <= 0.0 {
            despawn_buffer.push(entity);
            continue;
        }

        match projectile.faction {
            Faction::Enemy => {
                if let Some(player_position) = player_position {
                    if position.distance(player_position) <= tuning.player_hit_radius {
                        player_damage += projectile.damage;
                        events.push(SimEvent::effect(EffectKind::Impact, position));
                        events.push(SimEvent::sound(SoundCue::Hit));
                        despawn_buffer.push(entity);
                        continue;
                    }
                }
            }
            Faction::Player => {
                let struck = targets.iter_mut().find(|t| {
                    t.health > 0.0 && position.distance(t.position) <= tuning.enemy_hit_radius
                });
                if let Some(target) = struck {
                    target.health = (target.health - projectile.damage).max(0.0);
                    target.hit = true;
                    events.push(SimEvent::effect(EffectKind::Impact, position));
                    events.push(SimEvent::sound(SoundCue::Hit));
                    if target.health <= 0.0 {
                        // Removal happens in the lifecycle sweep.
                        events.push(SimEvent::effect(EffectKind::Explosion, target.position));
                        events.push(SimEvent::sound(SoundCue::Explosion));
                    }
                    despawn_buffer.push(entity);
                    continue;
                }
            }
        }

        if boxes.iter().any(|b| b.contains(position)) {
            events.push(SimEvent::effect(EffectKind::Impact, position));
            events.push(SimEvent::sound(SoundCue::Impact));
            despawn_buffer.push(entity);
            continue;
        }

        if position.y < env.ground_height {
            let ground = DVec3::new(position.x, env.ground_height, position.z);
            events.push(SimEvent::effect(EffectKind::Impact, ground));
            events.push(SimEvent::sound(SoundCue::Impact));
            despawn_buffer.push(entity);
        }
    }

    if player_damage > 0.0 {
        if let Ok(mut health) = world.get::<&mut Health>(player) {
            health.damage(player_damage);
        }
    }
    for target in targets.iter().filter(|t| t.hit) {
        if let Ok(mut health) = world.get::<&mut Health>(target.entity) {
            health.current = target.health.clamp(0.0, health.max);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for request in fire_requests.drain(..) {
        if fire(world, &request, events).is_some() && request.faction == Faction::Player {
            score.shots_fired += 1;
        }
    }
}
