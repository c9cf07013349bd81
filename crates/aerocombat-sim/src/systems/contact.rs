//! Direct contact resolution: player vs buildings, player vs enemies,
//! health regeneration and player death.

use glam::DVec3;
use hecs::{Entity, World};
use tracing::{debug, info};

use aerocombat_core::components::{Building, Enemy, Health, Kinematics, Player};
use aerocombat_core::config::Tuning;
use aerocombat_core::enums::{EffectKind, SoundCue};
use aerocombat_core::events::SimEvent;
use aerocombat_core::types::Aabb;

use crate::score::ScoreState;
use crate::world_setup;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: Entity,
    buildings: &[Building],
    tuning: &Tuning,
    dt: f64,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    let (mut kinematics, mut health, mut grace) = {
        let Ok(mut query) = world.query_one::<(&Kinematics, &Health, &Player)>(player) else {
            return;
        };
        let Some((kinematics, health, pilot)) = query.get() else {
            return;
        };
        (*kinematics, *health, pilot.contact_grace)
    };

    if grace <= 0.0 {
        let radius = tuning.player_collision_radius;
        let struck = buildings
            .iter()
            .map(|b| b.bounds())
            .find(|bounds| bounds.expanded(radius).contains(kinematics.position));
        if let Some(bounds) = struck {
            health.damage(tuning.building_contact_damage);
            kinematics.velocity += push_out(&bounds, kinematics.position, radius)
                * tuning.building_push_impulse;
            grace = tuning.building_contact_grace;
            events.push(SimEvent::effect(EffectKind::Explosion, kinematics.position));
            events.push(SimEvent::sound(SoundCue::Explosion));
            debug!(position = ?kinematics.position, "player hit building");
        }
    }

    for (entity, (_enemy, enemy_kinematics, enemy_health)) in
        world.query_mut::<(&Enemy, &Kinematics, &mut Health)>()
    {
        if enemy_health.is_dead() {
            continue;
        }
        let offset = kinematics.position - enemy_kinematics.position;
        let in_reach = offset.length() < tuning.ram_radius;
        if !in_reach {
            continue;
        }

        // A ram always destroys the enemy; the lifecycle sweep removes it.
        enemy_health.current = 0.0;
        health.damage(tuning.ram_damage);
        let away = offset.try_normalize().unwrap_or(DVec3::Y);
        kinematics.velocity += away * tuning.ram_knockback;
        events.push(SimEvent::effect(EffectKind::Explosion, enemy_kinematics.position));
        events.push(SimEvent::sound(SoundCue::Explosion));
        debug!(enemy = ?entity, "player rammed enemy");
    }

    if !health.is_dead() {
        health.heal(tuning.health_regen_rate * dt);
    }

    if let Ok((pilot, k, h)) =
        world.query_one_mut::<(&mut Player, &mut Kinematics, &mut Health)>(player)
    {
        *k = kinematics;
        *h = health;
        pilot.contact_grace = grace;
    }

    if health.is_dead() {
        events.push(SimEvent::effect(EffectKind::Explosion, kinematics.position));
        events.push(SimEvent::sound(SoundCue::Explosion));
        score.deaths += 1;
        info!(position = ?kinematics.position, deaths = score.deaths, "player destroyed, respawning");
        world_setup::respawn_player(world, player, tuning);
    }
}

/// Unit push direction out of `bounds`: along the axis where the point sits
/// furthest from center relative to the (expanded) half extent.
pub fn push_out(bounds: &Aabb, point: DVec3, radius: f64) -> DVec3 {
    let offset = point - bounds.center();
    let half = (bounds.half_extents() + DVec3::splat(radius)).max(DVec3::splat(1e-6));
    let relative = offset / half;
    let magnitude = relative.abs();

    if magnitude.x >= magnitude.y && magnitude.x >= magnitude.z {
        DVec3::X * relative.x.signum()
    } else if magnitude.y >= magnitude.z {
        DVec3::Y * relative.y.signum()
    } else {
        DVec3::Z * relative.z.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower() -> Aabb {
        Building::new(DVec3::ZERO, 100.0, 200.0, 100.0).bounds()
    }

    #[test]
    fn push_out_east_face() {
        let push = push_out(&tower(), DVec3::new(60.0, 100.0, 10.0), 20.0);
        assert_eq!(push, DVec3::X);
    }

    #[test]
    fn push_out_west_face() {
        let push = push_out(&tower(), DVec3::new(-65.0, 80.0, -20.0), 20.0);
        assert_eq!(push, -DVec3::X);
    }

    #[test]
    fn push_out_north_face() {
        let push = push_out(&tower(), DVec3::new(5.0, 100.0, 68.0), 20.0);
        assert_eq!(push, DVec3::Z);
    }

    #[test]
    fn push_out_roof() {
        let push = push_out(&tower(), DVec3::new(0.0, 215.0, 0.0), 20.0);
        assert_eq!(push, DVec3::Y);
    }
}
