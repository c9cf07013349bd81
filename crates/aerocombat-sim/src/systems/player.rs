//! Player flight system: attitude, fuel, thrust, integration and gun trigger.

use glam::DVec3;
use hecs::{Entity, World};

use aerocombat_core::commands::ControlInput;
use aerocombat_core::components::{Kinematics, Player};
use aerocombat_core::config::Tuning;
use aerocombat_core::enums::EffectKind;
use aerocombat_core::events::SimEvent;
use aerocombat_core::types::{Orientation, WorldEnv};

use crate::systems::movement;
use crate::systems::projectiles::FireRequest;

/// Fly the player for one tick. A pending trigger pull becomes a fire
/// request once the gun's fire interval has elapsed.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: Entity,
    controls: &ControlInput,
    trigger: bool,
    env: &WorldEnv,
    tuning: &Tuning,
    dt: f64,
    fire_requests: &mut Vec<FireRequest>,
    events: &mut Vec<SimEvent>,
) {
    let Ok((pilot, kinematics, orientation)) =
        world.query_one_mut::<(&mut Player, &mut Kinematics, &mut Orientation)>(player)
    else {
        return;
    };

    steer(orientation, controls, tuning, dt);

    // Forward thrust needs fuel; braking and strafing do not.
    let forward = if pilot.fuel > 0.0 {
        controls.forward
    } else {
        controls.forward.min(0.0)
    };
    if forward > 0.0 {
        pilot.fuel -= tuning.fuel_burn_rate * forward * dt;
    } else {
        pilot.fuel += tuning.fuel_regen_rate * dt;
    }
    pilot.fuel = pilot.fuel.clamp(0.0, tuning.player_max_fuel);

    let thrust = orientation.forward() * forward * tuning.player_thrust_accel
        + orientation.right() * controls.strafe * tuning.player_strafe_accel
        + DVec3::Y * controls.vertical * tuning.player_lift_accel;

    movement::integrate(kinematics, &tuning.player_body(), thrust, env, dt);
    pilot.speed = kinematics.velocity.length();

    pilot.fire_cooldown = (pilot.fire_cooldown - dt).max(0.0);
    pilot.contact_grace = (pilot.contact_grace - dt).max(0.0);

    if forward > 0.0 {
        pilot.trail_timer -= dt;
        if pilot.trail_timer <= 0.0 {
            events.push(SimEvent::effect(EffectKind::EngineTrail, kinematics.position));
            pilot.trail_timer = tuning.engine_trail_interval;
        }
    } else {
        pilot.trail_timer = 0.0;
    }

    if trigger && pilot.fire_cooldown <= 0.0 {
        let direction = orientation.forward();
        fire_requests.push(FireRequest::player(
            kinematics.position + direction * tuning.muzzle_offset,
            direction,
            kinematics.velocity,
            tuning,
        ));
        pilot.fire_cooldown = tuning.player_fire_interval;
    }
}

/// Apply yaw/pitch rates. Pitch is limited short of vertical; roll banks
/// into the turn.
fn steer(orientation: &mut Orientation, controls: &ControlInput, tuning: &Tuning, dt: f64) {
    orientation.yaw = (orientation.yaw + controls.yaw_rate * dt).rem_euclid(std::f64::consts::TAU);
    orientation.pitch = (orientation.pitch + controls.pitch_rate * dt)
        .clamp(-tuning.player_max_pitch, tuning.player_max_pitch);
    orientation.roll = -controls.yaw_rate * tuning.player_bank_factor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::spawn_player;

    fn calm_tuning() -> Tuning {
        Tuning {
            gravity: 0.0,
            wind_strength: 0.0,
            ..Default::default()
        }
    }

    fn fly(
        world: &mut World,
        player: Entity,
        controls: ControlInput,
        trigger: bool,
        tuning: &Tuning,
    ) -> (Vec<FireRequest>, Vec<SimEvent>) {
        let env = WorldEnv::new(tuning.gravity, tuning.ground_height);
        let mut requests = Vec::new();
        let mut events = Vec::new();
        run(
            world,
            player,
            &controls,
            trigger,
            &env,
            tuning,
            1.0 / 60.0,
            &mut requests,
            &mut events,
        );
        (requests, events)
    }

    #[test]
    fn forward_thrust_burns_fuel_and_accelerates() {
        let tuning = calm_tuning();
        let mut world = World::new();
        let player = spawn_player(&mut world, &tuning);

        let controls = ControlInput {
            forward: 1.0,
            ..Default::default()
        };
        fly(&mut world, player, controls, false, &tuning);

        let pilot = world.get::<&Player>(player).unwrap();
        let kinematics = world.get::<&Kinematics>(player).unwrap();
        assert!(pilot.fuel < tuning.player_max_fuel);
        assert!(kinematics.velocity.z > 0.0, "yaw 0 faces +Z");
        assert!((pilot.speed - kinematics.velocity.length()).abs() < 1e-12);
    }

    #[test]
    fn empty_tank_suppresses_forward_thrust() {
        let tuning = calm_tuning();
        let mut world = World::new();
        let player = spawn_player(&mut world, &tuning);
        world.get::<&mut Player>(player).unwrap().fuel = 0.0;

        let controls = ControlInput {
            forward: 1.0,
            ..Default::default()
        };
        fly(&mut world, player, controls, false, &tuning);

        let kinematics = world.get::<&Kinematics>(player).unwrap();
        assert_eq!(kinematics.velocity, DVec3::ZERO);
        // Not thrusting, so the tank starts refilling.
        assert!(world.get::<&Player>(player).unwrap().fuel > 0.0);
    }

    #[test]
    fn engine_trail_emitted_while_thrusting() {
        let tuning = calm_tuning();
        let mut world = World::new();
        let player = spawn_player(&mut world, &tuning);
        let controls = ControlInput {
            forward: 1.0,
            ..Default::default()
        };
        let (_, events) = fly(&mut world, player, controls, false, &tuning);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::Effect {
                kind: EffectKind::EngineTrail,
                ..
            }
        )));

        // Next tick is inside the trail interval.
        let (_, events) = fly(&mut world, player, controls, false, &tuning);
        assert!(events.is_empty());
    }

    #[test]
    fn pitch_is_limited() {
        let tuning = calm_tuning();
        let mut world = World::new();
        let player = spawn_player(&mut world, &tuning);
        let controls = ControlInput {
            pitch_rate: 1000.0,
            ..Default::default()
        };
        fly(&mut world, player, controls, false, &tuning);
        let orientation = *world.get::<&Orientation>(player).unwrap();
        assert_eq!(orientation.pitch, tuning.player_max_pitch);
    }

    #[test]
    fn trigger_respects_fire_interval() {
        let tuning = calm_tuning();
        let mut world = World::new();
        let player = spawn_player(&mut world, &tuning);

        let (requests, _) = fly(&mut world, player, ControlInput::default(), true, &tuning);
        assert_eq!(requests.len(), 1);
        let (requests, _) = fly(&mut world, player, ControlInput::default(), true, &tuning);
        assert!(requests.is_empty(), "second shot inside fire interval");
    }

    #[test]
    fn shot_leaves_from_the_nose() {
        let tuning = calm_tuning();
        let mut world = World::new();
        let player = spawn_player(&mut world, &tuning);
        let (requests, _) = fly(&mut world, player, ControlInput::default(), true, &tuning);
        let request = &requests[0];
        let position = world.get::<&Kinematics>(player).unwrap().position;
        assert!((request.origin - (position + DVec3::Z * tuning.muzzle_offset)).length() < 1e-9);
        assert_eq!(request.direction, DVec3::Z);
    }
}
