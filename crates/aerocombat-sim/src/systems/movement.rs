//! Movement integration.
//!
//! Applies thrust, scaled gravity and wind to velocity, then per-tick drag,
//! then integrates position. Bodies are clamped above the ground margin.

use glam::DVec3;
use hecs::World;

use aerocombat_core::components::{BodyParams, Enemy, Kinematics};
use aerocombat_core::types::WorldEnv;

/// Integrate one body over `dt` seconds.
pub fn integrate(
    kinematics: &mut Kinematics,
    body: &BodyParams,
    thrust: DVec3,
    env: &WorldEnv,
    dt: f64,
) {
    let gravity = DVec3::new(0.0, -env.gravity * body.gravity_scale, 0.0);
    kinematics.velocity += (thrust + gravity + env.wind) * dt;
    kinematics.velocity *= body.drag;
    kinematics.position += kinematics.velocity * dt;

    let floor = env.ground_height + body.ground_margin;
    if kinematics.position.y < floor {
        kinematics.position.y = floor;
        kinematics.velocity.y = kinematics.velocity.y.max(body.min_vertical_speed);
    }
}

/// Integrate every enemy using the steering chosen by the AI last tick.
pub fn run(world: &mut World, env: &WorldEnv, body: &BodyParams, dt: f64) {
    for (_entity, (enemy, kinematics)) in world.query_mut::<(&Enemy, &mut Kinematics)>() {
        integrate(kinematics, body, enemy.steering, env, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_air() -> WorldEnv {
        WorldEnv::new(0.0, 0.0)
    }

    fn body(drag: f64) -> BodyParams {
        BodyParams {
            drag,
            gravity_scale: 1.0,
            ground_margin: 10.0,
            min_vertical_speed: 0.0,
        }
    }

    #[test]
    fn coasting_body_moves_by_velocity_times_dt() {
        let mut k = Kinematics::new(DVec3::new(0.0, 100.0, 0.0), DVec3::new(50.0, 0.0, 0.0));
        integrate(&mut k, &body(1.0), DVec3::ZERO, &still_air(), 0.1);
        assert_eq!(k.position, DVec3::new(5.0, 100.0, 0.0));
    }

    #[test]
    fn drag_decays_velocity_each_tick() {
        let mut k = Kinematics::new(DVec3::new(0.0, 100.0, 0.0), DVec3::new(100.0, 0.0, 0.0));
        integrate(&mut k, &body(0.9), DVec3::ZERO, &still_air(), 0.01);
        assert!((k.velocity.x - 90.0).abs() < 1e-9);
    }

    #[test]
    fn gravity_scaled_per_body() {
        let env = WorldEnv::new(10.0, 0.0);
        let mut light = Kinematics::new(DVec3::new(0.0, 500.0, 0.0), DVec3::ZERO);
        let mut heavy = light;
        let light_body = BodyParams {
            gravity_scale: 0.1,
            ..body(1.0)
        };
        integrate(&mut light, &light_body, DVec3::ZERO, &env, 0.1);
        integrate(&mut heavy, &body(1.0), DVec3::ZERO, &env, 0.1);
        assert!((light.velocity.y + 0.1).abs() < 1e-9);
        assert!((heavy.velocity.y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn wind_pushes_velocity() {
        let mut env = still_air();
        env.wind = DVec3::new(5.0, 0.0, 0.0);
        let mut k = Kinematics::new(DVec3::new(0.0, 100.0, 0.0), DVec3::ZERO);
        integrate(&mut k, &body(1.0), DVec3::ZERO, &env, 0.1);
        assert!((k.velocity.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn ground_clamp_zeroes_descent_for_player_body() {
        let mut k = Kinematics::new(DVec3::new(0.0, 11.0, 0.0), DVec3::new(0.0, -100.0, 0.0));
        integrate(&mut k, &body(1.0), DVec3::ZERO, &still_air(), 0.1);
        assert_eq!(k.position.y, 10.0);
        assert_eq!(k.velocity.y, 0.0);
    }

    #[test]
    fn ground_clamp_keeps_enemies_climbing() {
        let enemy_body = BodyParams {
            min_vertical_speed: 10.0,
            ..body(1.0)
        };
        let mut k = Kinematics::new(DVec3::new(0.0, 11.0, 0.0), DVec3::new(0.0, -100.0, 0.0));
        integrate(&mut k, &enemy_body, DVec3::ZERO, &still_air(), 0.1);
        assert_eq!(k.position.y, 10.0);
        assert_eq!(k.velocity.y, 10.0);
    }

    #[test]
    fn ground_clamp_leaves_climb_alone() {
        let mut k = Kinematics::new(DVec3::new(0.0, 5.0, 0.0), DVec3::new(0.0, 20.0, 0.0));
        integrate(&mut k, &body(1.0), DVec3::ZERO, &still_air(), 0.1);
        assert_eq!(k.position.y, 10.0);
        assert_eq!(k.velocity.y, 20.0);
    }
}
