#[cfg(test)]
mod tests {
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use aerocombat_core::constants::*;
    use aerocombat_core::enums::AiState;

    use crate::fsm::{evaluate, flee_target, lead_target, next_state, EnemyContext};
    use crate::patrol::random_patrol_point;

    /// Enemy at the origin, player `distance` units away along +X.
    fn make_context(state: AiState, distance: f64, health: f64) -> EnemyContext {
        EnemyContext {
            state,
            position: DVec3::new(0.0, 500.0, 0.0),
            health,
            max_health: 50.0,
            aggro_range: 1500.0,
            attack_range: 800.0,
            speed: 200.0,
            patrol_target: DVec3::new(0.0, 500.0, 900.0),
            patrol_arrive_distance: PATROL_ARRIVE_DISTANCE,
            player_position: DVec3::new(distance, 500.0, 0.0),
            player_velocity: DVec3::ZERO,
            shot_ready: false,
        }
    }

    // ---- Transitions ----

    #[test]
    fn test_patrol_to_chase_inside_aggro() {
        let ctx = make_context(AiState::Patrol, 200.0, 50.0);
        let update = evaluate(&ctx);
        assert!(update.state_changed);
        assert_eq!(update.new_state, AiState::Chase);
    }

    #[test]
    fn test_patrol_takes_one_step_per_evaluation() {
        // 200 is also inside attack range, but patrol only moves to chase.
        let ctx = make_context(AiState::Patrol, 200.0, 50.0);
        assert_eq!(next_state(&ctx), AiState::Chase);
    }

    #[test]
    fn test_patrol_stays_outside_aggro() {
        let ctx = make_context(AiState::Patrol, 1500.0, 50.0);
        let update = evaluate(&ctx);
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AiState::Patrol);
    }

    #[test]
    fn test_chase_to_patrol_beyond_hysteresis() {
        let ctx = make_context(AiState::Chase, 1500.0 * 1.5 + 1.0, 50.0);
        assert_eq!(next_state(&ctx), AiState::Patrol);
    }

    #[test]
    fn test_chase_holds_between_aggro_and_hysteresis() {
        let ctx = make_context(AiState::Chase, 2000.0, 50.0);
        assert_eq!(next_state(&ctx), AiState::Chase);
    }

    #[test]
    fn test_chase_to_attack_inside_attack_range() {
        let ctx = make_context(AiState::Chase, 700.0, 50.0);
        assert_eq!(next_state(&ctx), AiState::Attack);
    }

    #[test]
    fn test_chase_at_exact_attack_range_attacks() {
        let ctx = make_context(AiState::Chase, 800.0, 50.0);
        assert_eq!(next_state(&ctx), AiState::Attack);
    }

    #[test]
    fn test_chase_just_outside_attack_range_stays_chase() {
        let ctx = make_context(AiState::Chase, 800.0 + 1e-6, 50.0);
        assert_eq!(next_state(&ctx), AiState::Chase);
    }

    #[test]
    fn test_attack_holds_until_break_range() {
        let ctx = make_context(AiState::Attack, 800.0 * 1.2, 50.0);
        assert_eq!(next_state(&ctx), AiState::Attack);
        let ctx = make_context(AiState::Attack, 800.0 * 1.2 + 0.5, 50.0);
        assert_eq!(next_state(&ctx), AiState::Chase);
    }

    #[test]
    fn test_attack_to_flee_on_low_health() {
        // 14 / 50 = 28% < 30%
        let ctx = make_context(AiState::Attack, 500.0, 14.0);
        assert_eq!(next_state(&ctx), AiState::Flee);
    }

    #[test]
    fn test_attack_to_flee_regardless_of_distance() {
        let ctx = make_context(AiState::Attack, 5000.0, 14.0);
        assert_eq!(next_state(&ctx), AiState::Flee);
    }

    #[test]
    fn test_attack_at_thirty_percent_does_not_flee() {
        let ctx = make_context(AiState::Attack, 500.0, 15.0);
        assert_eq!(next_state(&ctx), AiState::Attack);
    }

    #[test]
    fn test_flee_to_patrol_restores_health() {
        let ctx = make_context(AiState::Flee, 3001.0, 10.0);
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Patrol);
        assert!(update.restore_health);
    }

    #[test]
    fn test_flee_holds_inside_escape_range() {
        let ctx = make_context(AiState::Flee, 2999.0, 10.0);
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Flee);
        assert!(!update.restore_health);
    }

    #[test]
    fn test_patrol_never_restores_health() {
        let ctx = make_context(AiState::Patrol, 4000.0, 10.0);
        assert!(!evaluate(&ctx).restore_health);
    }

    // ---- Behavior ----

    #[test]
    fn test_chase_targets_lead_point() {
        let mut ctx = make_context(AiState::Chase, 1000.0, 50.0);
        ctx.player_velocity = DVec3::new(0.0, 0.0, 100.0);
        let update = evaluate(&ctx);
        assert_eq!(update.target, DVec3::new(1000.0, 500.0, 200.0));
        assert_eq!(update.target, lead_target(&ctx));
    }

    #[test]
    fn test_steering_magnitude_is_twice_speed() {
        let ctx = make_context(AiState::Chase, 1000.0, 50.0);
        let update = evaluate(&ctx);
        assert!((update.steering.length() - 400.0).abs() < 1e-9);
        assert!(update.steering.x > 0.0, "should steer toward the player");
    }

    #[test]
    fn test_attack_fires_at_current_position_when_ready() {
        let mut ctx = make_context(AiState::Attack, 600.0, 50.0);
        ctx.player_velocity = DVec3::new(0.0, 0.0, 100.0);
        ctx.shot_ready = true;
        let update = evaluate(&ctx);
        assert_eq!(update.fire_at, Some(ctx.player_position));
        // Steering still uses the lead point.
        assert_eq!(update.target, lead_target(&ctx));
    }

    #[test]
    fn test_attack_holds_fire_during_cooldown() {
        let ctx = make_context(AiState::Attack, 600.0, 50.0);
        assert_eq!(evaluate(&ctx).fire_at, None);
    }

    #[test]
    fn test_entering_attack_fires_same_evaluation() {
        let mut ctx = make_context(AiState::Chase, 700.0, 50.0);
        ctx.shot_ready = true;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Attack);
        assert!(update.fire_at.is_some());
    }

    #[test]
    fn test_chase_never_fires() {
        let mut ctx = make_context(AiState::Chase, 1000.0, 50.0);
        ctx.shot_ready = true;
        assert_eq!(evaluate(&ctx).fire_at, None);
    }

    #[test]
    fn test_flee_steers_away_from_player() {
        let ctx = make_context(AiState::Flee, 1000.0, 10.0);
        let update = evaluate(&ctx);
        assert_eq!(update.target, flee_target(&ctx));
        assert_eq!(update.target, DVec3::new(-1000.0, 500.0, 0.0));
        assert!(update.steering.x < 0.0);
    }

    #[test]
    fn test_orientation_faces_target() {
        let ctx = make_context(AiState::Chase, 1000.0, 50.0);
        let update = evaluate(&ctx);
        let forward = update.orientation.forward();
        assert!((forward - DVec3::X).length() < 1e-9, "forward was {forward:?}");
    }

    #[test]
    fn test_patrol_reached_within_arrive_distance() {
        let mut ctx = make_context(AiState::Patrol, 4000.0, 50.0);
        ctx.patrol_target = ctx.position + DVec3::new(0.0, 0.0, 99.0);
        assert!(evaluate(&ctx).patrol_reached);
        ctx.patrol_target = ctx.position + DVec3::new(0.0, 0.0, 101.0);
        assert!(!evaluate(&ctx).patrol_reached);
    }

    #[test]
    fn test_at_target_steering_is_zero() {
        let mut ctx = make_context(AiState::Patrol, 4000.0, 50.0);
        ctx.patrol_target = ctx.position;
        let update = evaluate(&ctx);
        assert_eq!(update.steering, DVec3::ZERO);
    }

    // ---- Patrol points ----

    #[test]
    fn test_patrol_points_stay_within_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let home = DVec3::new(100.0, 400.0, -300.0);
        for _ in 0..500 {
            let p = random_patrol_point(&mut rng, home, 500.0, 1000.0, 50.0);
            assert!((p.x - home.x).abs() <= 1000.0);
            assert!((p.z - home.z).abs() <= 1000.0);
            assert!(p.y >= 50.0);
        }
    }

    #[test]
    fn test_patrol_points_are_seeded() {
        let home = DVec3::new(0.0, 500.0, 0.0);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(
                random_patrol_point(&mut a, home, 500.0, 1000.0, 50.0),
                random_patrol_point(&mut b, home, 500.0, 1000.0, 50.0)
            );
        }
    }
}
