//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions, steering, and fire
//! decisions for one enemy based on its state and the player's situation.
//! No ECS dependency and no randomness: the caller owns timers, the RNG,
//! and applies the returned update.

use glam::DVec3;

use aerocombat_core::constants::*;
use aerocombat_core::enums::AiState;
use aerocombat_core::types::Orientation;

/// Input to the FSM for a single enemy.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub state: AiState,
    pub position: DVec3,
    pub health: f64,
    pub max_health: f64,
    pub aggro_range: f64,
    pub attack_range: f64,
    pub speed: f64,
    pub patrol_target: DVec3,
    pub patrol_arrive_distance: f64,
    pub player_position: DVec3,
    pub player_velocity: DVec3,
    /// The shot countdown has reached zero.
    pub shot_ready: bool,
}

impl EnemyContext {
    pub fn distance_to_player(&self) -> f64 {
        self.position.distance(self.player_position)
    }
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
    /// Point the enemy is steering toward this tick.
    pub target: DVec3,
    /// Steering acceleration toward `target`.
    pub steering: DVec3,
    pub orientation: Orientation,
    /// Fire a shot at this point (the player's current position).
    pub fire_at: Option<DVec3>,
    /// The enemy escaped and regenerates to full health.
    pub restore_health: bool,
    /// The enemy reached its patrol point and needs a new one.
    pub patrol_reached: bool,
}

/// Evaluate the FSM for one enemy: at most one transition, then the
/// behavior of the resulting state.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let new_state = next_state(ctx);
    let state_changed = new_state != ctx.state;
    let restore_health = ctx.state == AiState::Flee && new_state == AiState::Patrol;

    let (target, fire_at, patrol_reached) = match new_state {
        AiState::Patrol => {
            let reached =
                ctx.position.distance(ctx.patrol_target) < ctx.patrol_arrive_distance;
            (ctx.patrol_target, None, reached)
        }
        AiState::Chase => (lead_target(ctx), None, false),
        AiState::Attack => {
            let fire_at = ctx.shot_ready.then_some(ctx.player_position);
            (lead_target(ctx), fire_at, false)
        }
        AiState::Flee => (flee_target(ctx), None, false),
    };

    let heading = target - ctx.position;
    EnemyUpdate {
        new_state,
        state_changed,
        target,
        steering: steering_toward(ctx.position, target, ctx.speed),
        orientation: Orientation::facing(heading),
        fire_at,
        restore_health,
        patrol_reached,
    }
}

/// Transition predicate. Exit thresholds use hysteresis multiples; an enemy
/// exactly at attack range counts as inside it.
pub fn next_state(ctx: &EnemyContext) -> AiState {
    let distance = ctx.distance_to_player();

    match ctx.state {
        AiState::Patrol => {
            if distance < ctx.aggro_range {
                AiState::Chase
            } else {
                AiState::Patrol
            }
        }
        AiState::Chase => {
            if distance > ctx.aggro_range * CHASE_BREAK_FACTOR {
                AiState::Patrol
            } else if distance <= ctx.attack_range {
                AiState::Attack
            } else {
                AiState::Chase
            }
        }
        AiState::Attack => {
            // Low health wins over range so a damaged enemy always breaks off.
            if ctx.health < ctx.max_health * FLEE_HEALTH_FRACTION {
                AiState::Flee
            } else if distance > ctx.attack_range * ATTACK_BREAK_FACTOR {
                AiState::Chase
            } else {
                AiState::Attack
            }
        }
        AiState::Flee => {
            if distance > ctx.aggro_range * FLEE_ESCAPE_FACTOR {
                AiState::Patrol
            } else {
                AiState::Flee
            }
        }
    }
}

/// Player position extrapolated by `LEAD_TIME` seconds of its velocity.
pub fn lead_target(ctx: &EnemyContext) -> DVec3 {
    ctx.player_position + ctx.player_velocity * LEAD_TIME
}

/// Point mirrored through the enemy, directly away from the player.
pub fn flee_target(ctx: &EnemyContext) -> DVec3 {
    ctx.position - (ctx.player_position - ctx.position)
}

/// Acceleration of magnitude `speed * STEERING_GAIN` toward `target`.
/// Zero when already at the target.
pub fn steering_toward(position: DVec3, target: DVec3, speed: f64) -> DVec3 {
    (target - position).normalize_or_zero() * speed * STEERING_GAIN
}
