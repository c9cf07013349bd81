//! Startup tuning.
//!
//! `Tuning` holds every gameplay constant the simulation reads. Defaults come
//! from [`crate::constants`]; a JSON file may override any subset of fields.
//! Values are validated once at load and never mutated afterwards.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::BodyParams;
use crate::constants::*;

/// Errors raised while loading or validating tuning.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay tuning, read at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // World
    pub max_dt: f64,
    pub gravity: f64,
    pub ground_height: f64,
    pub wind_strength: f64,
    pub wind_freq_x: f64,
    pub wind_freq_z: f64,

    // Player
    pub player_spawn: [f64; 3],
    pub player_max_health: f64,
    pub player_max_fuel: f64,
    pub player_thrust_accel: f64,
    pub player_strafe_accel: f64,
    pub player_lift_accel: f64,
    pub player_drag: f64,
    pub player_gravity_scale: f64,
    pub player_ground_margin: f64,
    pub player_max_pitch: f64,
    pub player_bank_factor: f64,
    pub fuel_burn_rate: f64,
    pub fuel_regen_rate: f64,
    pub health_regen_rate: f64,
    pub player_fire_interval: f64,
    pub engine_trail_interval: f64,

    // Enemy
    pub enemy_max_health: f64,
    pub enemy_speed: f64,
    pub enemy_aggro_range: f64,
    pub enemy_attack_range: f64,
    pub enemy_drag: f64,
    pub enemy_gravity_scale: f64,
    pub enemy_ground_margin: f64,
    pub enemy_min_climb: f64,
    pub enemy_cooldown_min: f64,
    pub enemy_cooldown_max: f64,
    pub patrol_radius_min: f64,
    pub patrol_radius_max: f64,
    pub patrol_arrive_distance: f64,

    // Projectiles
    pub player_shot_speed: f64,
    pub player_shot_damage: f64,
    pub player_shot_life: f64,
    pub enemy_shot_speed: f64,
    pub enemy_shot_damage: f64,
    pub enemy_shot_life: f64,
    pub muzzle_offset: f64,
    pub player_hit_radius: f64,
    pub enemy_hit_radius: f64,
    pub projectile_radius: f64,

    // Contact
    pub player_collision_radius: f64,
    pub building_contact_damage: f64,
    pub building_push_impulse: f64,
    pub building_contact_grace: f64,
    pub ram_radius: f64,
    pub ram_damage: f64,
    pub ram_knockback: f64,

    // Spawning
    pub initial_wave_min: u32,
    pub initial_wave_max: u32,
    pub spawn_distance_min: f64,
    pub spawn_distance_max: f64,
    pub spawn_altitude_jitter: f64,
    pub despawn_radius: f64,
    pub enemy_cap: u32,
    pub enemy_cap_max: u32,
    pub cap_growth_secs: f64,
    pub spawn_rate: f64,
    pub difficulty_ramp_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_dt: MAX_DT,
            gravity: GRAVITY,
            ground_height: GROUND_HEIGHT,
            wind_strength: WIND_STRENGTH,
            wind_freq_x: WIND_FREQ_X,
            wind_freq_z: WIND_FREQ_Z,

            player_spawn: PLAYER_SPAWN,
            player_max_health: PLAYER_MAX_HEALTH,
            player_max_fuel: PLAYER_MAX_FUEL,
            player_thrust_accel: PLAYER_THRUST_ACCEL,
            player_strafe_accel: PLAYER_STRAFE_ACCEL,
            player_lift_accel: PLAYER_LIFT_ACCEL,
            player_drag: PLAYER_DRAG,
            player_gravity_scale: PLAYER_GRAVITY_SCALE,
            player_ground_margin: PLAYER_GROUND_MARGIN,
            player_max_pitch: PLAYER_MAX_PITCH,
            player_bank_factor: PLAYER_BANK_FACTOR,
            fuel_burn_rate: FUEL_BURN_RATE,
            fuel_regen_rate: FUEL_REGEN_RATE,
            health_regen_rate: HEALTH_REGEN_RATE,
            player_fire_interval: PLAYER_FIRE_INTERVAL,
            engine_trail_interval: ENGINE_TRAIL_INTERVAL,

            enemy_max_health: ENEMY_MAX_HEALTH,
            enemy_speed: ENEMY_SPEED,
            enemy_aggro_range: ENEMY_AGGRO_RANGE,
            enemy_attack_range: ENEMY_ATTACK_RANGE,
            enemy_drag: ENEMY_DRAG,
            enemy_gravity_scale: ENEMY_GRAVITY_SCALE,
            enemy_ground_margin: ENEMY_GROUND_MARGIN,
            enemy_min_climb: ENEMY_MIN_CLIMB,
            enemy_cooldown_min: ENEMY_COOLDOWN_MIN,
            enemy_cooldown_max: ENEMY_COOLDOWN_MAX,
            patrol_radius_min: PATROL_RADIUS_MIN,
            patrol_radius_max: PATROL_RADIUS_MAX,
            patrol_arrive_distance: PATROL_ARRIVE_DISTANCE,

            player_shot_speed: PLAYER_SHOT_SPEED,
            player_shot_damage: PLAYER_SHOT_DAMAGE,
            player_shot_life: PLAYER_SHOT_LIFE,
            enemy_shot_speed: ENEMY_SHOT_SPEED,
            enemy_shot_damage: ENEMY_SHOT_DAMAGE,
            enemy_shot_life: ENEMY_SHOT_LIFE,
            muzzle_offset: MUZZLE_OFFSET,
            player_hit_radius: PLAYER_HIT_RADIUS,
            enemy_hit_radius: ENEMY_HIT_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,

            player_collision_radius: PLAYER_COLLISION_RADIUS,
            building_contact_damage: BUILDING_CONTACT_DAMAGE,
            building_push_impulse: BUILDING_PUSH_IMPULSE,
            building_contact_grace: BUILDING_CONTACT_GRACE,
            ram_radius: RAM_RADIUS,
            ram_damage: RAM_DAMAGE,
            ram_knockback: RAM_KNOCKBACK,

            initial_wave_min: INITIAL_WAVE_MIN,
            initial_wave_max: INITIAL_WAVE_MAX,
            spawn_distance_min: SPAWN_DISTANCE_MIN,
            spawn_distance_max: SPAWN_DISTANCE_MAX,
            spawn_altitude_jitter: SPAWN_ALTITUDE_JITTER,
            despawn_radius: DESPAWN_RADIUS,
            enemy_cap: ENEMY_CAP,
            enemy_cap_max: ENEMY_CAP_MAX,
            cap_growth_secs: CAP_GROWTH_SECS,
            spawn_rate: SPAWN_RATE,
            difficulty_ramp_secs: DIFFICULTY_RAMP_SECS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("max_dt", self.max_dt),
            ("gravity", self.gravity),
            ("ground_height", self.ground_height),
            ("wind_strength", self.wind_strength),
            ("player_spawn", self.player_spawn.iter().sum()),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }

        let positive = [
            ("max_dt", self.max_dt),
            ("player_max_health", self.player_max_health),
            ("player_max_fuel", self.player_max_fuel),
            ("enemy_max_health", self.enemy_max_health),
            ("enemy_speed", self.enemy_speed),
            ("enemy_aggro_range", self.enemy_aggro_range),
            ("enemy_attack_range", self.enemy_attack_range),
            ("player_shot_speed", self.player_shot_speed),
            ("enemy_shot_speed", self.enemy_shot_speed),
            ("player_shot_life", self.player_shot_life),
            ("enemy_shot_life", self.enemy_shot_life),
            ("despawn_radius", self.despawn_radius),
            ("patrol_arrive_distance", self.patrol_arrive_distance),
            ("cap_growth_secs", self.cap_growth_secs),
            ("difficulty_ramp_secs", self.difficulty_ramp_secs),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if self.max_dt > MAX_DT_CEILING {
            return Err(invalid(
                "max_dt",
                format!("must not exceed {MAX_DT_CEILING}, got {}", self.max_dt),
            ));
        }

        let radii = [
            ("player_hit_radius", self.player_hit_radius),
            ("enemy_hit_radius", self.enemy_hit_radius),
            ("projectile_radius", self.projectile_radius),
            ("player_collision_radius", self.player_collision_radius),
            ("ram_radius", self.ram_radius),
        ];
        for (field, value) in radii {
            if !(value >= 0.0) {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }

        for (field, value) in [
            ("player_drag", self.player_drag),
            ("enemy_drag", self.enemy_drag),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(field, format!("must be in (0, 1], got {value}")));
            }
        }

        ordered(
            "enemy_cooldown_max",
            self.enemy_cooldown_min,
            self.enemy_cooldown_max,
        )?;
        ordered(
            "patrol_radius_max",
            self.patrol_radius_min,
            self.patrol_radius_max,
        )?;
        ordered(
            "spawn_distance_max",
            self.spawn_distance_min,
            self.spawn_distance_max,
        )?;
        if self.initial_wave_min > self.initial_wave_max {
            return Err(invalid(
                "initial_wave_max",
                format!(
                    "{} is below initial_wave_min {}",
                    self.initial_wave_max, self.initial_wave_min
                ),
            ));
        }
        if self.enemy_cap > self.enemy_cap_max {
            return Err(invalid(
                "enemy_cap_max",
                format!(
                    "{} is below enemy_cap {}",
                    self.enemy_cap_max, self.enemy_cap
                ),
            ));
        }
        if self.enemy_attack_range > self.enemy_aggro_range {
            return Err(invalid(
                "enemy_attack_range",
                "must not exceed enemy_aggro_range".to_string(),
            ));
        }
        if self.spawn_distance_max >= self.despawn_radius {
            return Err(invalid(
                "spawn_distance_max",
                "must be inside despawn_radius".to_string(),
            ));
        }
        if !(self.spawn_altitude_jitter >= 0.0) {
            return Err(invalid(
                "spawn_altitude_jitter",
                "must not be negative".to_string(),
            ));
        }
        if self.spawn_rate < 0.0 {
            return Err(invalid("spawn_rate", "must not be negative".to_string()));
        }
        Ok(())
    }

    pub fn player_spawn(&self) -> DVec3 {
        DVec3::from_array(self.player_spawn)
    }

    pub fn player_body(&self) -> BodyParams {
        BodyParams {
            drag: self.player_drag,
            gravity_scale: self.player_gravity_scale,
            ground_margin: self.player_ground_margin,
            min_vertical_speed: 0.0,
        }
    }

    pub fn enemy_body(&self) -> BodyParams {
        BodyParams {
            drag: self.enemy_drag,
            gravity_scale: self.enemy_gravity_scale,
            ground_margin: self.enemy_ground_margin,
            min_vertical_speed: self.enemy_min_climb,
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min < 0.0 || !(min <= max) {
        return Err(invalid(field, format!("range {min}..{max} is not ordered")));
    }
    Ok(())
}
