//! Simulation constants and default tuning parameters.
//!
//! Distances are in world units, times in seconds. Every value here is a
//! default for a field of [`crate::config::Tuning`].

// --- Tick ---

/// Upper bound on a single tick's delta time (seconds).
/// Bounds integration error and projectile tunneling on slow frames.
pub const MAX_DT: f64 = 0.1;

/// Largest `max_dt` a tuning file may set. Longer steps let projectiles
/// skip through buildings.
pub const MAX_DT_CEILING: f64 = 0.16;

/// Nominal frame rate of the headless driver (Hz).
pub const FRAME_RATE: u32 = 60;

// --- World ---

pub const GRAVITY: f64 = 9.81;
pub const GROUND_HEIGHT: f64 = 0.0;

/// Peak wind acceleration.
pub const WIND_STRENGTH: f64 = 4.0;

/// Angular frequencies of the wind's X and Z oscillation (rad/s).
pub const WIND_FREQ_X: f64 = 0.05;
pub const WIND_FREQ_Z: f64 = 0.037;

// --- Player ---

pub const PLAYER_SPAWN: [f64; 3] = [0.0, 500.0, 0.0];
pub const PLAYER_MAX_HEALTH: f64 = 100.0;
pub const PLAYER_MAX_FUEL: f64 = 100.0;
pub const PLAYER_THRUST_ACCEL: f64 = 400.0;
pub const PLAYER_STRAFE_ACCEL: f64 = 150.0;
pub const PLAYER_LIFT_ACCEL: f64 = 150.0;
pub const PLAYER_DRAG: f64 = 0.98;
pub const PLAYER_GRAVITY_SCALE: f64 = 0.3;
pub const PLAYER_GROUND_MARGIN: f64 = 10.0;

/// Pitch limit so the forward vector never goes vertical.
pub const PLAYER_MAX_PITCH: f64 = 1.4;

/// Roll (radians) per unit of yaw rate, for banking into turns.
pub const PLAYER_BANK_FACTOR: f64 = 0.5;

pub const FUEL_BURN_RATE: f64 = 5.0;
pub const FUEL_REGEN_RATE: f64 = 2.0;
pub const HEALTH_REGEN_RATE: f64 = 2.0;
pub const PLAYER_FIRE_INTERVAL: f64 = 0.15;
pub const ENGINE_TRAIL_INTERVAL: f64 = 0.1;

// --- Enemy ---

pub const ENEMY_MAX_HEALTH: f64 = 50.0;
pub const ENEMY_SPEED: f64 = 220.0;
pub const ENEMY_AGGRO_RANGE: f64 = 1500.0;
pub const ENEMY_ATTACK_RANGE: f64 = 800.0;
pub const ENEMY_DRAG: f64 = 0.97;
pub const ENEMY_GRAVITY_SCALE: f64 = 0.1;
pub const ENEMY_GROUND_MARGIN: f64 = 50.0;

/// Vertical speed floor applied when an enemy hits the ground margin.
pub const ENEMY_MIN_CLIMB: f64 = 10.0;

pub const ENEMY_COOLDOWN_MIN: f64 = 2.0;
pub const ENEMY_COOLDOWN_MAX: f64 = 3.0;

/// Patrol points are drawn within this many units of home on each axis.
pub const PATROL_RADIUS_MIN: f64 = 500.0;
pub const PATROL_RADIUS_MAX: f64 = 1000.0;

/// Distance at which a patrol point counts as reached.
pub const PATROL_ARRIVE_DISTANCE: f64 = 100.0;

// --- Enemy AI thresholds ---

/// Chase drops back to patrol beyond this multiple of aggro range.
pub const CHASE_BREAK_FACTOR: f64 = 1.5;
/// Attack drops back to chase beyond this multiple of attack range.
pub const ATTACK_BREAK_FACTOR: f64 = 1.2;
/// Flee ends beyond this multiple of aggro range.
pub const FLEE_ESCAPE_FACTOR: f64 = 2.0;
/// Attack turns to flee below this fraction of max health.
pub const FLEE_HEALTH_FRACTION: f64 = 0.3;
/// Lead time for interception prediction.
pub const LEAD_TIME: f64 = 2.0;
/// Steering acceleration as a multiple of enemy speed.
pub const STEERING_GAIN: f64 = 2.0;

// --- Projectiles ---

pub const PLAYER_SHOT_SPEED: f64 = 1000.0;
pub const PLAYER_SHOT_DAMAGE: f64 = 25.0;
pub const PLAYER_SHOT_LIFE: f64 = 2.0;
pub const ENEMY_SHOT_SPEED: f64 = 600.0;
pub const ENEMY_SHOT_DAMAGE: f64 = 15.0;
pub const ENEMY_SHOT_LIFE: f64 = 3.0;

/// Distance ahead of the nose where player shots spawn.
pub const MUZZLE_OFFSET: f64 = 25.0;

/// Enemy shot vs player center.
pub const PLAYER_HIT_RADIUS: f64 = 30.0;
/// Player shot vs enemy center.
pub const ENEMY_HIT_RADIUS: f64 = 40.0;
/// Building boxes grow by this much for projectile tests.
pub const PROJECTILE_RADIUS: f64 = 2.0;

// --- Contact ---

pub const PLAYER_COLLISION_RADIUS: f64 = 20.0;
pub const BUILDING_CONTACT_DAMAGE: f64 = 30.0;
pub const BUILDING_PUSH_IMPULSE: f64 = 300.0;
pub const BUILDING_CONTACT_GRACE: f64 = 0.5;
pub const RAM_RADIUS: f64 = 50.0;
pub const RAM_DAMAGE: f64 = 20.0;
pub const RAM_KNOCKBACK: f64 = 250.0;

// --- Spawning ---

pub const INITIAL_WAVE_MIN: u32 = 3;
pub const INITIAL_WAVE_MAX: u32 = 7;
pub const SPAWN_DISTANCE_MIN: f64 = 2000.0;
pub const SPAWN_DISTANCE_MAX: f64 = 3000.0;
pub const SPAWN_ALTITUDE_JITTER: f64 = 200.0;
pub const DESPAWN_RADIUS: f64 = 5000.0;
pub const ENEMY_CAP: u32 = 10;
pub const ENEMY_CAP_MAX: u32 = 16;
/// Seconds of session time per extra cap slot.
pub const CAP_GROWTH_SECS: f64 = 60.0;
/// Expected spawns per second while under the cap, before ramp.
pub const SPAWN_RATE: f64 = 0.3;
/// Seconds of session time for the spawn rate to double.
pub const DIFFICULTY_RAMP_SECS: f64 = 120.0;
