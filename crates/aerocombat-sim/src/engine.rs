//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `SimSnapshot`s. Completely headless, so
//! it can be driven deterministically from tests.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use aerocombat_core::commands::{ControlInput, PlayerCommand};
use aerocombat_core::components::Building;
use aerocombat_core::config::Tuning;
use aerocombat_core::enums::SessionPhase;
use aerocombat_core::events::SimEvent;
use aerocombat_core::state::SimSnapshot;
use aerocombat_core::types::{SimTime, WorldEnv};

use crate::score::ScoreState;
use crate::systems;
use crate::systems::projectiles::FireRequest;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    buildings: Vec<Building>,
    tuning: Tuning,
    env: WorldEnv,
    phase: SessionPhase,
    rng: ChaCha8Rng,
    controls: ControlInput,
    trigger: bool,
    command_queue: VecDeque<PlayerCommand>,
    fire_requests: Vec<FireRequest>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    score: ScoreState,
    player: Option<Entity>,
}

impl SimulationEngine {
    /// Create an idle engine. `buildings` are the static colliders for
    /// every session this engine runs.
    pub fn new(config: SimConfig, buildings: Vec<Building>) -> Self {
        let env = WorldEnv::new(config.tuning.gravity, config.tuning.ground_height);
        Self {
            world: World::new(),
            buildings,
            tuning: config.tuning,
            env,
            phase: SessionPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            controls: ControlInput::default(),
            trigger: false,
            command_queue: VecDeque::new(),
            fire_requests: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            player: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Latch the flight controls read by every following tick.
    pub fn set_controls(&mut self, controls: ControlInput) {
        self.controls = controls.sanitized();
    }

    /// Process queued commands, then advance one tick if the session is
    /// active. `dt` is clamped to `[0, max_dt]`.
    pub fn update(&mut self, dt: f64) {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            let dt = clamp_dt(dt, self.tuning.max_dt);
            self.run_systems(dt);
            self.env.time.advance(dt);
        }
        self.trigger = false;
    }

    /// Build a snapshot of the current visible state.
    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            &self.env,
            self.phase,
            &self.score,
        )
    }

    /// Take every effect and sound event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.env.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Place a patrolling enemy at an exact position (for testing).
    #[cfg(test)]
    pub fn spawn_enemy_at(&mut self, position: glam::DVec3) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &mut self.rng, position, &self.tuning)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession => {
                if self.phase == SessionPhase::Idle {
                    self.start_session();
                }
            }
            PlayerCommand::Restart => {
                self.start_session();
            }
            PlayerCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                    info!(tick = self.env.time.tick, "session paused");
                }
            }
            PlayerCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                    info!(tick = self.env.time.tick, "session resumed");
                }
            }
            PlayerCommand::FireWeapon => {
                if self.phase == SessionPhase::Active {
                    self.trigger = true;
                }
            }
        }
    }

    /// Reset the world and spawn the player plus the opening wave.
    fn start_session(&mut self) {
        self.world.clear();
        self.env = WorldEnv::new(self.tuning.gravity, self.tuning.ground_height);
        self.score = ScoreState::default();
        self.events.clear();
        self.fire_requests.clear();
        self.despawn_buffer.clear();

        let player = world_setup::spawn_player(&mut self.world, &self.tuning);
        let spawned = world_setup::spawn_initial_wave(
            &mut self.world,
            &mut self.rng,
            self.tuning.player_spawn(),
            &self.tuning,
        );
        self.score.enemies_spawned = spawned;
        self.player = Some(player);
        self.phase = SessionPhase::Active;

        info!(
            enemies = spawned,
            buildings = self.buildings.len(),
            "session started"
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let Some(player) = self.player else {
            return;
        };

        // 1. Wind refresh
        systems::wind::run(&mut self.env, &self.tuning);
        // 2. Player flight + trigger
        systems::player::run(
            &mut self.world,
            player,
            &self.controls,
            self.trigger,
            &self.env,
            &self.tuning,
            dt,
            &mut self.fire_requests,
            &mut self.events,
        );
        // 3. Enemy movement
        systems::movement::run(&mut self.world, &self.env, &self.tuning.enemy_body(), dt);
        // 4. Enemy AI (steering, fire requests)
        systems::enemy_ai::run(
            &mut self.world,
            player,
            &mut self.rng,
            &self.tuning,
            dt,
            &mut self.fire_requests,
        );
        // 5. Projectiles (advance, resolve, spawn requested shots)
        systems::projectiles::run(
            &mut self.world,
            player,
            &self.buildings,
            &self.env,
            &self.tuning,
            dt,
            &mut self.fire_requests,
            &mut self.events,
            &mut self.score,
            &mut self.despawn_buffer,
        );
        // 6. Contact (buildings, rams, regen, player death)
        systems::contact::run(
            &mut self.world,
            player,
            &self.buildings,
            &self.tuning,
            dt,
            &mut self.events,
            &mut self.score,
        );
        // 7. Lifecycle (death sweep, culling, spawning)
        systems::lifecycle::run(
            &mut self.world,
            player,
            &mut self.rng,
            &self.env,
            &self.tuning,
            dt,
            &mut self.score,
            &mut self.despawn_buffer,
        );
        // 8. Non-finite sanitation
        systems::sanitize::run(&mut self.world, player, &self.tuning, &mut self.despawn_buffer);
    }
}

/// Clamp a frame delta to `[0, max_dt]`. Non-finite or negative input
/// becomes 0.
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if !dt.is_finite() || dt < 0.0 {
        warn!(dt, "invalid frame delta, treating as 0");
        return 0.0;
    }
    dt.min(max_dt)
}
