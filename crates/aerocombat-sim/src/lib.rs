//! Simulation engine for AEROCOMBAT.
//!
//! Owns the hecs ECS world, runs systems once per frame in a fixed order,
//! and produces `SimSnapshot`s and `SimEvent`s for the presentation layer.

pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use aerocombat_core as core;
pub use engine::{SimConfig, SimulationEngine};
