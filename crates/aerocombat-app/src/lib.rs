//! AEROCOMBAT headless driver.
//!
//! Runs the simulation engine on its own thread at a fixed frame rate and
//! feeds it commands over a channel.

pub mod city;
pub mod game_loop;
pub mod settings;
pub mod state;

pub use aerocombat_core as core;
