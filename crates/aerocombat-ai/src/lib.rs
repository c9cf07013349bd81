//! Enemy AI for AEROCOMBAT.
//!
//! Implements the per-enemy behavior state machine, lead prediction,
//! steering, and patrol point selection.

pub mod fsm;
pub mod patrol;

pub use aerocombat_core as core;

#[cfg(test)]
mod tests;
