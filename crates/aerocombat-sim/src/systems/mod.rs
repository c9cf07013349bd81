pub mod contact;
pub mod enemy_ai;
pub mod lifecycle;
pub mod movement;
pub mod player;
pub mod projectiles;
pub mod sanitize;
pub mod snapshot;
pub mod wind;
