//! Snapshot system: reads the world and builds a SimSnapshot.
//!
//! Read-only; it never modifies the world.

use hecs::{Entity, World};

use aerocombat_core::components::*;
use aerocombat_core::enums::SessionPhase;
use aerocombat_core::state::*;
use aerocombat_core::types::{Orientation, WorldEnv};

use crate::score::ScoreState;

pub fn build_snapshot(
    world: &World,
    player: Option<Entity>,
    env: &WorldEnv,
    phase: SessionPhase,
    score: &ScoreState,
) -> SimSnapshot {
    SimSnapshot {
        time: env.time,
        phase,
        wind: env.wind,
        player: player.map(|p| build_player(world, p)).unwrap_or_default(),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        score: score.view(),
    }
}

fn build_player(world: &World, player: Entity) -> PlayerView {
    let Ok(mut query) = world.query_one::<(&Player, &Kinematics, &Orientation, &Health)>(player)
    else {
        return PlayerView::default();
    };
    query
        .get()
        .map(|(pilot, kinematics, orientation, health)| PlayerView {
            position: kinematics.position,
            velocity: kinematics.velocity,
            orientation: *orientation,
            health: health.current,
            max_health: health.max,
            fuel: pilot.fuel,
            speed: pilot.speed,
        })
        .unwrap_or_default()
}

/// Enemies ordered by id so the snapshot is stable across runs.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Kinematics, &Orientation, &Health)>()
        .iter()
        .map(|(entity, (enemy, kinematics, orientation, health))| EnemyView {
            id: entity.to_bits().get(),
            position: kinematics.position,
            orientation: *orientation,
            health: health.current,
            max_health: health.max,
            ai_state: enemy.ai_state,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<(&Projectile, &Kinematics)>()
        .iter()
        .map(|(entity, (projectile, kinematics))| {
            (
                entity.to_bits().get(),
                ProjectileView {
                    position: kinematics.position,
                    velocity: kinematics.velocity,
                    faction: projectile.faction,
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(id, _)| *id);
    projectiles.into_iter().map(|(_, view)| view).collect()
}
