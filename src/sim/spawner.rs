//! Enemy spawning at the arena edges

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState};
use crate::consts::SPAWN_PADDING;
use crate::tuning::Tuning;

/// Pick a variant from a uniform roll in `[0, 1)`
///
/// Above 0.85 is a tank, (0.6, 0.85] a swarmer, the rest chasers.
pub fn kind_for_roll(roll: f32) -> EnemyKind {
    if roll > 0.85 {
        EnemyKind::Tank
    } else if roll > 0.6 {
        EnemyKind::Swarmer
    } else {
        EnemyKind::Chaser
    }
}

/// Ticks between spawns at `difficulty`, or `None` when spawning is off
///
/// Never below one tick, even for an unvalidated `Tuning`.
pub fn spawn_interval(tuning: &Tuning, difficulty: u32) -> Option<u32> {
    if !tuning.spawning {
        return None;
    }
    Some(
        tuning
            .enemy_base_spawn_rate
            .saturating_sub(difficulty)
            .max(tuning.min_spawn_interval)
            .max(1),
    )
}

/// Random point just outside one of the four arena edges
///
/// Edges in order: top, right, bottom, left.
pub fn edge_position(rng: &mut impl Rng, arena: Vec2) -> Vec2 {
    let edge = rng.random_range(0..4);
    match edge {
        0 => Vec2::new(rng.random::<f32>() * arena.x, -SPAWN_PADDING),
        1 => Vec2::new(arena.x + SPAWN_PADDING, rng.random::<f32>() * arena.y),
        2 => Vec2::new(rng.random::<f32>() * arena.x, arena.y + SPAWN_PADDING),
        _ => Vec2::new(-SPAWN_PADDING, rng.random::<f32>() * arena.y),
    }
}

/// Spawn one enemy scaled to `difficulty`
pub fn spawn_enemy(state: &mut GameState, arena: Vec2, difficulty: u32) {
    let pos = edge_position(&mut state.rng, arena);
    let kind = kind_for_roll(state.rng.random::<f32>());
    let id = state.registry.next_entity_id();
    let enemy = Enemy::new(id, kind, pos, difficulty);
    log::debug!(
        "spawn {:?} #{} at ({:.0}, {:.0}) difficulty {}",
        kind,
        id,
        pos.x,
        pos.y,
        difficulty
    );
    state.registry.insert_enemy(enemy);
}

/// Spawner pass: spawn when the tick counter hits the current interval
///
/// `difficulty` is the value taken at the start of the tick, before this
/// tick's kills and pickups added to the score.
pub fn update(state: &mut GameState, arena: Vec2, difficulty: u32) {
    let Some(interval) = spawn_interval(&state.tuning, difficulty) else {
        return;
    };
    if state.time_ticks % interval as u64 == 0 {
        spawn_enemy(state, arena, difficulty);
    }
}
