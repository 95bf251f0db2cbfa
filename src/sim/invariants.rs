//! Post-tick invariant checks
//!
//! A violation means the state can no longer be trusted; the caller stops the
//! tick loop instead of simulating on top of it.

use glam::Vec2;
use thiserror::Error;

use super::state::{EntityId, GameState};
use crate::consts::MAX_WEAPON_LEVEL;
use crate::is_finite_vec;

/// A broken simulation invariant, tagged with the tick it was found on
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("tick {tick}: entity {id} has a non-finite position or velocity")]
    NonFinite { tick: u64, id: EntityId },
    #[error("tick {tick}: player hp {hp} outside [0, {max_hp}]")]
    PlayerHp { tick: u64, hp: i32, max_hp: i32 },
    #[error("tick {tick}: weapon level {level} outside [1, 20]")]
    WeaponLevel { tick: u64, level: u32 },
    #[error("tick {tick}: player at ({x}, {y}) left the arena")]
    PlayerOutOfBounds { tick: u64, x: f32, y: f32 },
    #[error("tick {tick}: enemy {id} survived with hp {hp}")]
    EnemyNotRemoved { tick: u64, id: EntityId, hp: i32 },
}

/// Validate a settled post-tick state
pub fn check(state: &GameState, arena: Vec2) -> Result<(), InvariantViolation> {
    let tick = state.time_ticks;
    let player = &state.registry.player;

    if !is_finite_vec(player.pos) || !is_finite_vec(player.vel) {
        return Err(InvariantViolation::NonFinite {
            tick,
            id: player.id,
        });
    }
    if player.hp < 0 || player.hp > player.max_hp {
        return Err(InvariantViolation::PlayerHp {
            tick,
            hp: player.hp,
            max_hp: player.max_hp,
        });
    }
    if !(1..=MAX_WEAPON_LEVEL).contains(&player.weapon_level) {
        return Err(InvariantViolation::WeaponLevel {
            tick,
            level: player.weapon_level,
        });
    }
    let r = player.radius;
    let inside = player.pos.x >= r.min(arena.x - r)
        && player.pos.x <= (arena.x - r).max(r)
        && player.pos.y >= r.min(arena.y - r)
        && player.pos.y <= (arena.y - r).max(r);
    if !inside {
        return Err(InvariantViolation::PlayerOutOfBounds {
            tick,
            x: player.pos.x,
            y: player.pos.y,
        });
    }

    for enemy in &state.registry.enemies {
        if !is_finite_vec(enemy.pos) || !is_finite_vec(enemy.vel) {
            return Err(InvariantViolation::NonFinite { tick, id: enemy.id });
        }
        if enemy.hp <= 0 {
            return Err(InvariantViolation::EnemyNotRemoved {
                tick,
                id: enemy.id,
                hp: enemy.hp,
            });
        }
    }
    let others = state
        .registry
        .projectiles
        .iter()
        .map(|p| (p.id, p.pos, p.vel))
        .chain(state.registry.orbs.iter().map(|o| (o.id, o.pos, o.vel)));
    for (id, pos, vel) in others {
        if !is_finite_vec(pos) || !is_finite_vec(vel) {
            return Err(InvariantViolation::NonFinite { tick, id });
        }
    }
    Ok(())
}
