//! Player steering and enemy AI
//!
//! Enemies pursue the player, push off overlapping neighbours, drain the
//! player on contact and die here once their hp runs out.

use glam::Vec2;
use rand::Rng;

use super::collision::circles_overlap;
use super::effects;
use super::state::{EnemyKind, GameEvent, GameState, Orb};
use crate::consts::*;
use crate::{angle_to, clamp_to_arena, heading, palette};

/// Pull the player toward the aim point with damping, then clamp to the arena
pub fn move_player(state: &mut GameState, arena: Vec2) {
    let friction = state.tuning.friction;
    let aim = state.aim;
    let player = &mut state.registry.player;

    player.vel += (aim - player.pos) * PLAYER_STEER_GAIN * player.speed;
    player.vel *= friction;
    player.pos += player.vel;
    player.pos = clamp_to_arena(player.pos, player.radius, arena);
}

/// Accelerate `vel` toward `angle` and cap its length at `max_speed`
pub fn steer(vel: Vec2, angle: f32, max_speed: f32) -> Vec2 {
    let vel = vel + heading(angle) * ENEMY_STEER_FORCE;
    let speed = vel.length();
    if speed > max_speed {
        vel / speed * max_speed
    } else {
        vel
    }
}

/// Sum of separation impulses on enemy `i` from every overlapping neighbour
fn separation(state: &GameState, i: usize) -> Vec2 {
    let enemies = &state.registry.enemies;
    let me = &enemies[i];
    let mut push = Vec2::ZERO;
    for (j, other) in enemies.iter().enumerate() {
        if i == j {
            continue;
        }
        if circles_overlap(me.pos, me.radius, other.pos, other.radius) {
            push += heading(angle_to(other.pos, me.pos)) * ENEMY_SEPARATION_FORCE;
        }
    }
    push
}

/// Enemy pass: steer, separate, integrate, resolve contact and death
///
/// Walks enemies last to first so deaths can be removed in place. Neighbours
/// already visited this tick are seen at their updated positions.
pub fn update_enemies(state: &mut GameState) {
    for i in (0..state.registry.enemies.len()).rev() {
        let player_pos = state.registry.player.pos;
        let player_radius = state.registry.player.radius;

        let push = separation(state, i);
        let enemy = &mut state.registry.enemies[i];
        let angle = angle_to(enemy.pos, player_pos);
        enemy.angle = angle;
        enemy.vel = steer(enemy.vel, angle, enemy.speed) + push;
        enemy.pos += enemy.vel;

        if circles_overlap(enemy.pos, enemy.radius, player_pos, player_radius) {
            enemy.vel = -enemy.vel;
            let enemy_pos = enemy.pos;
            let damage = enemy.contact_damage;
            contact_player(state, enemy_pos, damage);
        }

        let enemy = state.registry.enemies[i];
        if enemy.hp <= 0 {
            state.registry.enemies.remove(i);
            kill_enemy(state, enemy.pos, enemy.color, enemy.kind);
        }
    }
}

/// One tick of contact between an enemy at `enemy_pos` and the player
fn contact_player(state: &mut GameState, enemy_pos: Vec2, damage: i32) {
    state.registry.player.take_damage(damage);
    effects::add_shake(state, SHAKE_CONTACT);
    state.emit(GameEvent::PlayerDamaged);

    if state.time_ticks % CONTACT_FLOURISH_INTERVAL == 0 {
        let player_pos = state.registry.player.pos;
        effects::float_text(state, player_pos, "-HP", palette::HURT, 20.0);
        effects::explosion(state, (player_pos + enemy_pos) * 0.5, palette::HURT, 5, 5.0);
    }
}

/// Death effects, orb drop and score for an enemy already removed
fn kill_enemy(state: &mut GameState, pos: Vec2, color: u32, kind: EnemyKind) {
    effects::add_shake(state, SHAKE_KILL);
    effects::explosion(state, pos, color, 15, 6.0);
    effects::float_text(state, pos, format!("+{KILL_SCORE}"), palette::SCORE_TEXT, 16.0);

    if state.rng.random_bool(ORB_DROP_CHANCE) {
        let id = state.registry.next_entity_id();
        state.registry.insert_orb(Orb::new(id, pos));
    }

    state.registry.player.score += KILL_SCORE;
    state.emit(GameEvent::EnemyKilled { kind });
    log::debug!(
        "killed {:?} at ({:.0}, {:.0}), score {}",
        kind,
        pos.x,
        pos.y,
        state.registry.player.score
    );
}
