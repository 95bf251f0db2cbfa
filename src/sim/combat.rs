//! Weapon firing and projectile resolution

use glam::Vec2;

use super::collision::{first_overlapping, nearest_within};
use super::effects;
use super::state::{GameEvent, GameState, Projectile};
use crate::consts::*;
use crate::{angle_to, heading, palette};

/// Fire at the nearest enemy in range once the cooldown has run out
///
/// A pending cooldown just counts down. With nothing in range the weapon
/// stays ready and fires on the first tick a target appears.
pub fn fire_weapon(state: &mut GameState) {
    let player = &mut state.registry.player;
    if player.weapon_cooldown > 0 {
        player.weapon_cooldown -= 1;
        return;
    }

    let origin = player.pos;
    let Some(target) = nearest_within(&state.registry.enemies, origin, WEAPON_RANGE, |e| e.pos)
    else {
        return;
    };
    let target_pos = state.registry.enemies[target].pos;
    let dir = heading(angle_to(origin, target_pos));

    let player = &mut state.registry.player;
    let projectile = Projectile {
        id: 0,
        pos: player.pos + dir * player.radius,
        vel: dir * PROJECTILE_SPEED,
        radius: PROJECTILE_RADIUS,
        color: palette::PROJECTILE,
        damage: player.projectile_damage(),
        from_player: true,
    };
    player.vel -= dir * FIRE_RECOIL;
    player.weapon_cooldown = player.fire_cooldown(state.tuning.player_fire_rate);

    let id = state.registry.next_entity_id();
    state.registry.insert_projectile(Projectile { id, ..projectile });
    state.emit(GameEvent::Shoot);
}

/// True once a projectile has left the arena plus margin
fn out_of_bounds(pos: Vec2, arena: Vec2) -> bool {
    pos.x < -PROJECTILE_MARGIN
        || pos.x > arena.x + PROJECTILE_MARGIN
        || pos.y < -PROJECTILE_MARGIN
        || pos.y > arena.y + PROJECTILE_MARGIN
}

/// Move projectiles and resolve player shots against enemies
///
/// Each shot hits at most one enemy: the first overlapping one in storage
/// order, not necessarily the nearest.
pub fn update_projectiles(state: &mut GameState, arena: Vec2) {
    for i in (0..state.registry.projectiles.len()).rev() {
        let proj = &mut state.registry.projectiles[i];
        proj.pos += proj.vel;
        let proj = *proj;

        if out_of_bounds(proj.pos, arena) {
            state.registry.projectiles.remove(i);
            continue;
        }
        if !proj.from_player {
            continue;
        }

        let Some(hit) = first_overlapping(&state.registry.enemies, proj.pos, proj.radius, |e| {
            (e.pos, e.radius)
        }) else {
            continue;
        };

        let enemy = &mut state.registry.enemies[hit];
        enemy.hp -= proj.damage;
        enemy.vel += proj.vel * PROJECTILE_KNOCKBACK;
        let enemy_pos = enemy.pos;

        effects::float_text(
            state,
            enemy_pos,
            proj.damage.to_string(),
            palette::DAMAGE_TEXT,
            12.0,
        );
        effects::explosion(state, proj.pos, palette::PROJECTILE, 3, 3.0);
        state.emit(GameEvent::Hit {
            damage: proj.damage,
        });
        state.registry.projectiles.remove(i);
    }
}

/// Combat pass: fire, then integrate and resolve projectiles
pub fn update(state: &mut GameState, arena: Vec2) {
    fire_weapon(state);
    update_projectiles(state, arena);
}
