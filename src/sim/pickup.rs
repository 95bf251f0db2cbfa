//! Orb magnetism, collection and weapon progression

use super::collision::circles_overlap;
use super::effects;
use super::state::{GameEvent, GameState, weapon_level_for_score};
use crate::consts::*;
use crate::palette;

/// Orb pass: pulse, pull toward the player, collect on overlap
///
/// Collection is decided from the distance measured before this tick's
/// magnet pull, so an orb is never moved and collected on the same check.
pub fn update(state: &mut GameState) {
    for i in (0..state.registry.orbs.len()).rev() {
        let player_pos = state.registry.player.pos;
        let player_radius = state.registry.player.radius;

        let orb = &mut state.registry.orbs[i];
        orb.pulse += ORB_PULSE_STEP;
        let start = orb.pos;
        if start.distance(player_pos) < MAGNET_RANGE {
            orb.pos += (player_pos - orb.pos) * MAGNET_LERP;
        }
        let touching = circles_overlap(start, orb.radius, player_pos, player_radius);

        if touching {
            state.registry.orbs.remove(i);
            collect(state);
        }
    }
}

/// Apply an orb's reward to the player
fn collect(state: &mut GameState) {
    let player = &mut state.registry.player;
    player.score += PICKUP_SCORE;
    player.weapon_level = player
        .weapon_level
        .max(weapon_level_for_score(player.score));
    player.heal(PICKUP_HEAL);
    let pos = player.pos;

    effects::float_text(state, pos, "UPGRADE", palette::ORB, 10.0);
    state.emit(GameEvent::Pickup);
}
