//! Entity registry
//!
//! Owns every live entity collection. Systems mutate it one at a time inside a
//! tick; collections are scanned in storage order, and removals during a scan
//! walk indices backward so unvisited entries never shift.

use glam::Vec2;

use super::state::{EntityId, Enemy, FloatingText, Orb, Particle, Player, Projectile};
use crate::tuning::Tuning;

/// All live entities of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub orbs: Vec<Orb>,
    next_id: EntityId,
}

impl Registry {
    /// Registry holding only a fresh player at `player_pos`
    pub fn new(player_pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            player: Player::new(0, player_pos, tuning),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            texts: Vec::new(),
            orbs: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Drop every non-player entity and respawn the player
    pub fn reset(&mut self, player_pos: Vec2, tuning: &Tuning) {
        *self = Self::new(player_pos, tuning);
    }

    /// True when only the player is alive
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
            && self.projectiles.is_empty()
            && self.particles.is_empty()
            && self.texts.is_empty()
            && self.orbs.is_empty()
    }

    pub fn insert_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn insert_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn insert_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn insert_text(&mut self, text: FloatingText) {
        self.texts.push(text);
    }

    pub fn insert_orb(&mut self, orb: Orb) {
        self.orbs.push(orb);
    }
}

/// Visit `items` from last to first, removing every entry `keep` rejects
///
/// Removal preserves the relative order of the survivors, and each entry
/// present at the start of the sweep is visited exactly once.
pub fn sweep_rev<T>(items: &mut Vec<T>, mut keep: impl FnMut(&mut T) -> bool) {
    for i in (0..items.len()).rev() {
        if !keep(&mut items[i]) {
            items.remove(i);
        }
    }
}
