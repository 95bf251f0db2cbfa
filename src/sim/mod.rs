//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per external trigger
//! - Seeded RNG only
//! - Stable iteration order (storage order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combat;
pub mod effects;
pub mod invariants;
pub mod movement;
pub mod pickup;
pub mod registry;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use invariants::InvariantViolation;
pub use registry::Registry;
pub use snapshot::Snapshot;
pub use state::{
    Enemy, EnemyKind, EnemyStats, EntityId, FloatingText, GameEvent, GamePhase, GameState, Orb,
    Particle, Player, Projectile, weapon_level_for_score,
};

use glam::Vec2;

use crate::is_finite_vec;
use crate::tuning::Tuning;

/// Arena size from raw dimensions, or `None` if unusable
fn arena_from(width: f32, height: f32) -> Option<Vec2> {
    let arena = Vec2::new(width, height);
    (is_finite_vec(arena) && width > 0.0 && height > 0.0).then_some(arena)
}

/// The simulation core as seen by presentation, input and persistence
///
/// Owns the state; every mutation goes through these methods, and
/// [`Simulation::snapshot`] only ever observes a settled state.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
}

impl Simulation {
    /// Idle simulation; call [`Simulation::start_or_reset`] to begin a run
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            state: GameState::new(tuning, seed, Vec2::ZERO),
        }
    }

    /// Start a run, or restart after game over
    ///
    /// Unusable dimensions fall back to the last arena seen.
    pub fn start_or_reset(&mut self, arena_width: f32, arena_height: f32) {
        let arena = arena_from(arena_width, arena_height).unwrap_or_else(|| {
            log::warn!(
                "ignoring arena {}x{} on reset, keeping {:?}",
                arena_width,
                arena_height,
                self.state.arena
            );
            self.state.arena
        });
        tick::start_or_reset(&mut self.state, arena);
    }

    /// Latest pointer position; non-finite samples are dropped
    pub fn set_aim_target(&mut self, x: f32, y: f32) {
        let aim = Vec2::new(x, y);
        if !is_finite_vec(aim) {
            log::warn!("ignoring non-finite aim target ({x}, {y})");
            return;
        }
        self.state.aim = aim;
    }

    /// Advance one step if running
    ///
    /// Unusable arena dimensions skip the tick. An error means the state is
    /// corrupt; the caller should stop driving the simulation.
    pub fn tick(&mut self, arena_width: f32, arena_height: f32) -> Result<(), InvariantViolation> {
        let Some(arena) = arena_from(arena_width, arena_height) else {
            log::warn!("skipping tick for arena {arena_width}x{arena_height}");
            return Ok(());
        };
        tick::tick(&mut self.state, arena)
    }

    /// Read-only view of the settled state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Take the notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
