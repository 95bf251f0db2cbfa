//! Data-driven game balance
//!
//! Loaded from JSON; any field left out keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player velocity damping per tick
    pub friction: f32,
    /// Multiplier on the pointer-follow force
    pub player_speed: f32,
    /// Starting (and maximum) player hp
    pub player_start_hp: i32,
    /// Base ticks between shots before weapon level is subtracted
    pub player_fire_rate: u32,
    /// Base ticks between enemy spawns before difficulty is subtracted
    pub enemy_base_spawn_rate: u32,
    /// Spawn interval floor
    pub min_spawn_interval: u32,
    /// When false no enemies are ever spawned
    pub spawning: bool,
    /// Live particle cap
    pub max_particles: usize,
    /// RNG seed; `None` lets the caller pick one
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.90,
            player_speed: 0.8,
            player_start_hp: 100,
            player_fire_rate: 15,
            enemy_base_spawn_rate: 45,
            min_spawn_interval: 10,
            spawning: true,
            max_particles: 2048,
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.friction.is_finite() && self.friction > 0.0 && self.friction <= 1.0) {
            return Err(TuningError::Invalid {
                field: "friction",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(TuningError::Invalid {
                field: "player_speed",
                reason: "must be finite and non-negative",
            });
        }
        if self.player_start_hp <= 0 {
            return Err(TuningError::Invalid {
                field: "player_start_hp",
                reason: "must be positive",
            });
        }
        if self.min_spawn_interval == 0 {
            return Err(TuningError::Invalid {
                field: "min_spawn_interval",
                reason: "must be at least one tick",
            });
        }
        Ok(())
    }

    /// Tuning with enemy spawning switched off
    pub fn without_spawning(mut self) -> Self {
        self.spawning = false;
        self
    }

    /// Tuning with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
