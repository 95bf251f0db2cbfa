//! Read-only views of a settled simulation for presentation

use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, EntityId, GamePhase, GameState};
use crate::angle_to;

/// Player stats and placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub score: u64,
    pub weapon_level: u32,
    /// Direction of the aim indicator (radians)
    pub aim_angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: u32,
    pub angle: f32,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: u32,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextView {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: u32,
    /// Doubles as opacity
    pub life: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbView {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    /// Pulsing draw radius
    pub radius: f32,
    pub color: u32,
}

/// Everything the presentation layer may read after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub arena_width: f32,
    pub arena_height: f32,
    pub aim_x: f32,
    pub aim_y: f32,
    pub shake: f32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    pub texts: Vec<TextView>,
    pub orbs: Vec<OrbView>,
}

impl Snapshot {
    /// Capture the current state
    pub fn capture(state: &GameState) -> Self {
        let registry = &state.registry;
        let player = &registry.player;
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            arena_width: state.arena.x,
            arena_height: state.arena.y,
            aim_x: state.aim.x,
            aim_y: state.aim.y,
            shake: state.shake,
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                radius: player.radius,
                color: player.color,
                hp: player.hp,
                max_hp: player.max_hp,
                score: player.score,
                weapon_level: player.weapon_level,
                aim_angle: angle_to(player.pos, state.aim),
            },
            enemies: registry
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    x: e.pos.x,
                    y: e.pos.y,
                    radius: e.radius,
                    color: e.color,
                    angle: e.angle,
                    hp: e.hp,
                    max_hp: e.max_hp,
                })
                .collect(),
            projectiles: registry
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    radius: p.radius,
                    color: p.color,
                })
                .collect(),
            particles: registry
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    radius: p.radius,
                    color: p.color,
                    alpha: p.alpha,
                })
                .collect(),
            texts: registry
                .texts
                .iter()
                .map(|t| TextView {
                    x: t.pos.x,
                    y: t.pos.y,
                    text: t.text.clone(),
                    color: t.color,
                    life: t.life,
                    size: t.size,
                })
                .collect(),
            orbs: registry
                .orbs
                .iter()
                .map(|o| OrbView {
                    id: o.id,
                    x: o.pos.x,
                    y: o.pos.y,
                    radius: o.visual_radius(),
                    color: o.color,
                })
                .collect(),
        }
    }

    /// Player health as a 0-100 percentage for the HUD bar
    pub fn health_percent(&self) -> f32 {
        if self.player.max_hp <= 0 {
            return 0.0;
        }
        self.player.hp as f32 / self.player.max_hp as f32 * 100.0
    }
}
