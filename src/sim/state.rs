//! Game state and core simulation types
//!
//! Entities reference each other only by position; nothing stores a handle to
//! another entity, so removal mid-tick never leaves a dangling reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::registry::Registry;
use crate::consts::*;
use crate::palette;
use crate::tuning::Tuning;

/// Stable identity for a live entity
pub type EntityId = u32;

/// Run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run started yet
    Idle,
    /// Ticks advance the simulation
    Running,
    /// Player died; ticks are ignored until reset
    Terminated,
}

/// Discrete notifications for the audio/haptic collaborator
///
/// Pushed at the point the condition occurs inside the tick; drained by the
/// caller after the tick settles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStart,
    Shoot,
    Hit { damage: i32 },
    EnemyKilled { kind: EnemyKind },
    PlayerDamaged,
    Pickup,
    GameOver { final_score: u64 },
}

impl GameEvent {
    /// Suggested vibration length in milliseconds (0 = none)
    pub fn haptic_ms(&self) -> u32 {
        match self {
            GameEvent::GameStart => 50,
            GameEvent::PlayerDamaged => 50,
            GameEvent::EnemyKilled { .. } => 10,
            GameEvent::Pickup => 5,
            GameEvent::GameOver { .. } => 200,
            GameEvent::Shoot | GameEvent::Hit { .. } => 0,
        }
    }
}

/// The player (one per run)
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// Multiplier on the pointer-follow force
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub score: u64,
    /// 1..=20, never decreases within a run
    pub weapon_level: u32,
    /// Ticks until the weapon may fire again
    pub weapon_cooldown: u32,
}

impl Player {
    /// Fresh player at `pos` with starting stats
    pub fn new(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            color: palette::PLAYER,
            speed: tuning.player_speed,
            hp: tuning.player_start_hp,
            max_hp: tuning.player_start_hp,
            score: 0,
            weapon_level: 1,
            weapon_cooldown: 0,
        }
    }

    /// Damage of a projectile fired at the current weapon level
    pub fn projectile_damage(&self) -> i32 {
        PROJECTILE_BASE_DAMAGE + PROJECTILE_DAMAGE_PER_LEVEL * self.weapon_level as i32
    }

    /// Ticks between shots at the current weapon level
    pub fn fire_cooldown(&self, base_fire_rate: u32) -> u32 {
        base_fire_rate
            .saturating_sub(self.weapon_level)
            .max(MIN_FIRE_COOLDOWN)
    }

    /// Remove hp, never dropping below zero
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    /// Restore hp, capped at max
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Weapon level earned by a score: `min(20, 1 + score / 500)`
pub fn weapon_level_for_score(score: u64) -> u32 {
    let level = 1 + score / SCORE_PER_WEAPON_LEVEL;
    level.min(MAX_WEAPON_LEVEL as u64) as u32
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Chaser,
    Tank,
    Swarmer,
}

/// Resolved stats for a spawn at a given difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_hp: i32,
    pub radius: f32,
    pub speed: f32,
    /// Hp drained from the player per tick of contact
    pub contact_damage: i32,
    pub color: u32,
}

/// Per-variant base stats plus per-difficulty growth
struct StatRow {
    hp: i32,
    hp_per_difficulty: i32,
    radius: f32,
    speed: f32,
    speed_per_difficulty: f32,
    color: u32,
}

const STAT_TABLE: [StatRow; 3] = [
    // Chaser
    StatRow {
        hp: 20,
        hp_per_difficulty: 0,
        radius: 18.0,
        speed: 2.0,
        speed_per_difficulty: 0.1,
        color: palette::ENEMY_CHASER,
    },
    // Tank
    StatRow {
        hp: 80,
        hp_per_difficulty: 5,
        radius: 28.0,
        speed: 1.0,
        speed_per_difficulty: 0.0,
        color: palette::ENEMY_TANK,
    },
    // Swarmer
    StatRow {
        hp: 10,
        hp_per_difficulty: 0,
        radius: 12.0,
        speed: 3.5,
        speed_per_difficulty: 0.2,
        color: palette::ENEMY_SWARMER,
    },
];

const CONTACT_DAMAGE_PER_TICK: i32 = 1;

impl EnemyKind {
    fn row(self) -> &'static StatRow {
        match self {
            EnemyKind::Chaser => &STAT_TABLE[0],
            EnemyKind::Tank => &STAT_TABLE[1],
            EnemyKind::Swarmer => &STAT_TABLE[2],
        }
    }

    /// Look up stats for this variant at `difficulty`
    pub fn stats(self, difficulty: u32) -> EnemyStats {
        let row = self.row();
        EnemyStats {
            max_hp: row.hp + row.hp_per_difficulty * difficulty as i32,
            radius: row.radius,
            speed: row.speed + row.speed_per_difficulty * difficulty as f32,
            contact_damage: CONTACT_DAMAGE_PER_TICK,
            color: row.color,
        }
    }
}

/// A hostile entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    pub hp: i32,
    pub max_hp: i32,
    /// Max speed (units/tick)
    pub speed: f32,
    pub contact_damage: i32,
    /// Facing angle toward the player (radians)
    pub angle: f32,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, difficulty: u32) -> Self {
        let stats = kind.stats(difficulty);
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: stats.radius,
            color: stats.color,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            speed: stats.speed,
            contact_damage: stats.contact_damage,
            angle: 0.0,
        }
    }
}

/// A single-hit projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    pub damage: i32,
    pub from_player: bool,
}

/// A cosmetic particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// 0-1, decreases by `decay` each tick
    pub life: f32,
    pub max_life: f32,
    pub alpha: f32,
    pub decay: f32,
}

/// Rising, fading text (damage numbers, score gains)
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub text: String,
    pub color: u32,
    pub life: f32,
    pub size: f32,
}

/// A collectible orb dropped by killed enemies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius
    pub radius: f32,
    pub color: u32,
    pub value: u32,
    /// Cosmetic pulse phase
    pub pulse: f32,
}

impl Orb {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: ORB_RADIUS,
            color: palette::ORB,
            value: ORB_VALUE,
            pulse: 0.0,
        }
    }

    /// Drawn radius; collision always uses `radius`
    pub fn visual_radius(&self) -> f32 {
        self.radius + self.pulse.sin() * 2.0
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Ticks advanced in the current run
    pub time_ticks: u64,
    /// Arena size used by the most recent tick or reset
    pub arena: Vec2,
    /// Latest pointer target
    pub aim: Vec2,
    pub registry: Registry,
    /// Screen shake magnitude
    pub shake: f32,
    /// Notifications raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state; the player waits at the arena center
    pub fn new(tuning: Tuning, seed: u64, arena: Vec2) -> Self {
        let registry = Registry::new(arena * 0.5, &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Idle,
            time_ticks: 0,
            arena,
            aim: arena * 0.5,
            registry,
            shake: 0.0,
            events: Vec::new(),
        }
    }

    /// Current difficulty: `floor(score / 100)`
    pub fn difficulty(&self) -> u32 {
        (self.registry.player.score / SCORE_PER_DIFFICULTY).min(u32::MAX as u64) as u32
    }

    /// Record an event for the audio/haptic collaborator
    pub fn emit(&mut self, event: GameEvent) {
        log::trace!("event {:?} at tick {}", event, self.time_ticks);
        self.events.push(event);
    }
}
