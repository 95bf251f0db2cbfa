//! Hyperdrive - top-down arcade survival simulation
//!
//! Core modules:
//! - `sim`: Per-tick simulation (spawning, steering, combat, pickups, effects)
//! - `driver`: Cooperative frame driver that advances the simulation once per trigger
//! - `highscores`: Best-score persistence
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use highscores::{BestScore, ScoreStore};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
///
/// All rates are per tick; one tick is one rendered frame (~60 Hz).
pub mod consts {
    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Pointer-follow gain applied to (aim - position)
    pub const PLAYER_STEER_GAIN: f32 = 0.005;

    /// Auto-aim search radius
    pub const WEAPON_RANGE: f32 = 600.0;
    /// Weapon level cap
    pub const MAX_WEAPON_LEVEL: u32 = 20;
    /// Score needed per weapon level
    pub const SCORE_PER_WEAPON_LEVEL: u64 = 500;
    /// Cooldown floor (ticks between shots)
    pub const MIN_FIRE_COOLDOWN: u32 = 5;
    /// Recoil impulse on the player per shot
    pub const FIRE_RECOIL: f32 = 1.0;

    /// Projectile speed (units/tick)
    pub const PROJECTILE_SPEED: f32 = 15.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_BASE_DAMAGE: i32 = 10;
    pub const PROJECTILE_DAMAGE_PER_LEVEL: i32 = 2;
    /// Projectiles despawn this far outside the arena
    pub const PROJECTILE_MARGIN: f32 = 50.0;
    /// Fraction of projectile velocity transferred to the enemy on hit
    pub const PROJECTILE_KNOCKBACK: f32 = 0.2;

    /// Enemy pursuit acceleration (units/tick²)
    pub const ENEMY_STEER_FORCE: f32 = 0.2;
    /// Impulse pushing overlapping enemies apart
    pub const ENEMY_SEPARATION_FORCE: f32 = 0.1;
    /// Enemies spawn this far outside the arena edge
    pub const SPAWN_PADDING: f32 = 60.0;
    /// Score per enemy kill
    pub const KILL_SCORE: u64 = 100;
    /// Score per difficulty step
    pub const SCORE_PER_DIFFICULTY: u64 = 100;
    /// Probability that a killed enemy drops an orb
    pub const ORB_DROP_CHANCE: f64 = 0.5;
    /// Contact flourish (text + burst) cadence, in ticks
    pub const CONTACT_FLOURISH_INTERVAL: u64 = 10;

    /// Orb base radius
    pub const ORB_RADIUS: f32 = 6.0;
    pub const ORB_VALUE: u32 = 5;
    /// Orbs within this distance drift toward the player
    pub const MAGNET_RANGE: f32 = 150.0;
    /// Fraction of the remaining gap closed per tick inside magnet range
    pub const MAGNET_LERP: f32 = 0.1;
    pub const ORB_PULSE_STEP: f32 = 0.1;
    pub const PICKUP_SCORE: u64 = 25;
    pub const PICKUP_HEAL: i32 = 2;

    /// Floating text fade per tick
    pub const TEXT_FADE: f32 = 0.02;

    pub const SHAKE_MAX: f32 = 30.0;
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Shake below this snaps to zero
    pub const SHAKE_FLOOR: f32 = 0.5;
    pub const SHAKE_CONTACT: f32 = 5.0;
    pub const SHAKE_KILL: f32 = 8.0;
}

/// RGB color tags handed to the presentation layer
pub mod palette {
    pub const PLAYER: u32 = 0x0ea5e9;
    pub const PROJECTILE: u32 = 0xfde047;
    pub const ENEMY_CHASER: u32 = 0xef4444;
    pub const ENEMY_TANK: u32 = 0xa855f7;
    pub const ENEMY_SWARMER: u32 = 0xf97316;
    pub const ORB: u32 = 0x10b981;
    pub const DAMAGE_TEXT: u32 = 0xffffff;
    pub const SCORE_TEXT: u32 = 0xfbbf24;
    pub const HURT: u32 = 0xef4444;
}

/// Angle (radians) of the direction from `from` toward `to`
///
/// Coincident points yield 0, matching `atan2(0, 0)`.
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a circle center so the whole circle stays inside `[0, arena]`
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32, arena: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.max(radius).min(arena.x - radius),
        pos.y.max(radius).min(arena.y - radius),
    )
}

/// True when both components are finite
#[inline]
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
