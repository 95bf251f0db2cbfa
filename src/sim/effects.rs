//! Transient effects: particles, floating text, screen shake
//!
//! Purely cosmetic, but they consume the shared RNG so emission order matters
//! for reproducibility.

use glam::Vec2;
use rand::Rng;

use super::registry::sweep_rev;
use super::state::{FloatingText, GameState, Particle};
use crate::consts::*;
use crate::heading;

/// Burst of `count` particles flying out from `pos` at up to `speed`
pub fn explosion(state: &mut GameState, pos: Vec2, color: u32, count: u32, speed: f32) {
    for _ in 0..count {
        if state.registry.particles.len() >= state.tuning.max_particles {
            return;
        }
        let angle = state.rng.random::<f32>() * std::f32::consts::TAU;
        let v = state.rng.random::<f32>() * speed;
        let radius = state.rng.random::<f32>() * 3.0 + 1.0;
        let decay = 0.02 + state.rng.random::<f32>() * 0.03;
        let id = state.registry.next_entity_id();
        state.registry.insert_particle(Particle {
            id,
            pos,
            vel: heading(angle) * v,
            radius,
            color,
            life: 1.0,
            max_life: 1.0,
            alpha: 1.0,
            decay,
        });
    }
}

/// Floating label drifting upward from `pos`
pub fn float_text(state: &mut GameState, pos: Vec2, text: impl Into<String>, color: u32, size: f32) {
    let vel = Vec2::new(
        (state.rng.random::<f32>() - 0.5) * 2.0,
        -2.0 - state.rng.random::<f32>(),
    );
    let id = state.registry.next_entity_id();
    state.registry.insert_text(FloatingText {
        id,
        pos,
        vel,
        text: text.into(),
        color,
        life: 1.0,
        size,
    });
}

/// Add to the screen shake, saturating at the maximum
pub fn add_shake(state: &mut GameState, amount: f32) {
    state.shake = (state.shake + amount).min(SHAKE_MAX);
}

/// Integrate and fade particles; drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    sweep_rev(particles, |p| {
        p.pos += p.vel;
        p.life -= p.decay;
        p.alpha = p.life;
        p.life > 0.0
    });
}

/// Integrate and fade floating texts at a fixed rate; drop the dead ones
pub fn update_texts(texts: &mut Vec<FloatingText>) {
    sweep_rev(texts, |t| {
        t.pos += t.vel;
        t.life -= TEXT_FADE;
        t.life > 0.0
    });
}

/// Multiplicative shake decay, snapping small values to rest
pub fn decay_shake(shake: f32) -> f32 {
    let decayed = if shake > 0.0 { shake * SHAKE_DECAY } else { shake };
    if decayed < SHAKE_FLOOR { 0.0 } else { decayed }
}

/// Effects pass run once per tick
pub fn update(state: &mut GameState) {
    update_particles(&mut state.registry.particles);
    update_texts(&mut state.registry.texts);
    state.shake = decay_shake(state.shake);
}
