//! Cooperative frame driver
//!
//! Advances the simulation once per external trigger (an animation frame, a
//! timer, a test loop) and hands back the settled snapshot to draw. Stopping
//! the trigger, or calling [`FrameDriver::stop`], is the only cancellation.

use crate::highscores::{BestScore, ScoreStore};
use crate::sim::{GameEvent, GamePhase, InvariantViolation, Simulation, Snapshot};

/// Drives a [`Simulation`] and reports finished runs to a score store
pub struct FrameDriver<S: ScoreStore> {
    sim: Simulation,
    store: S,
    best: BestScore,
    stopped: bool,
    /// Events raised by the most recent frame
    events: Vec<GameEvent>,
}

impl<S: ScoreStore> FrameDriver<S> {
    /// Wrap `sim`, reading the stored best score once up front
    pub fn new(sim: Simulation, mut store: S) -> Self {
        let best = store.load().unwrap_or_else(|err| {
            log::warn!("Could not load best score: {err}");
            BestScore::default()
        });
        Self {
            sim,
            store,
            best,
            stopped: false,
            events: Vec::new(),
        }
    }

    /// Start or restart a run
    pub fn start(&mut self, arena_width: f32, arena_height: f32) {
        self.sim.start_or_reset(arena_width, arena_height);
        self.events = self.sim.drain_events();
    }

    /// Forward a pointer sample
    pub fn set_aim(&mut self, x: f32, y: f32) {
        self.sim.set_aim_target(x, y);
    }

    /// One trigger: tick once, settle, return what to draw
    ///
    /// After `stop()` or an invariant violation the simulation is frozen and
    /// every frame returns the last settled snapshot.
    pub fn frame(&mut self, arena_width: f32, arena_height: f32) -> Result<Snapshot, InvariantViolation> {
        if self.stopped {
            return Ok(self.sim.snapshot());
        }

        let before = self.sim.phase();
        if let Err(err) = self.sim.tick(arena_width, arena_height) {
            log::error!("Simulation halted: {err}");
            self.stopped = true;
            return Err(err);
        }
        self.events = self.sim.drain_events();

        if before == GamePhase::Running && self.sim.phase() == GamePhase::Terminated {
            self.finish_run();
        }
        Ok(self.sim.snapshot())
    }

    /// Hand the final score to the store if it is a new best
    fn finish_run(&mut self) {
        let score = self.sim.state().registry.player.score;
        if !self.best.record(score) {
            return;
        }
        log::info!("New best score {score}");
        if let Err(err) = self.store.save(&self.best) {
            log::warn!("Could not save best score: {err}");
        }
    }

    /// Halt the driver; later frames no longer tick
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn best_score(&self) -> u64 {
        self.best.score
    }

    /// Events raised by the most recent `start` or `frame`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::{Enemy, EnemyKind};
    use crate::tuning::Tuning;

    fn driver(best: u64) -> FrameDriver<MemoryStore> {
        let store = MemoryStore {
            best: Some(BestScore { score: best }),
            saves: 0,
        };
        let mut driver = FrameDriver::new(Simulation::new(Tuning::default().without_spawning(), 3), store);
        driver.start(800.0, 600.0);
        driver
    }

    /// Put the player one contact away from death with `score` banked
    fn doom_player(driver: &mut FrameDriver<MemoryStore>, score: u64) {
        let state = driver.simulation_mut().state_mut();
        state.registry.player.hp = 1;
        state.registry.player.score = score;
        let pos = state.registry.player.pos;
        let id = state.registry.next_entity_id();
        state
            .registry
            .insert_enemy(Enemy::new(id, EnemyKind::Chaser, pos, 0));
    }

    #[test]
    fn test_new_best_is_saved_on_game_over() {
        let mut driver = driver(1_000);
        assert_eq!(driver.best_score(), 1_000);
        doom_player(&mut driver, 2_500);

        let snap = driver.frame(800.0, 600.0).unwrap();
        assert_eq!(snap.phase, GamePhase::Terminated);
        assert!(driver
            .events()
            .contains(&GameEvent::GameOver { final_score: 2_500 }));
        assert_eq!(driver.best_score(), 2_500);
        assert_eq!(driver.store().best, Some(BestScore { score: 2_500 }));
        assert_eq!(driver.store().saves, 1);

        // Terminated frames do not re-report the run.
        driver.frame(800.0, 600.0).unwrap();
        assert_eq!(driver.store().saves, 1);
    }

    #[test]
    fn test_lower_score_is_not_saved() {
        let mut driver = driver(1_000);
        doom_player(&mut driver, 400);
        driver.frame(800.0, 600.0).unwrap();
        assert_eq!(driver.simulation().phase(), GamePhase::Terminated);
        assert_eq!(driver.best_score(), 1_000);
        assert_eq!(driver.store().saves, 0);
    }

    #[test]
    fn test_stop_freezes_simulation() {
        let mut driver = driver(0);
        driver.frame(800.0, 600.0).unwrap();
        driver.stop();
        for _ in 0..5 {
            let snap = driver.frame(800.0, 600.0).unwrap();
            assert_eq!(snap.tick, 1);
        }
        assert!(driver.is_stopped());
    }

    #[test]
    fn test_invariant_violation_halts() {
        let mut driver = driver(0);
        driver
            .simulation_mut()
            .state_mut()
            .registry
            .player
            .weapon_level = 0;
        let err = driver.frame(800.0, 600.0).unwrap_err();
        assert!(matches!(err, InvariantViolation::WeaponLevel { level: 0, .. }));
        assert!(driver.is_stopped());
        assert_eq!(driver.frame(800.0, 600.0).unwrap().tick, 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut driver = driver(0);
        doom_player(&mut driver, 10);
        driver.frame(800.0, 600.0).unwrap();
        driver.start(800.0, 600.0);
        assert_eq!(driver.events(), &[GameEvent::GameStart]);
        let snap = driver.frame(800.0, 600.0).unwrap();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.player.hp, 100);
    }
}
