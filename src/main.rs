//! Hyperdrive entry point
//!
//! On the web this exposes a game handle to the page, which owns the canvas,
//! the animation-frame loop and input capture. Natively it runs a headless
//! demo session with a scripted pointer.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use hyperdrive::FrameDriver;
    use hyperdrive::Tuning;
    use hyperdrive::highscores::LocalStorageStore;
    use hyperdrive::sim::Simulation;

    #[wasm_bindgen(start)]
    pub fn wasm_main() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Hyperdrive (web) starting...");
    }

    /// Game instance driven by the page's requestAnimationFrame loop
    #[wasm_bindgen]
    pub struct Game {
        driver: FrameDriver<LocalStorageStore>,
    }

    #[wasm_bindgen]
    impl Game {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Game {
            let seed = js_sys::Date::now() as u64;
            let sim = Simulation::new(Tuning::default(), seed);
            Game {
                driver: FrameDriver::new(sim, LocalStorageStore),
            }
        }

        /// Start button / restart button
        pub fn start(&mut self, width: f32, height: f32) {
            self.driver.start(width, height);
        }

        /// Pointer or touch position in canvas pixels
        pub fn set_aim(&mut self, x: f32, y: f32) {
            self.driver.set_aim(x, y);
        }

        /// Advance one frame and return the snapshot as JSON
        pub fn frame(&mut self, width: f32, height: f32) -> Result<String, JsValue> {
            let snapshot = self
                .driver
                .frame(width, height)
                .map_err(|err| JsValue::from_str(&err.to_string()))?;
            serde_json::to_string(&snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
        }

        /// Events from the last frame as JSON, for sound and vibration
        pub fn events(&self) -> Result<String, JsValue> {
            serde_json::to_string(self.driver.events())
                .map_err(|err| JsValue::from_str(&err.to_string()))
        }

        pub fn best_score(&self) -> f64 {
            self.driver.best_score() as f64
        }

        /// Stop ticking (page hidden, component unmounted)
        pub fn stop(&mut self) {
            self.driver.stop();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hyperdrive (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => hyperdrive::Tuning::default(),
    };
    let max_ticks = args
        .next()
        .and_then(|n| n.parse::<u64>().ok())
        .unwrap_or(60 * 60 * 5);

    run_demo(tuning, max_ticks);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<hyperdrive::Tuning, String> {
    let json = std::fs::read_to_string(path).map_err(|err| format!("cannot read {path}: {err}"))?;
    hyperdrive::Tuning::from_json(&json).map_err(|err| format!("{path}: {err}"))
}

/// Headless session: the pointer orbits the arena center until the player dies
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(tuning: hyperdrive::Tuning, max_ticks: u64) {
    use hyperdrive::FrameDriver;
    use hyperdrive::highscores::FileStore;
    use hyperdrive::sim::{GamePhase, Simulation};

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;

    let seed = tuning.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let store = FileStore::new(std::env::temp_dir().join("hyperdrive_best.json"));
    let mut driver = FrameDriver::new(Simulation::new(tuning, seed), store);
    println!("Best score so far: {}", driver.best_score());

    driver.start(WIDTH, HEIGHT);
    let mut last = None;
    for t in 0..max_ticks {
        let angle = t as f32 * 0.01;
        driver.set_aim(
            WIDTH * 0.5 + angle.cos() * 200.0,
            HEIGHT * 0.5 + angle.sin() * 150.0,
        );
        match driver.frame(WIDTH, HEIGHT) {
            Ok(snapshot) => {
                let done = snapshot.phase == GamePhase::Terminated;
                last = Some(snapshot);
                if done {
                    break;
                }
            }
            Err(err) => {
                log::error!("Demo aborted: {err}");
                std::process::exit(2);
            }
        }
    }

    if let Some(snapshot) = last {
        println!(
            "Tick {}: score {}, weapon level {}, hp {}/{}, {} enemies alive",
            snapshot.tick,
            snapshot.player.score,
            snapshot.player.weapon_level,
            snapshot.player.hp,
            snapshot.player.max_hp,
            snapshot.enemies.len()
        );
    }
    println!("Best score: {}", driver.best_score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
