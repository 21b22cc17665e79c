//! Maze Archer entry point
//!
//! Headless host: drives the simulation on a fixed timestep, logs what the
//! UI would show and forwards sound triggers to the audio manager.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use maze_archer::consts::*;
    use maze_archer::sim::{GameEvent, GameState, TickInput, set_sound_enabled, start, tick};
    use maze_archer::{AudioManager, LogBackend, Settings};

    /// Simulated display refresh; slower than the sim so substeps get exercised
    const HOST_FRAME: f32 = 1.0 / 30.0;

    /// Game instance holding all state
    pub struct Game {
        state: GameState,
        audio: AudioManager<LogBackend>,
        accumulator: f32,
        input: TickInput,
        elapsed: f32,
    }

    impl Game {
        pub fn new(settings: &Settings) -> Self {
            let seed = settings.seed.unwrap_or_else(clock_seed);
            log::info!("Run seed {}", seed);

            let mut state = GameState::new(seed);
            set_sound_enabled(&mut state, settings.sound_enabled);

            Self {
                state,
                audio: AudioManager::from_settings(LogBackend, settings),
                accumulator: 0.0,
                input: TickInput::default(),
                elapsed: 0.0,
            }
        }

        pub fn start(&mut self) {
            let events = start(&mut self.state);
            self.dispatch(&events);
        }

        /// Run whole sim steps for one host frame
        pub fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;
            self.elapsed += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let events = tick(&mut self.state, &self.input, SIM_DT);
                self.dispatch(&events);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        pub fn finished(&self, max_seconds: f32) -> bool {
            self.state.phase.is_terminal() || self.elapsed >= max_seconds
        }

        fn dispatch(&mut self, events: &[GameEvent]) {
            for event in events {
                match *event {
                    GameEvent::Sound(effect) => self.audio.play(effect),
                    GameEvent::PhaseChanged(phase) => log::info!("Phase: {:?}", phase),
                    GameEvent::LevelChanged(level) => log::info!("Level {}", level),
                    GameEvent::ScoreChanged(score) => log::debug!("Score {}", score),
                    GameEvent::EnemiesChanged(count) => log::debug!("Enemies left: {}", count),
                }
            }
        }

        pub fn report(&self) {
            let view = self.state.view();
            log::info!(
                "Stopped after {:.1}s in {:?}: level {}, score {}, {} enemies left",
                self.elapsed,
                view.phase,
                view.level_number,
                view.score,
                view.enemies.len()
            );
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(12345)
    }

    pub fn run() {
        let settings = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .map(|path| Settings::load(&path))
            .unwrap_or_default();

        let mut game = Game::new(&settings);
        game.start();
        while !game.finished(settings.max_seconds) {
            game.update(HOST_FRAME);
        }
        game.report();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Maze Archer (headless) starting...");
    host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds embed the library directly; there is no host binary
}
