use std::sync::Arc;
use std::thread;
use std::time::Duration;

use snake_common::games::snake::{DeathReason, GameStats, SnakeGameState, StepOutcome};
use snake_common::{
    AutopilotError, CycleMode, DecisionEngine, FieldCache, FieldSize, Heuristic, SessionRng, log,
};

use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Died(DeathReason),
    /// The autopilot had no safe move left.
    Trapped,
    StepLimit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub stats: GameStats,
    pub snake_length: usize,
}

#[derive(Clone, Debug)]
pub struct SimulationSettings {
    pub field_size: FieldSize,
    pub cycle: CycleMode,
    pub heuristic: Heuristic,
    pub max_steps: u64,
    pub step_delay: Duration,
}

impl From<&Config> for SimulationSettings {
    fn from(config: &Config) -> Self {
        Self {
            field_size: FieldSize::new(config.game.width as usize, config.game.height as usize),
            cycle: config.autopilot.cycle,
            heuristic: config.autopilot.heuristic,
            max_steps: config.run.max_steps,
            step_delay: Duration::from_millis(config.game.step_delay_ms),
        }
    }
}

/// Runs games back to back with one engine, so the hint field is built once and
/// the decision telemetry covers every game.
pub struct Simulation {
    settings: SimulationSettings,
    engine: DecisionEngine,
    rng: SessionRng,
}

impl Simulation {
    pub fn new(settings: SimulationSettings, mut rng: SessionRng) -> Self {
        let engine = DecisionEngine::with_cache(Arc::new(FieldCache::new()), rng.fork());
        Self {
            settings,
            engine,
            rng,
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn run_game(&mut self) -> Result<GameReport, AutopilotError> {
        let mut game_rng = self.rng.fork();
        let mut state = SnakeGameState::new(self.settings.field_size, &mut game_rng)
            .map_err(AutopilotError::Configuration)?;
        let mut stats = GameStats::new();

        let outcome = loop {
            if stats.steps >= self.settings.max_steps {
                break GameOutcome::StepLimit;
            }
            let Some(snapshot) = state.snapshot() else {
                break GameOutcome::Won;
            };
            if let Some(head) = snapshot.head() {
                stats.record_position(head, snapshot.target);
            }

            let decision = self
                .engine
                .decide(&snapshot, self.settings.cycle, self.settings.heuristic);
            let direction = match decision {
                Ok(direction) => direction,
                Err(e) if e.is_terminal() => {
                    log!("{} after {} steps", e, stats.steps);
                    break GameOutcome::Trapped;
                }
                Err(e) => return Err(e),
            };

            let step = state.step(direction, &mut game_rng);
            stats.record_step(matches!(step, StepOutcome::Ate | StepOutcome::Won));
            match step {
                StepOutcome::Won => break GameOutcome::Won,
                StepOutcome::Died(reason) => break GameOutcome::Died(reason),
                StepOutcome::Moved | StepOutcome::Ate => {}
            }

            if !self.settings.step_delay.is_zero() {
                thread::sleep(self.settings.step_delay);
            }
        };

        Ok(GameReport {
            outcome,
            stats,
            snake_length: state.snake.cell_count(),
        })
    }
}
