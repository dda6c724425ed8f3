mod game_state;
mod snake;
mod stats;
mod types;

pub use game_state::{SnakeGameState, StepOutcome};
pub use snake::Snake;
pub use stats::GameStats;
pub use types::{DeathReason, Direction, FieldSize, Point};
