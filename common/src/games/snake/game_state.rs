use crate::autopilot::BoardSnapshot;
use crate::games::SessionRng;
use crate::log;
use super::snake::Snake;
use super::types::{DeathReason, Direction, FieldSize, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Died(DeathReason),
    Won,
}

impl StepOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, StepOutcome::Died(_) | StepOutcome::Won)
    }
}

/// Single-snake game: fixed walls, one apple at a time.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub apple: Option<Point>,
    pub field_size: FieldSize,
    pub outcome: Option<StepOutcome>,
}

impl SnakeGameState {
    pub const MIN_SIDE: usize = 3;

    pub fn new(field_size: FieldSize, rng: &mut SessionRng) -> Result<Self, String> {
        if field_size.width < Self::MIN_SIDE || field_size.height < Self::MIN_SIDE {
            return Err(format!(
                "Field must be at least {0}x{0}, got {1}x{2}",
                Self::MIN_SIDE,
                field_size.width,
                field_size.height
            ));
        }

        let snake = Snake::new([Point::new(1, 1), Point::new(2, 1)]);
        let mut state = Self {
            snake,
            apple: None,
            field_size,
            outcome: None,
        };

        let center = Point::new(field_size.width / 2, field_size.height / 2);
        if state.snake.contains(center) {
            state.respawn_apple(rng);
        } else {
            state.apple = Some(center);
        }
        Ok(state)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some_and(|outcome| outcome.is_game_over())
    }

    pub fn snapshot(&self) -> Option<BoardSnapshot> {
        Some(BoardSnapshot {
            width: self.field_size.width,
            height: self.field_size.height,
            body: self.snake.segments().collect(),
            target: self.apple?,
        })
    }

    pub fn step(&mut self, direction: Direction, rng: &mut SessionRng) -> StepOutcome {
        if let Some(outcome) = self.outcome
            && outcome.is_game_over()
        {
            return outcome;
        }

        let outcome = match self.try_move(direction) {
            Err(reason) => {
                self.snake.death_reason = Some(reason);
                log!(
                    "Snake died ({:?}) moving {:?} with length {}",
                    reason,
                    direction,
                    self.snake.len()
                );
                StepOutcome::Died(reason)
            }
            Ok(head) if Some(head) == self.apple => {
                self.snake.score += 1;
                self.snake.grow_at_tail();
                if self.respawn_apple(rng) {
                    StepOutcome::Ate
                } else {
                    log!("Board filled after {} apples", self.snake.score);
                    StepOutcome::Won
                }
            }
            Ok(_) => StepOutcome::Moved,
        };

        self.outcome = Some(outcome);
        outcome
    }

    fn try_move(&mut self, direction: Direction) -> Result<Point, DeathReason> {
        let head = self.snake.head().ok_or(DeathReason::SelfCollision)?;
        let (dx, dy) = direction.delta();
        let next_head = head
            .offset(dx, dy, &self.field_size)
            .ok_or(DeathReason::WallCollision)?;

        self.snake.pop_tail();
        if self.snake.contains(next_head) {
            return Err(DeathReason::SelfCollision);
        }
        self.snake.push_head(next_head);
        Ok(next_head)
    }

    /// Places the apple on a uniformly chosen free cell. Returns `false` when
    /// the snake covers the whole field.
    fn respawn_apple(&mut self, rng: &mut SessionRng) -> bool {
        let free: Vec<Point> = self
            .field_size
            .points()
            .filter(|point| !self.snake.contains(*point))
            .collect();

        if free.is_empty() {
            self.apple = None;
            return false;
        }

        self.apple = Some(free[rng.random_range(0..free.len())]);
        true
    }
}
