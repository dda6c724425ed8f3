use crate::games::snake::{FieldSize, Point};
use super::error::AutopilotError;

/// Read-only view of the game the engine decides on. `body` runs tail first,
/// head last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub body: Vec<Point>,
    pub target: Point,
}

impl BoardSnapshot {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.width, self.height)
    }

    pub fn head(&self) -> Option<Point> {
        self.body.last().copied()
    }

    pub fn tail(&self) -> Option<Point> {
        self.body.first().copied()
    }

    /// Checks the preconditions `decide` relies on and returns the head.
    pub fn validate(&self) -> Result<Point, AutopilotError> {
        if self.width < 2 || self.height < 2 {
            return Err(AutopilotError::configuration(format!(
                "board must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.body.len() < 2 {
            return Err(AutopilotError::configuration(format!(
                "snake needs at least 2 segments, got {}",
                self.body.len()
            )));
        }

        let size = self.field_size();
        if let Some(outside) = self.body.iter().find(|p| !size.contains(**p)) {
            return Err(AutopilotError::configuration(format!(
                "body segment ({}, {}) is outside the board",
                outside.x, outside.y
            )));
        }
        if !size.contains(self.target) {
            return Err(AutopilotError::configuration(format!(
                "target ({}, {}) is outside the board",
                self.target.x, self.target.y
            )));
        }
        if self.body.contains(&self.target) {
            return Err(AutopilotError::configuration(format!(
                "target ({}, {}) lies on the snake",
                self.target.x, self.target.y
            )));
        }

        self.head()
            .ok_or_else(|| AutopilotError::configuration("snake has no head"))
    }
}
