use crate::games::snake::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum AutopilotError {
    /// Bad board size, malformed snapshot, unknown or reserved mode/heuristic.
    Configuration(String),
    /// Every candidate move collides with the body. The game is lost.
    NoSafeMove { head: Point },
    /// The hint field or the search broke one of its own guarantees.
    InvariantViolation(String),
}

impl AutopilotError {
    pub fn configuration(message: impl Into<String>) -> Self {
        AutopilotError::Configuration(message.into())
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        AutopilotError::InvariantViolation(message.into())
    }

    /// A trapped snake is a regular end of game, not a failure of the engine.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AutopilotError::NoSafeMove { .. })
    }
}

impl std::fmt::Display for AutopilotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutopilotError::Configuration(message) => {
                write!(f, "Configuration error: {}", message)
            }
            AutopilotError::NoSafeMove { head } => {
                write!(f, "No safe move from ({}, {})", head.x, head.y)
            }
            AutopilotError::InvariantViolation(message) => {
                write!(f, "Invariant violation: {}", message)
            }
        }
    }
}

impl std::error::Error for AutopilotError {}
