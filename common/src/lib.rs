pub mod autopilot;
pub mod config;
pub mod games;
pub mod logger;

pub use autopilot::{
    AutopilotError, BoardSnapshot, CycleMode, DecisionEngine, DecisionTelemetry, DirectionHint,
    FieldCache, Heuristic, HintField,
};
pub use games::SessionRng;
pub use games::snake::{Direction, FieldSize, Point};
