//! Autonomous snake driver.
//!
//! Every cell of the board carries a [`DirectionHint`] from a precomputed
//! sweep pattern ([`CycleMode`]). The head may only move along the hinted axes;
//! when two moves remain, a [`Heuristic`] breaks the tie.

mod candidates;
mod engine;
mod error;
mod field;
mod heuristic;
mod hint;
mod snapshot;

pub use candidates::{Candidates, resolve};
pub use engine::{DecisionEngine, DecisionTelemetry};
pub use error::AutopilotError;
pub use field::{FieldCache, FieldKey, HintField};
pub use heuristic::{Heuristic, SearchDistance, choose, euclidean_choice, search_distance};
pub use hint::{CycleMode, DirectionHint, compute_hint};
pub use snapshot::BoardSnapshot;
