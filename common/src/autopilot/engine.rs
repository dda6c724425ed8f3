use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::debug;
use crate::games::SessionRng;
use crate::games::snake::{Direction, Point};
use super::candidates::resolve;
use super::error::AutopilotError;
use super::field::{FieldCache, FieldKey, HintField};
use super::heuristic::{Heuristic, choose};
use super::hint::CycleMode;
use super::snapshot::BoardSnapshot;

/// Cumulative decision latency for one engine. Never reset between ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionTelemetry {
    total: Duration,
    decisions: u64,
}

impl DecisionTelemetry {
    pub fn record(&mut self, elapsed: Duration) {
        self.total += elapsed;
        self.decisions += 1;
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    pub fn average(&self) -> Option<Duration> {
        if self.decisions == 0 {
            return None;
        }
        let nanos = self.total.as_nanos() / self.decisions as u128;
        Some(Duration::from_nanos(nanos.min(u64::MAX as u128) as u64))
    }
}

pub struct DecisionEngine {
    fields: Arc<FieldCache>,
    rng: SessionRng,
    telemetry: DecisionTelemetry,
}

impl DecisionEngine {
    pub fn new(rng: SessionRng) -> Self {
        Self::with_cache(Arc::new(FieldCache::new()), rng)
    }

    /// Engine backed by a cache other engines may also read from.
    pub fn with_cache(fields: Arc<FieldCache>, rng: SessionRng) -> Self {
        Self {
            fields,
            rng,
            telemetry: DecisionTelemetry::default(),
        }
    }

    pub fn telemetry(&self) -> &DecisionTelemetry {
        &self.telemetry
    }

    pub fn field_cache(&self) -> &Arc<FieldCache> {
        &self.fields
    }

    pub fn field(
        &self,
        mode: CycleMode,
        width: usize,
        height: usize,
    ) -> Result<Arc<HintField>, AutopilotError> {
        self.fields.get_or_build(FieldKey::new(mode, width, height)?)
    }

    /// Chooses the next move for the snake in `snapshot`.
    ///
    /// Configuration problems are reported before any work is done and are not
    /// counted in the telemetry. [`AutopilotError::NoSafeMove`] means the snake
    /// is trapped.
    pub fn decide(
        &mut self,
        snapshot: &BoardSnapshot,
        mode: CycleMode,
        heuristic: Heuristic,
    ) -> Result<Direction, AutopilotError> {
        heuristic.ensure_implemented()?;
        let head = snapshot.validate()?;

        let started = Instant::now();
        let result = self.next_head(snapshot, head, mode, heuristic);
        self.telemetry.record(started.elapsed());

        let next = result?;
        let direction = Direction::between(head, next).ok_or_else(|| {
            AutopilotError::invariant(format!(
                "chosen cell ({}, {}) is not a neighbour of head ({}, {})",
                next.x, next.y, head.x, head.y
            ))
        })?;

        debug!(
            "{}/{}: head ({}, {}) -> {:?}",
            mode, heuristic, head.x, head.y, direction
        );
        Ok(direction)
    }

    fn next_head(
        &mut self,
        snapshot: &BoardSnapshot,
        head: Point,
        mode: CycleMode,
        heuristic: Heuristic,
    ) -> Result<Point, AutopilotError> {
        let field = self.field(mode, snapshot.width, snapshot.height)?;
        let candidates = resolve(head, field.hint(head), &field.size())?;
        choose(candidates, snapshot, &field, heuristic, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(width: usize, height: usize, body: &[(usize, usize)], target: (usize, usize)) -> BoardSnapshot {
        BoardSnapshot {
            width,
            height,
            body: body.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            target: Point::new(target.0, target.1),
        }
    }

    fn engine() -> DecisionEngine {
        DecisionEngine::new(SessionRng::new(42))
    }

    #[test]
    fn test_decide_converts_delta_sign_to_direction() {
        let mut engine = engine();
        // Full mode, 4x4: (3, 1) points up, (0, 3) right, (0, 1) down, (2, 0) left.
        let cases = [
            (&[(3, 2), (3, 1)][..], Direction::Up),
            (&[(0, 2), (0, 3)][..], Direction::Right),
            (&[(0, 0), (0, 1)][..], Direction::Down),
            (&[(3, 0), (2, 0)][..], Direction::Left),
        ];
        for (body, expected) in cases {
            let snapshot = snapshot(4, 4, body, (2, 2));
            assert_eq!(
                engine.decide(&snapshot, CycleMode::Full, Heuristic::Random),
                Ok(expected)
            );
        }
    }

    #[test]
    fn test_decide_is_deterministic_for_bfs_tie_break() {
        let snapshot = snapshot(4, 4, &[(1, 2), (1, 1)], (2, 0));
        for seed in 0..8 {
            let mut engine = DecisionEngine::new(SessionRng::new(seed));
            assert_eq!(
                engine.decide(&snapshot, CycleMode::Improved, Heuristic::Bfs),
                Ok(Direction::Right)
            );
        }
    }

    #[test]
    fn test_decide_accumulates_telemetry() {
        let mut engine = engine();
        let snapshot = snapshot(6, 6, &[(1, 1), (2, 1)], (3, 3));
        for _ in 0..3 {
            engine
                .decide(&snapshot, CycleMode::Improved, Heuristic::Euclidian)
                .unwrap();
        }
        assert_eq!(engine.telemetry().decisions(), 3);
        assert!(engine.telemetry().average().is_some());
        assert!(engine.telemetry().total() >= engine.telemetry().average().unwrap());
    }

    #[test]
    fn test_decide_rejects_reserved_heuristic_up_front() {
        let mut engine = engine();
        let snapshot = snapshot(6, 6, &[(1, 1), (2, 1)], (3, 3));
        assert!(matches!(
            engine.decide(&snapshot, CycleMode::Improved, Heuristic::AStar),
            Err(AutopilotError::Configuration(_))
        ));
        assert_eq!(engine.telemetry().decisions(), 0);
    }

    #[test]
    fn test_decide_rejects_invalid_board() {
        let mut engine = engine();
        let snapshot = snapshot(1, 6, &[(0, 1), (0, 2)], (0, 4));
        assert!(matches!(
            engine.decide(&snapshot, CycleMode::Full, Heuristic::Bfs),
            Err(AutopilotError::Configuration(_))
        ));
    }

    #[test]
    fn test_trapped_snake_surfaces_no_safe_move() {
        let mut engine = engine();
        let snapshot = snapshot(
            4,
            4,
            &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (1, 1)],
            (3, 3),
        );
        let error = engine
            .decide(&snapshot, CycleMode::Improved, Heuristic::Euclidian)
            .unwrap_err();
        assert!(error.is_terminal());
        assert_eq!(engine.telemetry().decisions(), 1);
    }

    #[test]
    fn test_engines_share_one_cached_field() {
        let cache = Arc::new(FieldCache::new());
        let mut first = DecisionEngine::with_cache(Arc::clone(&cache), SessionRng::new(1));
        let mut second = DecisionEngine::with_cache(Arc::clone(&cache), SessionRng::new(2));
        let snapshot = snapshot(8, 8, &[(1, 1), (2, 1)], (5, 5));

        first.decide(&snapshot, CycleMode::Improved, Heuristic::Bfs).unwrap();
        second.decide(&snapshot, CycleMode::Improved, Heuristic::Bfs).unwrap();

        assert_eq!(cache.len(), 1);
        let a = first.field(CycleMode::Improved, 8, 8).unwrap();
        let b = second.field(CycleMode::Improved, 8, 8).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.rows().len(), 8);
    }
}
