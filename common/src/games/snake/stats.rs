use super::types::Point;

/// Running per-game counters reported by the runner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameStats {
    pub steps: u64,
    pub apples_eaten: u32,
    distance_sum: f64,
    distance_samples: u64,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the head-to-apple distance before a step is applied.
    pub fn record_position(&mut self, head: Point, apple: Point) {
        self.distance_sum += head.euclidean_distance(apple);
        self.distance_samples += 1;
    }

    pub fn record_step(&mut self, ate: bool) {
        self.steps += 1;
        if ate {
            self.apples_eaten += 1;
        }
    }

    pub fn average_head_apple_distance(&self) -> Option<f64> {
        (self.distance_samples > 0).then(|| self.distance_sum / self.distance_samples as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_distance_is_none_without_samples() {
        assert_eq!(GameStats::new().average_head_apple_distance(), None);
    }

    #[test]
    fn test_average_distance_over_samples() {
        let mut stats = GameStats::new();
        stats.record_position(Point::new(0, 0), Point::new(3, 4));
        stats.record_position(Point::new(1, 1), Point::new(1, 2));
        stats.record_step(false);
        stats.record_step(true);
        assert_eq!(stats.average_head_apple_distance(), Some(3.0));
        assert_eq!(stats.steps, 2);
        assert_eq!(stats.apples_eaten, 1);
    }
}
