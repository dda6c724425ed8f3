use std::collections::{HashMap, VecDeque};

use super::types::{DeathReason, Point};

/// Body is stored tail first, head last. Right after eating, the tail cell is
/// held twice so that the snake grows on the following step.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    occupied: HashMap<Point, u32>,
    pub death_reason: Option<DeathReason>,
    pub score: u32,
}

impl Snake {
    pub fn new(segments: impl IntoIterator<Item = Point>) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            occupied: HashMap::new(),
            death_reason: None,
            score: 0,
        };
        for segment in segments {
            snake.push_head(segment);
        }
        snake
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    pub fn head(&self) -> Option<Point> {
        self.body.back().copied()
    }

    pub fn tail(&self) -> Option<Point> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Number of distinct cells covered.
    pub fn cell_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.occupied.contains_key(&point)
    }

    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub(super) fn push_head(&mut self, point: Point) {
        self.body.push_back(point);
        *self.occupied.entry(point).or_insert(0) += 1;
    }

    pub(super) fn pop_tail(&mut self) -> Option<Point> {
        let tail = self.body.pop_front()?;
        if let Some(count) = self.occupied.get_mut(&tail) {
            *count -= 1;
            if *count == 0 {
                self.occupied.remove(&tail);
            }
        }
        Some(tail)
    }

    pub(super) fn grow_at_tail(&mut self) {
        if let Some(tail) = self.tail() {
            self.body.push_front(tail);
            *self.occupied.entry(tail).or_insert(0) += 1;
        }
    }
}
