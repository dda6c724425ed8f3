use crate::games::snake::{FieldSize, Point};
use super::error::AutopilotError;
use super::hint::DirectionHint;

/// Next-head positions allowed by a hint. Never diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Candidates {
    Single(Point),
    Pair { horizontal: Point, vertical: Point },
}

impl Candidates {
    pub fn len(&self) -> usize {
        match self {
            Candidates::Single(_) => 1,
            Candidates::Pair { .. } => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (first, second) = match *self {
            Candidates::Single(point) => (point, None),
            Candidates::Pair { horizontal, vertical } => (horizontal, Some(vertical)),
        };
        std::iter::once(first).chain(second)
    }
}

pub fn resolve(head: Point, hint: DirectionHint, size: &FieldSize) -> Result<Candidates, AutopilotError> {
    let shift = |dx: i8, dy: i8| {
        head.offset(dx, dy, size).ok_or_else(|| {
            AutopilotError::invariant(format!(
                "hint {} at ({}, {}) leaves the {}x{} board",
                hint, head.x, head.y, size.width, size.height
            ))
        })
    };

    match (hint.dx, hint.dy) {
        (0, 0) => Err(AutopilotError::invariant(format!(
            "degenerate hint at ({}, {})",
            head.x, head.y
        ))),
        (dx, 0) => Ok(Candidates::Single(shift(dx, 0)?)),
        (0, dy) => Ok(Candidates::Single(shift(0, dy)?)),
        (dx, dy) => Ok(Candidates::Pair {
            horizontal: shift(dx, 0)?,
            vertical: shift(0, dy)?,
        }),
    }
}
