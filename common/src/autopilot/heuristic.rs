use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::games::SessionRng;
use crate::games::snake::Point;
use super::candidates::{Candidates, resolve};
use super::error::AutopilotError;
use super::field::HintField;
use super::snapshot::BoardSnapshot;

/// Tie-break rule for cells that leave the head two safe moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    Random,
    Euclidian,
    Bfs,
    /// Reserved for a search ordered by path cost plus straight-line distance.
    /// Rejected until implemented.
    AStar,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Random,
        Heuristic::Euclidian,
        Heuristic::Bfs,
        Heuristic::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Random => "random",
            Heuristic::Euclidian => "euclidian",
            Heuristic::Bfs => "bfs",
            Heuristic::AStar => "a-star",
        }
    }

    pub fn is_implemented(&self) -> bool {
        !matches!(self, Heuristic::AStar)
    }

    pub fn ensure_implemented(&self) -> Result<(), AutopilotError> {
        if self.is_implemented() {
            Ok(())
        } else {
            Err(self.reserved_error())
        }
    }

    fn reserved_error(&self) -> AutopilotError {
        AutopilotError::configuration(format!(
            "heuristic '{}' is reserved and not implemented",
            self
        ))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = AutopilotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|heuristic| heuristic.name() == s)
            .ok_or_else(|| AutopilotError::configuration(format!("unknown heuristic '{}'", s)))
    }
}

/// Length of the hint-following path to the target. `Unbounded` sorts after
/// every finite distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchDistance {
    Steps(usize),
    Unbounded,
}

/// Picks the next head position among `candidates`.
///
/// A candidate on the body is disqualified, except on the tail which moves
/// away this tick. A lone safe candidate is returned without consulting the
/// heuristic; with none left the snake is trapped.
pub fn choose(
    candidates: Candidates,
    snapshot: &BoardSnapshot,
    field: &HintField,
    heuristic: Heuristic,
    rng: &mut SessionRng,
) -> Result<Point, AutopilotError> {
    let head = snapshot
        .head()
        .ok_or_else(|| AutopilotError::configuration("snake has no head"))?;
    let is_safe = |point: Point| !snapshot.body[1..].contains(&point);

    let (first, second) = match candidates {
        Candidates::Single(point) if is_safe(point) => return Ok(point),
        Candidates::Single(_) => return Err(AutopilotError::NoSafeMove { head }),
        Candidates::Pair { horizontal, vertical } => (horizontal, vertical),
    };

    match (is_safe(first), is_safe(second)) {
        (false, false) => Err(AutopilotError::NoSafeMove { head }),
        (true, false) => Ok(first),
        (false, true) => Ok(second),
        (true, true) => match heuristic {
            Heuristic::Random => Ok(rng.pick(first, second)),
            Heuristic::Euclidian => Ok(euclidean_choice(first, second, snapshot.target, rng)),
            Heuristic::Bfs => {
                let first_distance = search_distance(first, snapshot.target, &snapshot.body, field)?;
                let second_distance = search_distance(second, snapshot.target, &snapshot.body, field)?;
                Ok(pick_smaller(first, first_distance, second, second_distance, rng))
            }
            Heuristic::AStar => Err(heuristic.reserved_error()),
        },
    }
}

/// Closer point to `target` by straight-line distance, random on an exact tie.
pub fn euclidean_choice(first: Point, second: Point, target: Point, rng: &mut SessionRng) -> Point {
    pick_smaller(
        first,
        first.euclidean_distance(target),
        second,
        second.euclidean_distance(target),
        rng,
    )
}

/// Breadth-first search from `start` to `target` where each cell's successors
/// are its hint candidates.
///
/// `start` is the cell the head enters on the next move. A cell entered on move
/// `m` is blocked while it still appears in `body[m..]`: the tail gives up one
/// segment per move.
pub fn search_distance(
    start: Point,
    target: Point,
    body: &[Point],
    field: &HintField,
) -> Result<SearchDistance, AutopilotError> {
    let size = field.size();
    let cell_count = size.cell_count();

    // Move number after which each cell is free again; 0 for empty cells.
    let mut released_after = vec![0usize; cell_count];
    for (index, segment) in body.iter().enumerate() {
        released_after[size.index(*segment)] = index + 1;
    }

    if released_after[size.index(start)] > 1 {
        return Ok(SearchDistance::Unbounded);
    }

    let mut visited = vec![false; cell_count];
    let mut visited_count = 1;
    let mut queue = VecDeque::new();
    visited[size.index(start)] = true;
    queue.push_back((start, 0usize));

    while let Some((cell, distance)) = queue.pop_front() {
        if cell == target {
            return Ok(SearchDistance::Steps(distance));
        }

        let entered_on = distance + 2;
        for next in resolve(cell, field.hint(cell), &size)?.points() {
            let index = size.index(next);
            if visited[index] || released_after[index] > entered_on {
                continue;
            }
            visited[index] = true;
            visited_count += 1;
            if visited_count > cell_count {
                return Err(AutopilotError::invariant(format!(
                    "search visited {} cells on a {}x{} board",
                    visited_count, size.width, size.height
                )));
            }
            queue.push_back((next, distance + 1));
        }
    }

    Ok(SearchDistance::Unbounded)
}

fn pick_smaller<D: PartialOrd>(
    first: Point,
    first_distance: D,
    second: Point,
    second_distance: D,
    rng: &mut SessionRng,
) -> Point {
    match first_distance.partial_cmp(&second_distance) {
        Some(Ordering::Less) => first,
        Some(Ordering::Greater) => second,
        _ => rng.pick(first, second),
    }
}
