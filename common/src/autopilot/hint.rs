use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::AutopilotError;

/// Allowed movement at a cell: a horizontal pull and a vertical pull, each
/// `-1`, `0` or `1`. `dy = 1` points down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectionHint {
    pub dx: i8,
    pub dy: i8,
}

impl DirectionHint {
    pub const LEFT: DirectionHint = DirectionHint::new(-1, 0);
    pub const RIGHT: DirectionHint = DirectionHint::new(1, 0);
    pub const UP: DirectionHint = DirectionHint::new(0, -1);
    pub const DOWN: DirectionHint = DirectionHint::new(0, 1);

    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    pub fn is_degenerate(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Both axes open, so the head has a choice.
    pub fn is_branch(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    pub fn negated(&self) -> Self {
        Self::new(-self.dx, -self.dy)
    }

    pub fn arrow(&self) -> char {
        match (self.dx, self.dy) {
            (-1, 0) => '←',
            (1, 0) => '→',
            (0, -1) => '↑',
            (0, 1) => '↓',
            (-1, -1) => '↖',
            (1, -1) => '↗',
            (-1, 1) => '↙',
            (1, 1) => '↘',
            _ => '·',
        }
    }
}

impl fmt::Display for DirectionHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arrow())
    }
}

/// Sweep pattern used to build the hint field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleMode {
    /// One forced move per cell; a Hamiltonian cycle on boards with even height.
    Full,
    /// Alternating pulls per row and column, two choices in the interior.
    Improved,
}

impl CycleMode {
    pub const ALL: [CycleMode; 2] = [CycleMode::Full, CycleMode::Improved];

    pub fn name(&self) -> &'static str {
        match self {
            CycleMode::Full => "full",
            CycleMode::Improved => "improved",
        }
    }
}

impl fmt::Display for CycleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CycleMode {
    type Err = AutopilotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CycleMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| AutopilotError::configuration(format!("unknown cycle mode '{}'", s)))
    }
}

/// Hint for a single cell. Callers guarantee `x < width`, `y < height` and a
/// board of at least 2x2.
pub fn compute_hint(x: usize, y: usize, width: usize, height: usize, mode: CycleMode) -> DirectionHint {
    let cell = CellContext {
        x,
        y,
        last_x: width - 1,
        last_y: height - 1,
    };
    match mode {
        CycleMode::Full => full_hint(&cell),
        CycleMode::Improved => improved_hint(&cell),
    }
}

struct CellContext {
    x: usize,
    y: usize,
    last_x: usize,
    last_y: usize,
}

impl CellContext {
    fn odd_x(&self) -> bool {
        self.x % 2 == 1
    }

    fn odd_y(&self) -> bool {
        self.y % 2 == 1
    }
}

// Rows run right on odd y and left on even y. Column 0 is the return lane,
// columns 1 and w-1 turn each row into the next one up.
fn full_hint(cell: &CellContext) -> DirectionHint {
    let first = cell.x == 0;
    let second = cell.x == 1;
    let last = cell.x == cell.last_x;
    let top = cell.y == 0;
    let bottom = cell.y == cell.last_y;

    match (first, bottom, last, second, top, cell.odd_y()) {
        (true, true, _, _, _, _) => DirectionHint::RIGHT,
        (true, false, _, _, _, _) => DirectionHint::DOWN,
        (false, _, true, _, _, true) => DirectionHint::UP,
        (false, _, _, true, false, false) => DirectionHint::UP,
        (false, _, _, _, _, true) => DirectionHint::RIGHT,
        (false, _, _, _, _, false) => DirectionHint::LEFT,
    }
}

// Indexed by [odd_y][odd_x]: vertical pull follows column parity, horizontal
// pull follows row parity.
const IMPROVED_PULLS: [[DirectionHint; 2]; 2] = [
    [DirectionHint::new(-1, 1), DirectionHint::new(-1, -1)],
    [DirectionHint::new(1, 1), DirectionHint::new(1, -1)],
];

fn improved_hint(cell: &CellContext) -> DirectionHint {
    let pull = IMPROVED_PULLS[cell.odd_y() as usize][cell.odd_x() as usize];

    let dx = match (pull.dx, cell.x == 0, cell.x == cell.last_x) {
        (-1, true, _) | (1, _, true) => 0,
        (dx, _, _) => dx,
    };
    let dy = match (pull.dy, cell.y == 0, cell.y == cell.last_y) {
        (-1, true, _) | (1, _, true) => 0,
        (dy, _, _) => dy,
    };

    if dx == 0 && dy == 0 {
        // Both pulls cancelled at a bottom corner of an odd-sided board:
        // open both inward axes so the corner can be left whichever way it
        // was entered.
        let dx = if cell.x == 0 { 1 } else { -1 };
        let dy = if cell.y == 0 { 1 } else { -1 };
        return DirectionHint::new(dx, dy);
    }
    DirectionHint::new(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(width: usize, height: usize, mode: CycleMode) -> Vec<Vec<DirectionHint>> {
        (0..height)
            .map(|y| (0..width).map(|x| compute_hint(x, y, width, height, mode)).collect())
            .collect()
    }

    fn h(dx: i8, dy: i8) -> DirectionHint {
        DirectionHint::new(dx, dy)
    }

    #[test]
    fn test_improved_4x4_matches_hand_table() {
        let expected = vec![
            vec![h(0, 1), h(-1, 0), h(-1, 1), h(-1, 0)],
            vec![h(1, 1), h(1, -1), h(1, 1), h(0, -1)],
            vec![h(0, 1), h(-1, -1), h(-1, 1), h(-1, -1)],
            vec![h(1, 0), h(1, -1), h(1, 0), h(0, -1)],
        ];
        assert_eq!(table(4, 4, CycleMode::Improved), expected);
    }

    #[test]
    fn test_full_4x4_matches_hand_table() {
        let expected = vec![
            vec![h(0, 1), h(-1, 0), h(-1, 0), h(-1, 0)],
            vec![h(0, 1), h(1, 0), h(1, 0), h(0, -1)],
            vec![h(0, 1), h(0, -1), h(-1, 0), h(-1, 0)],
            vec![h(1, 0), h(1, 0), h(1, 0), h(0, -1)],
        ];
        assert_eq!(table(4, 4, CycleMode::Full), expected);
    }

    #[test]
    fn test_no_degenerate_or_outward_hints() {
        for mode in CycleMode::ALL {
            for width in 2..=9 {
                for height in 2..=9 {
                    for (y, row) in table(width, height, mode).iter().enumerate() {
                        for (x, hint) in row.iter().enumerate() {
                            assert!(!hint.is_degenerate(), "{mode} {width}x{height} ({x}, {y})");
                            let nx = x as isize + hint.dx as isize;
                            let ny = y as isize + hint.dy as isize;
                            assert!((0..width as isize).contains(&nx), "{mode} {width}x{height} ({x}, {y})");
                            assert!((0..height as isize).contains(&ny), "{mode} {width}x{height} ({x}, {y})");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_full_mode_never_branches() {
        for width in 2..=7 {
            for height in 2..=7 {
                assert!(table(width, height, CycleMode::Full).iter().flatten().all(|hint| !hint.is_branch()));
            }
        }
    }

    #[test]
    fn test_full_mode_is_hamiltonian_cycle_on_even_heights() {
        for width in 2..=8 {
            for height in (2..=8).step_by(2) {
                let mut seen = vec![false; width * height];
                let (mut x, mut y) = (0usize, 0usize);
                for _ in 0..width * height {
                    assert!(!seen[y * width + x], "{width}x{height} revisits ({x}, {y})");
                    seen[y * width + x] = true;
                    let hint = compute_hint(x, y, width, height, CycleMode::Full);
                    x = (x as isize + hint.dx as isize) as usize;
                    y = (y as isize + hint.dy as isize) as usize;
                }
                assert_eq!((x, y), (0, 0), "{width}x{height} does not close");
                assert!(seen.iter().all(|&visited| visited));
            }
        }
    }

    #[test]
    fn test_improved_corner_escape_on_odd_boards() {
        assert_eq!(compute_hint(0, 4, 4, 5, CycleMode::Improved), h(1, -1));
        assert_eq!(compute_hint(4, 3, 5, 4, CycleMode::Improved), h(-1, -1));
    }

    #[test]
    fn test_improved_is_point_symmetric_on_even_boards() {
        for (width, height) in [(4, 4), (6, 4), (8, 10)] {
            for y in 0..height {
                for x in 0..width {
                    let hint = compute_hint(x, y, width, height, CycleMode::Improved);
                    let mirrored = compute_hint(width - 1 - x, height - 1 - y, width, height, CycleMode::Improved);
                    assert_eq!(mirrored, hint.negated());
                }
            }
        }
    }

    #[test]
    fn test_cycle_mode_parsing() {
        assert_eq!("full".parse::<CycleMode>(), Ok(CycleMode::Full));
        assert_eq!("improved".parse::<CycleMode>(), Ok(CycleMode::Improved));
        assert!(matches!(
            "spiral".parse::<CycleMode>(),
            Err(AutopilotError::Configuration(_))
        ));
    }
}
