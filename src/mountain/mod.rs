//! Pathfinding to ski lodges on an elevation grid.
//!
//! A [`Mountain`] holds signed elevations (negative cells are trees), a start
//! cell, a stamina budget and a list of lodges. [`Pathfinder`] runs one of
//! three strategies per lodge:
//! - [`Algorithm::Bfs`]: fewest moves, uphill steps capped by stamina.
//! - [`Algorithm::Ucs`]: cheapest horizontal cost (10 straight, 14 diagonal).
//! - [`Algorithm::AStar`]: cheapest total cost including climbing, where
//!   downhill momentum extends the stamina budget.
//!
//! Quick start
//! ```
//! use ai_coursework::mountain::{self, MountainInput, PathOutcome};
//!
//! let text = "UCS\n3 1\n0 0\n5\n1\n2 0\n0 1 2\n";
//! let input: MountainInput = text.parse().unwrap();
//! let paths = mountain::solve(&input);
//! assert_eq!(mountain::format_output(&paths), "0,0 1,0 2,0\n");
//! ```

use std::fmt;
use std::str::FromStr;

mod grid;
mod heuristic;
mod search;

pub use grid::{Cell, Mountain, MountainInput, DIAGONAL_COST, STRAIGHT_COST};
pub use search::{path_cost, Pathfinder};

/// Search strategy named on the first input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    Ucs,
    AStar,
}

impl FromStr for Algorithm {
    type Err = MountainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BFS" => Ok(Algorithm::Bfs),
            "UCS" => Ok(Algorithm::Ucs),
            "A*" => Ok(Algorithm::AStar),
            other => Err(MountainError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Ucs => "UCS",
            Algorithm::AStar => "A*",
        })
    }
}

/// Result of searching one lodge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// Cells from start to lodge, both inclusive.
    Found(Vec<Cell>),
    Fail,
}

impl PathOutcome {
    #[inline]
    pub fn is_found(&self) -> bool { matches!(self, PathOutcome::Found(_)) }
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathOutcome::Found(path) => {
                let mut first = true;
                for cell in path {
                    if !first {
                        f.write_str(" ")?;
                    }
                    write!(f, "{cell}")?;
                    first = false;
                }
                Ok(())
            }
            PathOutcome::Fail => f.write_str("FAIL"),
        }
    }
}

/// Node counters for the last solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: u64,
    pub generated: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum MountainError {
    #[error("unknown algorithm {0:?}, expected BFS, UCS or A*")]
    UnknownAlgorithm(String),
    #[error("input ended before the {0} line")]
    MissingLine(&'static str),
    #[error("line {line}: invalid number {token:?}")]
    BadNumber { line: usize, token: String },
    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth { row: usize, expected: usize, found: usize },
    #[error("elevation grid is empty")]
    EmptyGrid,
    #[error("coordinate {x},{y} is outside the grid")]
    OutOfBounds { x: usize, y: usize },
}

/// Run the requested algorithm for every lodge, in file order.
pub fn solve(input: &MountainInput) -> Vec<PathOutcome> {
    Pathfinder::new(input.algorithm).solve(&input.mountain)
}

/// One line per lodge: `x,y` pairs separated by spaces, or `FAIL`.
pub fn format_output(paths: &[PathOutcome]) -> String {
    let mut out = String::new();
    for p in paths {
        out.push_str(&p.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_formats_paths_and_failures() {
        let paths = vec![
            PathOutcome::Found(vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(1, 2)]),
            PathOutcome::Fail,
        ];
        assert_eq!(format_output(&paths), "0,0 1,1 2,1\nFAIL\n");
    }

    #[test]
    fn algorithm_round_trips_through_text() {
        for algo in [Algorithm::Bfs, Algorithm::Ucs, Algorithm::AStar] {
            assert_eq!(algo.to_string().parse::<Algorithm>().unwrap(), algo);
        }
    }
}
