//! Pente engine and alpha-beta agent.
//!
//! This module provides:
//! - [`Board`]: a 19x19 position with pair captures, win detection and
//!   make/unmake backtracking.
//! - [`AlphaBeta`]: depth-limited minimax with alpha-beta pruning over a
//!   weighted static evaluation ([`EvalWeights`]).
//! - [`GameInput`]: the `input.txt` format (colour, clock, captures, board).
//!
//! Quick start
//! ```
//! use ai_coursework::pente::{self, GameInput};
//!
//! let mut text = String::from("WHITE\n100.0\n0,0\n");
//! for _ in 0..19 {
//!     text.push_str(&".".repeat(19));
//!     text.push('\n');
//! }
//! let mut input: GameInput = text.parse().unwrap();
//! let mv = pente::choose_move(&mut input, &Default::default()).unwrap();
//! assert_eq!(mv.to_notation(), "10K");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod board;
mod heuristic;
mod search;

pub use board::{Board, Coord, Stone, BOARD_SIZE, CAPTURE_WIN, CENTER};
pub use heuristic::EvalWeights;
pub use search::{minimax_value, AlphaBeta};

/// Agent settings. Defaults search one ply over every legal move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Plies to search. Choosing a move always searches at least 1 ply, so
    /// 0 behaves like 1 there; [`AlphaBeta::state_value`] honours 0 as a
    /// static evaluation.
    pub depth: u32,
    /// Plies to search once the clock drops below `low_clock_seconds`.
    pub low_clock_depth: u32,
    pub low_clock_seconds: f64,
    /// Only consider empty points within this distance of a stone.
    pub candidate_radius: Option<usize>,
    pub weights: EvalWeights,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            low_clock_depth: 1,
            low_clock_seconds: 10.0,
            candidate_radius: None,
            weights: EvalWeights::default(),
        }
    }
}

/// Node counters for the last search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub evals: u64,
    pub cutoffs: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum PenteError {
    #[error("unknown colour {0:?}, expected WHITE or BLACK")]
    UnknownColor(String),
    #[error("input ended before the {0} line")]
    MissingLine(&'static str),
    #[error("invalid clock value {0:?}")]
    BadClock(String),
    #[error("invalid capture counts {0:?}, expected `<white>,<black>`")]
    BadCaptures(String),
    #[error("board line {line} has {found} points, expected 19")]
    RowWidth { line: usize, found: usize },
    #[error("board line {line}: unexpected point {ch:?}")]
    BadPoint { line: usize, ch: char },
    #[error("invalid move notation {0:?}")]
    BadNotation(String),
    #[error("point {0:?} is occupied")]
    Occupied(Coord),
    #[error("point {0:?} is off the board")]
    OffBoard(Coord),
}

/// A parsed `input.txt`.
#[derive(Debug, Clone)]
pub struct GameInput {
    pub board: Board,
    pub seconds_left: f64,
}

impl FromStr for GameInput {
    type Err = PenteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let mut next_line = |what: &'static str| lines.next().ok_or(PenteError::MissingLine(what));

        let color: Stone = next_line("colour")?.parse()?;
        let clock = next_line("clock")?.trim();
        let seconds_left: f64 = clock.parse().map_err(|_| PenteError::BadClock(clock.to_string()))?;
        let caps = next_line("captures")?.trim();
        let (white, black) = caps
            .split_once(',')
            .and_then(|(w, b)| Some((w.trim().parse::<u32>().ok()?, b.trim().parse::<u32>().ok()?)))
            .ok_or_else(|| PenteError::BadCaptures(caps.to_string()))?;

        let mut points = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (i, row) in points.iter_mut().enumerate() {
            let line_no = 4 + i;
            *row = board::parse_row(line_no, next_line("board")?)?;
        }
        Ok(GameInput { board: Board::from_points(points, color, white, black), seconds_left })
    }
}

/// Pick a move for the side to move, honouring the clock.
pub fn choose_move(input: &mut GameInput, cfg: &PlayerConfig) -> Option<Coord> {
    let mut agent = AlphaBeta::with_config(cfg.clone());
    agent.best_move_for_clock(&mut input.board, input.seconds_left)
}

/// Static evaluation of `board` for the side to move.
/// Enabled only with the `bench-internal` feature to keep the public API small.
#[cfg(feature = "bench-internal")]
pub fn heuristic_value(board: &Board, weights: &EvalWeights) -> f64 {
    heuristic::evaluate(board, board.to_move(), weights)
}

/// The single output line.
pub fn format_output(mv: Coord) -> String { mv.to_notation() }

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_rows() -> String {
        let mut s = String::new();
        for _ in 0..BOARD_SIZE {
            s.push_str(&".".repeat(BOARD_SIZE));
            s.push('\n');
        }
        s
    }

    #[test]
    fn it_parses_header_and_board() {
        let mut rows: Vec<String> = empty_rows().lines().map(str::to_string).collect();
        rows[9].replace_range(9..10, "w");
        rows[3].replace_range(0..1, "b");
        let text = format!("BLACK\n12.5\n2,4\n{}\n", rows.join("\n"));
        let input: GameInput = text.parse().unwrap();
        assert_eq!(input.seconds_left, 12.5);
        assert_eq!(input.board.to_move(), Stone::Black);
        assert_eq!(input.board.captures(Stone::White), 2);
        assert_eq!(input.board.captures(Stone::Black), 4);
        assert_eq!(input.board.get(CENTER), Some(Stone::White));
        assert_eq!(input.board.get(Coord::new(3, 0)), Some(Stone::Black));
    }

    #[test]
    fn it_rejects_bad_header() {
        let bad_color = format!("GREEN\n1\n0,0\n{}", empty_rows());
        assert!(matches!(bad_color.parse::<GameInput>(), Err(PenteError::UnknownColor(_))));
        let bad_caps = format!("WHITE\n1\n0;0\n{}", empty_rows());
        assert!(matches!(bad_caps.parse::<GameInput>(), Err(PenteError::BadCaptures(_))));
        let short = "WHITE\n1\n0,0\n...................\n";
        assert!(matches!(short.parse::<GameInput>(), Err(PenteError::MissingLine("board"))));
    }

    #[test]
    fn white_second_move_is_far_from_center() {
        let mut rows: Vec<String> = empty_rows().lines().map(str::to_string).collect();
        rows[9].replace_range(9..10, "w");
        rows[8].replace_range(9..10, "b");
        let text = format!("WHITE\n100\n0,0\n{}\n", rows.join("\n"));
        let mut input: GameInput = text.parse().unwrap();
        let mv = choose_move(&mut input, &PlayerConfig::default()).unwrap();
        assert!(!(7..=11).contains(&mv.row) || !(7..=11).contains(&mv.col));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: PlayerConfig = toml::from_str("depth = 2\n[weights]\nthreat = 2.0\n").unwrap();
        assert_eq!(cfg.depth, 2);
        assert_eq!(cfg.low_clock_depth, 1);
        assert_eq!(cfg.weights.threat, 2.0);
        assert_eq!(cfg.weights.line, 1.0);
        assert_eq!(cfg.candidate_radius, None);
    }
}
