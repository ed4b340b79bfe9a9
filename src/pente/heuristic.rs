use serde::{Deserialize, Serialize};

use super::board::{Board, Coord, Stone, AXES, BOARD_SIZE, DIRECTIONS};

/// Weights of the static evaluation terms.
///
/// The score for `me` is
/// `line * own_line + captures * own_captures - threat * pairs_at_risk - opponent_line * their_line`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub line: f64,
    pub captures: f64,
    pub threat: f64,
    pub opponent_line: f64,
}

impl Default for EvalWeights {
    fn default() -> Self { Self { line: 1.0, captures: 1.0, threat: 1.2, opponent_line: 1.2 } }
}

/// Static evaluation of `board` from `me`'s point of view.
pub(crate) fn evaluate(board: &Board, me: Stone, w: &EvalWeights) -> f64 {
    let own_line = line_potential(board, me) as f64;
    let their_line = line_potential(board, me.opponent()) as f64;
    let at_risk = pairs_at_risk(board, me) as f64;
    let caps = board.captures(me) as f64;
    w.line * own_line + w.captures * caps - w.threat * at_risk - w.opponent_line * their_line
}

/// Best number of `stone`'s stones an empty point could line up with.
///
/// For each empty point and axis, counts `stone`'s stones on the next four
/// points each way, stopping a ray at an opposing stone. A ray only counts
/// when all four of its points are on the board.
pub(crate) fn line_potential(board: &Board, stone: Stone) -> u32 {
    let them = stone.opponent();
    let mut best = 0;
    for at in board.empty_points() {
        for axis in AXES {
            let ray = |sign: isize| -> u32 {
                if at.offset(axis, sign * 4).is_none() {
                    return 0;
                }
                let mut count = 0;
                for k in 1..=4 {
                    match at.offset(axis, sign * k).and_then(|c| board.get(c)) {
                        Some(s) if s == them => break,
                        Some(_) => count += 1,
                        None => {}
                    }
                }
                count
            };
            best = best.max(ray(1) + ray(-1));
        }
    }
    best
}

/// Stones of `stone` that the opponent could capture with one move,
/// counted once per capturing point and direction.
pub(crate) fn pairs_at_risk(board: &Board, stone: Stone) -> u32 {
    let them = stone.opponent();
    let mut risk = 0;
    for at in board.empty_points() {
        for dir in DIRECTIONS {
            let pattern = [Some(stone), Some(stone), Some(them)];
            let hit = (1..=3).all(|k| {
                at.offset(dir, k as isize).map(|c| board.get(c)) == Some(pattern[k - 1])
            });
            if hit {
                risk += 2;
            }
        }
    }
    risk
}

/// Empty points within `radius` (Chebyshev) of any stone, row-major.
pub(crate) fn near_stones(board: &Board, radius: usize, moves: Vec<Coord>) -> Vec<Coord> {
    let mut occupied = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let c = Coord::new(row, col);
            if board.get(c).is_some() {
                occupied.push(c);
            }
        }
    }
    if occupied.is_empty() {
        return moves;
    }
    let near: Vec<Coord> = moves
        .iter()
        .copied()
        .filter(|m| occupied.iter().any(|o| o.row.abs_diff(m.row) <= radius && o.col.abs_diff(m.col) <= radius))
        .collect();
    if near.is_empty() { moves } else { near }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pente::board::CENTER;

    fn board_with(white: &[(usize, usize)], black: &[(usize, usize)]) -> Board {
        let mut points = [[None; BOARD_SIZE]; BOARD_SIZE];
        for &(r, c) in white {
            points[r][c] = Some(Stone::White);
        }
        for &(r, c) in black {
            points[r][c] = Some(Stone::Black);
        }
        Board::from_points(points, Stone::White, 0, 0)
    }

    #[test]
    fn it_counts_line_potential() {
        let b = board_with(&[(9, 9), (9, 10), (9, 11)], &[]);
        // (9, 8) sees three white stones to its right.
        assert_eq!(line_potential(&b, Stone::White), 3);
        assert_eq!(line_potential(&b, Stone::Black), 0);
    }

    #[test]
    fn line_potential_joins_both_sides() {
        let b = board_with(&[(9, 7), (9, 8), (9, 10), (9, 11)], &[]);
        assert_eq!(line_potential(&b, Stone::White), 4);
    }

    #[test]
    fn opponent_stone_blocks_ray() {
        let b = board_with(&[(9, 10), (9, 11)], &[(9, 12)]);
        let blocked = board_with(&[(9, 11), (9, 12)], &[(9, 10)]);
        assert_eq!(line_potential(&b, Stone::White), 2);
        // From (9, 9) the ray to the right hits black first.
        assert!(line_potential(&blocked, Stone::White) <= 2);
    }

    #[test]
    fn it_counts_pairs_at_risk() {
        // Black at (9, 6), white pair at (9, 7)-(9, 8); black threatens (9, 9).
        let b = board_with(&[(9, 7), (9, 8)], &[(9, 6)]);
        assert_eq!(pairs_at_risk(&b, Stone::White), 2);
        assert_eq!(pairs_at_risk(&b, Stone::Black), 0);
    }

    #[test]
    fn evaluation_uses_weights() {
        let b = board_with(&[(9, 7), (9, 8)], &[(9, 6)]);
        let zero = EvalWeights { line: 0.0, captures: 0.0, threat: 1.0, opponent_line: 0.0 };
        assert_eq!(evaluate(&b, Stone::White, &zero), -2.0);
        let caps = Board::from_points([[None; BOARD_SIZE]; BOARD_SIZE], Stone::White, 6, 0);
        let only_caps = EvalWeights { line: 0.0, captures: 1.0, threat: 0.0, opponent_line: 0.0 };
        assert_eq!(evaluate(&caps, Stone::White, &only_caps), 6.0);
    }

    #[test]
    fn near_stones_filters_far_points() {
        let b = board_with(&[(CENTER.row, CENTER.col)], &[]);
        let all: Vec<Coord> = b.empty_points().collect();
        let near = near_stones(&b, 1, all);
        assert_eq!(near.len(), 8);
        let empty = Board::new();
        assert_eq!(near_stones(&empty, 1, empty.empty_points().collect()).len(), BOARD_SIZE * BOARD_SIZE);
    }
}
