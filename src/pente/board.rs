use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::PenteError;

pub const BOARD_SIZE: usize = 19;
/// Captured stones needed to win.
pub const CAPTURE_WIN: u32 = 10;
/// White's first stone must go here.
pub const CENTER: Coord = Coord { row: 9, col: 9 };

/// Column letters in Pente notation (no `I`).
const COLUMNS: &[u8; BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRST";

/// All eight neighbour directions.
pub(crate) const DIRECTIONS: [(isize, isize); 8] =
    [(-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1)];

/// The four line axes (each also scanned in reverse).
pub(crate) const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    White,
    Black,
}

impl Stone {
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::White => Stone::Black,
            Stone::Black => Stone::White,
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::White => 'w',
            Stone::Black => 'b',
        }
    }

    #[inline]
    fn idx(self) -> usize { self as usize }
}

impl FromStr for Stone {
    type Err = PenteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "WHITE" => Ok(Stone::White),
            "BLACK" => Ok(Stone::Black),
            other => Err(PenteError::UnknownColor(other.to_string())),
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stone::White => "WHITE",
            Stone::Black => "BLACK",
        })
    }
}

/// Board intersection. `row` 0 is the top line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self { Coord { row, col } }

    /// Step `k` times along `(dr, dc)`, or `None` off the board.
    #[inline]
    pub fn offset(self, (dr, dc): (isize, isize), k: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr * k)?;
        let col = self.col.checked_add_signed(dc * k)?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Coord { row, col })
    }

    /// Pente notation: row number counted from the bottom, then column letter.
    ///
    /// ```
    /// use ai_coursework::pente::Coord;
    /// assert_eq!(Coord::new(9, 9).to_notation(), "10K");
    /// assert_eq!(Coord::new(0, 0).to_notation(), "19A");
    /// ```
    pub fn to_notation(self) -> String {
        format!("{}{}", BOARD_SIZE - self.row, COLUMNS[self.col] as char)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_notation()) }
}

impl FromStr for Coord {
    type Err = PenteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || PenteError::BadNotation(s.to_string());
        let split = s.find(|c: char| c.is_ascii_alphabetic()).ok_or_else(bad)?;
        let (num, letter) = s.split_at(split);
        let number: usize = num.parse().map_err(|_| bad())?;
        let letter = letter.as_bytes();
        if letter.len() != 1 || !(1..=BOARD_SIZE).contains(&number) {
            return Err(bad());
        }
        let col = COLUMNS
            .iter()
            .position(|&c| c == letter[0].to_ascii_uppercase())
            .ok_or_else(bad)?;
        Ok(Coord { row: BOARD_SIZE - number, col })
    }
}

/// What a move changed, so it can be taken back exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Undo {
    mv: Coord,
    captured: Vec<Coord>,
    captures_before: [u32; 2],
}

/// 19x19 Pente position with capture counters and a make/unmake history.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    points: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
    /// Stones captured *by* each colour.
    captures: [u32; 2],
    /// Stones currently on the board per colour.
    on_board: [u32; 2],
    to_move: Stone,
    history: Vec<Undo>,
}

impl Board {
    /// Empty board, White to move.
    pub fn new() -> Self {
        Board {
            points: [[None; BOARD_SIZE]; BOARD_SIZE],
            captures: [0; 2],
            on_board: [0; 2],
            to_move: Stone::White,
            history: Vec::new(),
        }
    }

    /// Build a position from a grid of points.
    pub fn from_points(
        points: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
        to_move: Stone,
        white_captures: u32,
        black_captures: u32,
    ) -> Self {
        let mut on_board = [0u32; 2];
        for stone in points.iter().flatten().flatten() {
            on_board[stone.idx()] += 1;
        }
        Board {
            points,
            captures: [white_captures, black_captures],
            on_board,
            to_move,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<Stone> { self.points[c.row][c.col] }

    #[inline]
    pub fn to_move(&self) -> Stone { self.to_move }

    /// Stones captured by `stone`.
    #[inline]
    pub fn captures(&self, stone: Stone) -> u32 { self.captures[stone.idx()] }

    /// Number of plies made through [`Self::make_move`] and not yet undone.
    #[inline]
    pub fn ply(&self) -> usize { self.history.len() }

    /// Moves made through [`Self::make_move`], oldest first.
    pub fn move_history(&self) -> impl Iterator<Item = Coord> + '_ { self.history.iter().map(|u| u.mv) }

    /// Stones of `stone` currently on the board. Captured stones are not counted.
    #[inline]
    pub fn stones_on_board(&self, stone: Stone) -> u32 { self.on_board[stone.idx()] }

    /// Empty intersections in row-major order.
    pub fn empty_points(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { row, col }))
            .filter(|&c| self.get(c).is_none())
    }

    /// Legal moves for the side to move, row-major.
    ///
    /// White's first stone goes on the centre; White's second stone must be
    /// at least three intersections away from it. White's move number counts
    /// only its stones on the board, so lost stones never advance it.
    pub fn legal_moves(&self) -> Vec<Coord> {
        if self.to_move == Stone::White {
            match self.stones_on_board(Stone::White) {
                0 if self.get(CENTER).is_none() => return vec![CENTER],
                1 => {
                    let far: Vec<Coord> = self.empty_points().filter(|c| !near_center(*c)).collect();
                    if !far.is_empty() {
                        return far;
                    }
                }
                _ => {}
            }
        }
        self.empty_points().collect()
    }

    /// Place a stone for the side to move, resolving captures.
    pub fn make_move(&mut self, mv: Coord) -> Result<(), PenteError> {
        if mv.row >= BOARD_SIZE || mv.col >= BOARD_SIZE {
            return Err(PenteError::OffBoard(mv));
        }
        if self.get(mv).is_some() {
            return Err(PenteError::Occupied(mv));
        }
        self.play(mv);
        Ok(())
    }

    /// Unchecked [`Self::make_move`] for search; `mv` must be empty.
    pub(crate) fn play(&mut self, mv: Coord) {
        debug_assert!(self.get(mv).is_none());
        let me = self.to_move;
        let them = me.opponent();
        let mut undo = Undo { mv, captured: Vec::new(), captures_before: self.captures };
        self.points[mv.row][mv.col] = Some(me);
        self.on_board[me.idx()] += 1;

        for dir in DIRECTIONS {
            let (Some(a), Some(b), Some(c)) = (mv.offset(dir, 1), mv.offset(dir, 2), mv.offset(dir, 3)) else {
                continue;
            };
            if self.get(a) == Some(them) && self.get(b) == Some(them) && self.get(c) == Some(me) {
                self.points[a.row][a.col] = None;
                self.points[b.row][b.col] = None;
                self.on_board[them.idx()] -= 2;
                self.captures[me.idx()] += 2;
                undo.captured.extend([a, b]);
            }
        }
        self.history.push(undo);
        self.to_move = them;
    }

    /// Take back the last move. Returns it, or `None` with no history.
    pub fn unmake_move(&mut self) -> Option<Coord> {
        let undo = self.history.pop()?;
        let mover = self.to_move.opponent();
        let victim = self.to_move;
        self.points[undo.mv.row][undo.mv.col] = None;
        self.on_board[mover.idx()] -= 1;
        for c in &undo.captured {
            self.points[c.row][c.col] = Some(victim);
        }
        self.on_board[victim.idx()] += undo.captured.len() as u32;
        self.captures = undo.captures_before;
        self.to_move = mover;
        Some(undo.mv)
    }

    /// Full-board winner check: five in a row for White, then Black, then
    /// capture wins for Black, then White.
    pub fn winner(&self) -> Option<Stone> {
        if self.has_five(Stone::White) {
            return Some(Stone::White);
        }
        if self.has_five(Stone::Black) {
            return Some(Stone::Black);
        }
        [Stone::Black, Stone::White].into_iter().find(|&s| self.captures(s) >= CAPTURE_WIN)
    }

    /// Whether the last move won the game for the player who made it.
    ///
    /// Only the mover can complete a five or reach the capture limit, so this
    /// checks lines through the last stone.
    pub fn last_move_won(&self) -> bool {
        let Some(last) = self.history.last() else { return false };
        let mover = self.to_move.opponent();
        self.captures(mover) >= CAPTURE_WIN || self.five_through(last.mv, mover)
    }

    fn five_through(&self, at: Coord, stone: Stone) -> bool {
        AXES.iter().any(|&axis| {
            let run = |sign: isize| {
                (1..5)
                    .take_while(|&k| at.offset(axis, sign * k).and_then(|c| self.get(c)) == Some(stone))
                    .count()
            };
            1 + run(1) + run(-1) >= 5
        })
    }

    fn has_five(&self, stone: Stone) -> bool {
        (0..BOARD_SIZE).any(|row| {
            (0..BOARD_SIZE).any(|col| {
                let start = Coord { row, col };
                self.get(start) == Some(stone)
                    && AXES.iter().any(|&axis| {
                        (1..5).all(|k| start.offset(axis, k).and_then(|c| self.get(c)) == Some(stone))
                    })
            })
        })
    }

    /// Scatter `n` stones on random empty points, alternating colours from
    /// the side to move. Captures are resolved as in play.
    ///
    /// ```
    /// use ai_coursework::pente::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(3);
    /// let b = Board::new().with_random_stones(&mut rng, 12);
    /// assert!(b.empty_points().count() >= 361 - 12);
    /// ```
    pub fn with_random_stones<R: Rng + ?Sized>(mut self, rng: &mut R, n: usize) -> Self {
        for _ in 0..n {
            let empties: Vec<Coord> = self.empty_points().collect();
            if empties.is_empty() {
                break;
            }
            let mv = empties[rng.gen_range(0..empties.len())];
            self.play(mv);
        }
        self.history.clear();
        self
    }
}

impl Default for Board {
    fn default() -> Self { Self::new() }
}

#[inline]
fn near_center(c: Coord) -> bool {
    (CENTER.row - 2..=CENTER.row + 2).contains(&c.row) && (CENTER.col - 2..=CENTER.col + 2).contains(&c.col)
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board(to_move={:?}, captures w={} b={}, ply={})",
            self.to_move,
            self.captures[0],
            self.captures[1],
            self.ply()
        )
    }
}

impl fmt::Display for Board {
    /// The 19 board lines of the input format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.points {
            let line: String = row.iter().map(|p| p.map_or('.', Stone::symbol)).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

pub(crate) fn parse_row(line_no: usize, line: &str) -> Result<[Option<Stone>; BOARD_SIZE], PenteError> {
    let chars: Vec<char> = line.trim().chars().collect();
    if chars.len() != BOARD_SIZE {
        return Err(PenteError::RowWidth { line: line_no, found: chars.len() });
    }
    let mut row = [None; BOARD_SIZE];
    for (slot, ch) in row.iter_mut().zip(chars) {
        *slot = match ch {
            '.' => None,
            'w' => Some(Stone::White),
            'b' => Some(Stone::Black),
            other => return Err(PenteError::BadPoint { line: line_no, ch: other }),
        };
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, stone: Stone, coords: &[(usize, usize)]) {
        for &(r, c) in coords {
            board.points[r][c] = Some(stone);
            board.on_board[stone.idx()] += 1;
        }
    }

    #[test]
    fn it_round_trips_notation() {
        for c in [Coord::new(0, 0), Coord::new(18, 18), Coord::new(9, 8), Coord::new(3, 7)] {
            assert_eq!(c.to_notation().parse::<Coord>().unwrap(), c);
        }
        assert_eq!(Coord::new(18, 8).to_notation(), "1J");
        assert!("20A".parse::<Coord>().is_err());
        assert!("5I".parse::<Coord>().is_err());
    }

    #[test]
    fn white_opens_on_center() {
        let b = Board::new();
        assert_eq!(b.legal_moves(), vec![CENTER]);
    }

    #[test]
    fn white_move_number_ignores_captures() {
        let b = Board::from_points([[None; BOARD_SIZE]; BOARD_SIZE], Stone::White, 0, 2);
        assert_eq!(b.stones_on_board(Stone::White), 0);
        assert_eq!(b.legal_moves(), vec![CENTER]);

        let mut points = [[None; BOARD_SIZE]; BOARD_SIZE];
        points[0][0] = Some(Stone::White);
        points[9][10] = Some(Stone::Black);
        let b = Board::from_points(points, Stone::White, 0, 4);
        assert!(b.legal_moves().iter().all(|&c| !near_center(c)));
    }

    #[test]
    fn white_second_move_keeps_distance() {
        let mut b = Board::new();
        b.make_move(CENTER).unwrap();
        b.make_move(Coord::new(0, 0)).unwrap();
        let moves = b.legal_moves();
        assert!(moves.iter().all(|&c| !near_center(c)));
        assert!(moves.contains(&Coord::new(6, 9)));
        assert!(!moves.contains(&Coord::new(7, 9)));
        // Black has no restrictions.
        b.make_move(Coord::new(6, 9)).unwrap();
        assert_eq!(b.legal_moves().len(), BOARD_SIZE * BOARD_SIZE - 3);
    }

    #[test]
    fn capture_removes_pair_and_undo_restores() {
        let mut b = Board::new();
        place(&mut b, Stone::White, &[(5, 5), (9, 9)]);
        place(&mut b, Stone::Black, &[(5, 6), (5, 7)]);
        let before = b.clone();
        b.make_move(Coord::new(5, 8)).unwrap();
        assert_eq!(b.get(Coord::new(5, 6)), None);
        assert_eq!(b.get(Coord::new(5, 7)), None);
        assert_eq!(b.captures(Stone::White), 2);
        assert_eq!(b.to_move(), Stone::Black);
        assert_eq!(b.unmake_move(), Some(Coord::new(5, 8)));
        assert_eq!(b, before);
    }

    #[test]
    fn captures_in_several_directions_at_once() {
        let mut b = Board::new();
        place(&mut b, Stone::White, &[(5, 8), (8, 5), (9, 9)]);
        place(&mut b, Stone::Black, &[(5, 6), (5, 7), (6, 5), (7, 5), (6, 6)]);
        let before = b.clone();
        b.make_move(Coord::new(5, 5)).unwrap();
        assert_eq!(b.captures(Stone::White), 4);
        for gone in [(5, 6), (5, 7), (6, 5), (7, 5)] {
            assert_eq!(b.get(Coord::new(gone.0, gone.1)), None);
        }
        // The diagonal has no white stone behind it.
        assert_eq!(b.get(Coord::new(6, 6)), Some(Stone::Black));
        b.unmake_move();
        assert_eq!(b, before);
    }

    #[test]
    fn no_capture_of_single_or_triple() {
        let mut b = Board::new();
        place(&mut b, Stone::White, &[(0, 0), (9, 9)]);
        place(&mut b, Stone::Black, &[(0, 1), (0, 2), (0, 3)]);
        b.make_move(Coord::new(0, 4)).unwrap();
        assert_eq!(b.captures(Stone::White), 0);
        assert_eq!(b.get(Coord::new(0, 1)), Some(Stone::Black));
    }

    #[test]
    fn five_in_a_row_wins() {
        let mut b = Board::new();
        place(&mut b, Stone::White, &[(9, 9), (3, 3), (4, 4), (5, 5), (6, 6)]);
        place(&mut b, Stone::Black, &[(0, 0), (0, 1)]);
        assert_eq!(b.winner(), None);
        b.make_move(Coord::new(7, 7)).unwrap();
        assert!(b.last_move_won());
        assert_eq!(b.winner(), Some(Stone::White));
        b.unmake_move();
        assert!(!b.last_move_won());
        assert_eq!(b.winner(), None);
    }

    #[test]
    fn anti_diagonal_five_is_detected() {
        let mut b = Board::new();
        place(&mut b, Stone::Black, &[(0, 18), (1, 17), (2, 16), (3, 15), (4, 14)]);
        assert_eq!(b.winner(), Some(Stone::Black));
    }

    #[test]
    fn ten_captures_win() {
        let b = Board::from_points([[None; BOARD_SIZE]; BOARD_SIZE], Stone::White, 4, 10);
        assert_eq!(b.winner(), Some(Stone::Black));
    }

    #[test]
    fn occupied_point_is_rejected() {
        let mut b = Board::new();
        b.make_move(CENTER).unwrap();
        assert!(matches!(b.make_move(CENTER), Err(PenteError::Occupied(_))));
    }

    #[test]
    fn display_matches_input_rows() {
        let mut b = Board::new();
        b.make_move(CENTER).unwrap();
        let text = b.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), BOARD_SIZE);
        assert_eq!(lines[9], ".........w.........");
        assert_eq!(parse_row(0, lines[9]).unwrap()[9], Some(Stone::White));
    }
}
