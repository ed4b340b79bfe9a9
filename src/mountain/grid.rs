use std::fmt;
use std::str::FromStr;

use super::{Algorithm, MountainError};

/// Straight and diagonal horizontal move costs.
pub const STRAIGHT_COST: u64 = 10;
pub const DIAGONAL_COST: u64 = 14;

/// Neighbour offsets `(d_row, d_col)` in expansion order: N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(isize, isize, u64); 8] = [
    (-1, 0, STRAIGHT_COST),
    (-1, 1, DIAGONAL_COST),
    (0, 1, STRAIGHT_COST),
    (1, 1, DIAGONAL_COST),
    (1, 0, STRAIGHT_COST),
    (1, -1, DIAGONAL_COST),
    (0, -1, STRAIGHT_COST),
    (-1, -1, DIAGONAL_COST),
];

/// A grid coordinate. `row` is the y axis, `col` the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self { Cell { row, col } }

    /// Build a cell from file-order `x y` coordinates.
    #[inline]
    pub fn from_xy(x: usize, y: usize) -> Self { Cell { row: y, col: x } }
}

impl fmt::Display for Cell {
    /// Output notation is `x,y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Elevation grid with a start cell, stamina budget and goal lodges.
///
/// Negative values are trees of height `|v|`; every cell's effective height
/// is the absolute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mountain {
    width: usize,
    height: usize,
    start: Cell,
    stamina: u64,
    lodges: Vec<Cell>,
    elevation: Vec<i64>,
}

impl Mountain {
    /// Build a mountain from a row-major elevation grid.
    pub fn new(
        start: Cell,
        stamina: u64,
        lodges: Vec<Cell>,
        rows: Vec<Vec<i64>>,
    ) -> Result<Self, MountainError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(MountainError::EmptyGrid);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(MountainError::RowWidth { row, expected: width, found: values.len() });
            }
        }
        let mountain = Mountain {
            width,
            height,
            start,
            stamina,
            lodges,
            elevation: rows.into_iter().flatten().collect(),
        };
        mountain.check_in_bounds(start)?;
        for &lodge in &mountain.lodges {
            mountain.check_in_bounds(lodge)?;
        }
        Ok(mountain)
    }

    #[inline]
    pub fn width(&self) -> usize { self.width }

    #[inline]
    pub fn height(&self) -> usize { self.height }

    #[inline]
    pub fn start(&self) -> Cell { self.start }

    #[inline]
    pub fn stamina(&self) -> u64 { self.stamina }

    /// Goal lodges in file order.
    #[inline]
    pub fn lodges(&self) -> &[Cell] { &self.lodges }

    /// Raw signed elevation of a cell.
    #[inline]
    pub fn raw(&self, cell: Cell) -> i64 { self.elevation[cell.row * self.width + cell.col] }

    /// Effective height of a cell (tree height or ground elevation).
    #[inline]
    pub fn height_at(&self, cell: Cell) -> u64 { self.raw(cell).unsigned_abs() }

    /// Reachable neighbours of `cell` with their horizontal move cost.
    ///
    /// A tree taller than the current cell blocks the move regardless of stamina.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = (Cell, u64)> + '_ {
        let here = self.height_at(cell);
        DIRECTIONS.iter().filter_map(move |&(dr, dc, cost)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            if row >= self.height || col >= self.width {
                return None;
            }
            let next = Cell::new(row, col);
            let raw = self.raw(next);
            if raw < 0 && raw.unsigned_abs() > here {
                return None;
            }
            Some((next, cost))
        })
    }

    fn check_in_bounds(&self, cell: Cell) -> Result<(), MountainError> {
        if cell.row < self.height && cell.col < self.width {
            Ok(())
        } else {
            Err(MountainError::OutOfBounds { x: cell.col, y: cell.row })
        }
    }
}

/// A parsed `input.txt`: the requested algorithm plus the mountain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountainInput {
    pub algorithm: Algorithm,
    pub mountain: Mountain,
}

impl FromStr for MountainInput {
    type Err = MountainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).enumerate().filter(|(_, l)| !l.is_empty());
        let mut next_line = |what: &'static str| lines.next().ok_or(MountainError::MissingLine(what));

        let (_, algo) = next_line("algorithm")?;
        let algorithm: Algorithm = algo.parse()?;
        let (n, dims) = next_line("dimensions")?;
        let [width, height] = parse_pair(n, dims)?;
        let (n, start) = next_line("start")?;
        let [sx, sy] = parse_pair(n, start)?;
        let (n, stamina) = next_line("stamina")?;
        let stamina = parse_num::<u64>(n, stamina)?;
        let (n, count) = next_line("lodge count")?;
        let count = parse_num::<usize>(n, count)?;

        let mut lodges = Vec::with_capacity(count);
        for _ in 0..count {
            let (n, line) = next_line("lodge")?;
            let [x, y] = parse_pair(n, line)?;
            lodges.push(Cell::from_xy(x, y));
        }

        let mut rows = Vec::with_capacity(height);
        for _ in 0..height {
            let (n, line) = next_line("elevation row")?;
            let row = line
                .split_whitespace()
                .map(|tok| parse_num::<i64>(n, tok))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        if rows.first().map(Vec::len) != Some(width) {
            return Err(MountainError::RowWidth {
                row: 0,
                expected: width,
                found: rows.first().map(Vec::len).unwrap_or(0),
            });
        }

        let mountain = Mountain::new(Cell::from_xy(sx, sy), stamina, lodges, rows)?;
        Ok(MountainInput { algorithm, mountain })
    }
}

fn parse_num<T: FromStr>(line: usize, tok: &str) -> Result<T, MountainError> {
    tok.trim()
        .parse()
        .map_err(|_| MountainError::BadNumber { line: line + 1, token: tok.to_string() })
}

fn parse_pair(line: usize, text: &str) -> Result<[usize; 2], MountainError> {
    let toks: Vec<&str> = text.split_whitespace().collect();
    match toks.as_slice() {
        [a, b] => Ok([parse_num(line, a)?, parse_num(line, b)?]),
        _ => Err(MountainError::BadNumber { line: line + 1, token: text.to_string() }),
    }
}
