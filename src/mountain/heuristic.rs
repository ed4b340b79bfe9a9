use super::grid::{Cell, DIAGONAL_COST, STRAIGHT_COST};

/// Octile distance scaled to the 10/14 move costs.
///
/// Equals the cheapest horizontal cost on open ground, so it never
/// overestimates once climbing costs are added on top.
#[inline]
pub(crate) fn octile_distance(a: Cell, b: Cell) -> u64 {
    let dr = a.row.abs_diff(b.row) as u64;
    let dc = a.col.abs_diff(b.col) as u64;
    let (long, short) = if dr > dc { (dr, dc) } else { (dc, dr) };
    STRAIGHT_COST * (long - short) + DIAGONAL_COST * short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_octile_distance() {
        assert_eq!(octile_distance(Cell::new(0, 0), Cell::new(0, 0)), 0);
        assert_eq!(octile_distance(Cell::new(0, 0), Cell::new(0, 3)), 30);
        assert_eq!(octile_distance(Cell::new(0, 0), Cell::new(3, 3)), 42);
        assert_eq!(octile_distance(Cell::new(4, 1), Cell::new(0, 0)), 44);
    }
}
