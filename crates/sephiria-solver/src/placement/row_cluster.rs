//! Contiguous single-row placement for a badge and its units.

use sephiria_core::{GRID_WIDTH, Grid, ItemId, Position};

use super::place_upright;

/// Places `members` left to right in one row.
///
/// Rows are tried from the middle outwards. Within a row, the vacant window
/// whose center is closest to the middle column wins, leftmost on ties.
pub(super) fn place(grid: &mut Grid, members: &[ItemId]) -> bool {
    let len = members.len();
    if len == 0 || len > GRID_WIDTH {
        return false;
    }

    let mut rows: Vec<usize> = (0..grid.height()).collect();
    rows.sort_by_key(|&row| (2 * row + 1).abs_diff(grid.height()));

    for row in rows {
        let start = (0..=GRID_WIDTH - len)
            .filter(|&start| {
                (start..start + len).all(|col| grid.is_vacant(Position::new(row, col)))
            })
            .min_by_key(|&start| (2 * start + len).abs_diff(GRID_WIDTH));
        if let Some(start) = start {
            for (col, &id) in (start..).zip(members) {
                place_upright(grid, Position::new(row, col), id);
            }
            return true;
        }
    }
    false
}
