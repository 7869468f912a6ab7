//! Side-by-side placement of an effect source and its target.

use sephiria_core::{GRID_WIDTH, Grid, ItemId, Position};

use super::place_upright;

/// Places `members[0]` at the first center-ordered cell whose right
/// neighbour is also vacant, and `members[1]` on that neighbour.
pub(super) fn place(grid: &mut Grid, center_order: &[Position], members: &[ItemId]) -> bool {
    let &[left, right] = members else {
        return false;
    };
    let Some(pos) = center_order.iter().copied().find(|pos| {
        pos.col + 1 < GRID_WIDTH
            && grid.is_vacant(*pos)
            && grid.is_vacant(Position::new(pos.row, pos.col + 1))
    }) else {
        return false;
    };
    place_upright(grid, pos, left)
        && place_upright(grid, Position::new(pos.row, pos.col + 1), right)
}

#[cfg(test)]
mod tests {
    use sephiria_core::{Placement, Rotation};

    use super::*;

    #[test]
    fn test_skips_cells_without_a_free_neighbour() {
        let mut grid = Grid::new(36);
        let order = grid.positions_by_center_distance();
        grid.place(Position::new(2, 3), Placement::new(ItemId::new(9), Rotation::R0));

        // (2, 2) has its neighbour taken, (2, 3) is taken, (3, 2) is next.
        assert!(place(&mut grid, &order, &[ItemId::new(0), ItemId::new(1)]));
        assert_eq!(grid.get(Position::new(3, 2)).map(|p| p.item), Some(ItemId::new(0)));
        assert_eq!(grid.get(Position::new(3, 3)).map(|p| p.item), Some(ItemId::new(1)));
    }

    #[test]
    fn test_last_column_never_starts_a_pair() {
        let mut grid = Grid::new(6);
        let order = grid.positions_by_center_distance();
        for col in 0..5 {
            grid.place(Position::new(0, col), Placement::new(ItemId::new(9), Rotation::R0));
        }
        assert!(!place(&mut grid, &order, &[ItemId::new(0), ItemId::new(1)]));
        assert_eq!(grid.occupied(), 5);
    }
}
