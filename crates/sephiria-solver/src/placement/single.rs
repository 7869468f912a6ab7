//! Placement of lone items: keys, scaled artifacts and everything else.

use sephiria_core::{Artifact, GRID_WIDTH, Grid, ItemId, Position, ScaleSide};

use super::{columns_by_center_distance, place_upright};

/// Places `id` at the first vacant cell of `center_order`.
pub(super) fn place_near_center(grid: &mut Grid, center_order: &[Position], id: ItemId) -> bool {
    center_order
        .iter()
        .copied()
        .find(|pos| grid.is_vacant(*pos))
        .is_some_and(|pos| place_upright(grid, pos, id))
}

/// Places a key in a row matching its primary combo category, falling back
/// to the center.
///
/// Rows `r` with `r % 4` equal to the category's class are scanned top to
/// bottom, columns from the middle outwards.
pub(super) fn place_key(
    grid: &mut Grid,
    center_order: &[Position],
    id: ItemId,
    key: &Artifact,
) -> bool {
    if let Some(category) = key.primary_combo() {
        let cols = columns_by_center_distance(0..GRID_WIDTH);
        let target = (category.parity()..grid.height())
            .step_by(4)
            .flat_map(|row| cols.iter().map(move |&col| Position::new(row, col)))
            .find(|pos| grid.is_vacant(*pos));
        if let Some(pos) = target {
            return place_upright(grid, pos, id);
        }
    }
    place_near_center(grid, center_order, id)
}

/// Places an artifact in its requested half of the grid, falling back to the
/// center.
///
/// Columns are scanned from the middle outwards and each column top to
/// bottom before moving on.
pub(super) fn place_scaled(
    grid: &mut Grid,
    center_order: &[Position],
    id: ItemId,
    side: ScaleSide,
) -> bool {
    let half = GRID_WIDTH / 2;
    let cols = match side {
        ScaleSide::Left => columns_by_center_distance(0..half),
        ScaleSide::Right => columns_by_center_distance(half..GRID_WIDTH),
    };
    let target = cols
        .iter()
        .flat_map(|&col| (0..grid.height()).map(move |row| Position::new(row, col)))
        .find(|pos| grid.is_vacant(*pos));
    match target {
        Some(pos) => place_upright(grid, pos, id),
        None => place_near_center(grid, center_order, id),
    }
}

#[cfg(test)]
mod tests {
    use sephiria_core::{Placement, Rotation};

    use super::*;

    fn fill_cols(grid: &mut Grid, cols: std::ops::Range<usize>) {
        for row in 0..grid.height() {
            for col in cols.clone() {
                grid.place(Position::new(row, col), Placement::new(ItemId::new(9), Rotation::R0));
            }
        }
    }

    #[test]
    fn test_center_order_skips_occupied_cells() {
        let mut grid = Grid::new(36);
        let order = grid.positions_by_center_distance();
        assert!(place_near_center(&mut grid, &order, ItemId::new(0)));
        assert!(place_near_center(&mut grid, &order, ItemId::new(1)));
        assert_eq!(grid.get(Position::new(2, 3)).map(|p| p.item), Some(ItemId::new(1)));
    }

    #[test]
    fn test_key_without_combo_goes_to_center() {
        let mut grid = Grid::new(36);
        let order = grid.positions_by_center_distance();
        let key = Artifact::new(sephiria_core::CHALCEDONY_KEY, 3);
        assert!(place_key(&mut grid, &order, ItemId::new(0), &key));
        assert!(grid.get(Position::new(2, 2)).is_some());
    }

    #[test]
    fn test_key_uses_every_fourth_row() {
        let mut grid = Grid::new(48);
        let order = grid.positions_by_center_distance();
        let free = [Position::new(1, 0), Position::new(5, 4)];
        for pos in grid.positions().filter(|pos| !free.contains(pos)) {
            grid.place(pos, Placement::new(ItemId::new(9), Rotation::R0));
        }
        let key = Artifact::new(sephiria_core::CHALCEDONY_KEY, 3).with_combo(["ember"]);
        assert!(place_key(&mut grid, &order, ItemId::new(0), &key));
        assert_eq!(grid.get(free[0]).map(|p| p.item), Some(ItemId::new(0)));
        assert!(place_key(&mut grid, &order, ItemId::new(1), &key));
        assert_eq!(grid.get(free[1]).map(|p| p.item), Some(ItemId::new(1)));
    }

    #[test]
    fn test_scaled_falls_back_to_center_when_half_full() {
        let mut grid = Grid::new(12);
        let order = grid.positions_by_center_distance();
        fill_cols(&mut grid, 3..GRID_WIDTH);
        assert!(place_scaled(&mut grid, &order, ItemId::new(0), ScaleSide::Right));
        // center order for two rows starts at (0, 2)
        assert_eq!(grid.get(Position::new(0, 2)).map(|p| p.item), Some(ItemId::new(0)));
    }

    #[test]
    fn test_full_grid_drops_single() {
        let mut grid = Grid::new(6);
        let order = grid.positions_by_center_distance();
        fill_cols(&mut grid, 0..GRID_WIDTH);
        assert!(!place_near_center(&mut grid, &order, ItemId::new(0)));
        assert!(!place_scaled(&mut grid, &order, ItemId::new(0), ScaleSide::Left));
    }
}
