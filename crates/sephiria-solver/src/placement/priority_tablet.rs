//! Best-cell placement for tablets whose effects span whole lines.

use sephiria_core::{
    Direction, Grid, ItemId, Keyword, Placement, Position, Rotation, Tablet, Target, Topology,
    rotated_directions,
};

/// Places `tablet` at the vacant cell and rotation with the highest
/// [`placement_score`].
///
/// Cells are tried in row-major order and rotations in ascending order; the
/// first strictly best candidate wins. Non-turnable tablets only try
/// [`Rotation::R0`].
pub(super) fn place(grid: &mut Grid, topology: &Topology, id: ItemId, tablet: &Tablet) -> bool {
    let rotations: &[Rotation] = if tablet.turnable {
        &Rotation::ALL
    } else {
        &[Rotation::R0]
    };
    let oriented: Vec<(Rotation, Vec<Direction>)> = rotations
        .iter()
        .map(|&rotation| (rotation, rotated_directions(&tablet.directions, rotation)))
        .collect();

    let mut best: Option<(i32, Position, Rotation)> = None;
    for pos in grid.positions().filter(|pos| grid.is_vacant(*pos)) {
        for (rotation, directions) in &oriented {
            let score = placement_score(grid, topology, pos, directions);
            if best.is_none_or(|(best_score, ..)| score > best_score) {
                best = Some((score, pos, *rotation));
            }
        }
    }

    best.is_some_and(|(score, pos, rotation)| {
        log::trace!("{} placed at {pos} turned {rotation:?} (score {score})", tablet.name);
        grid.place(pos, Placement::new(id, rotation))
    })
}

/// Scores a tablet with `directions` sitting at `pos`.
///
/// Row and column keywords earn ten points per cell of the line, the slash
/// diagonal fifteen per cell of reach, and each offset the center score of
/// the cell it points at. Other keywords and offsets leaving the grid earn
/// nothing.
///
/// # Examples
///
/// ```
/// use sephiria_core::{Direction, DirectionKey, DirectionValue, Grid, Keyword, Position, Topology};
/// use sephiria_solver::placement_score;
///
/// let grid = Grid::new(36);
/// let topology = Topology::new(6, 6);
/// let row = [Direction::new(DirectionKey::Keyword(Keyword::Row), DirectionValue::Amount(1))];
/// assert_eq!(placement_score(&grid, &topology, Position::new(0, 0), &row), 60);
/// ```
#[must_use]
pub fn placement_score(
    grid: &Grid,
    topology: &Topology,
    pos: Position,
    directions: &[Direction],
) -> i32 {
    directions
        .iter()
        .map(|direction| match direction.target {
            Target::Keyword(Keyword::Row) => 10 * topology.row_len(pos),
            Target::Keyword(Keyword::Col) => 10 * topology.col_len(pos),
            Target::Keyword(Keyword::Slash) => 15 * topology.slash_reach(pos),
            Target::Keyword(_) => 0,
            Target::Offset(offset) => grid
                .offset(pos, offset)
                .map_or(0, |target| topology.center_score(target)),
        })
        .sum()
}
