//! Layout scoring.
//!
//! The score of a grid is the sum of two parts:
//!
//! - every harmony artifact earns the enchant levels of the artifacts in its
//!   eight neighbouring cells;
//! - every tablet earns, for each offset direction at its current rotation
//!   that lands on an artifact, the weight of that direction adjusted by the
//!   artifact's traits (see [`effect_on`]).
//!
//! Keyword directions never contribute to the score.

use sephiria_core::{
    Artifact, ComboCategory, DirectionValue, GRID_WIDTH, Grid, Item, Position, Rotation, Tablet,
    Target,
};

/// Returns the score of `grid`, whose cells index into `items`.
///
/// Always recomputed from scratch.
///
/// # Examples
///
/// ```
/// use sephiria_core::{
///     Artifact, DirectionKey, DirectionValue, Grid, Item, ItemId, Placement, Position, Rotation,
///     Tablet,
/// };
/// use sephiria_solver::evaluate;
///
/// let items: Vec<Item> = vec![
///     Tablet::new("Arrow", [(DirectionKey::Linear(1), DirectionValue::Amount(3))], true).into(),
///     Artifact::new("Ring", 5).into(),
/// ];
/// let mut grid = Grid::new(6);
/// grid.place(Position::new(0, 0), Placement::new(ItemId::new(0), Rotation::R0));
/// grid.place(Position::new(0, 1), Placement::new(ItemId::new(1), Rotation::R0));
/// assert_eq!(evaluate(&grid, &items), 3);
/// ```
#[must_use]
pub fn evaluate(grid: &Grid, items: &[Item]) -> i64 {
    grid.placements()
        .map(|(pos, placement)| match &items[placement.item.index()] {
            Item::Artifact(artifact) if artifact.has_harmony() => harmony_score(grid, items, pos),
            Item::Artifact(_) => 0,
            Item::Tablet(tablet) => tablet_score(grid, items, pos, tablet, placement.rotation),
        })
        .sum()
}

fn artifact_at<'a>(grid: &Grid, items: &'a [Item], pos: Position) -> Option<&'a Artifact> {
    grid.get(pos)
        .and_then(|placement| items[placement.item.index()].as_artifact())
}

fn harmony_score(grid: &Grid, items: &[Item], pos: Position) -> i64 {
    grid.neighbors(pos)
        .filter_map(|neighbor| artifact_at(grid, items, neighbor))
        .map(|artifact| i64::from(artifact.current_enchant))
        .sum()
}

fn tablet_score(
    grid: &Grid,
    items: &[Item],
    pos: Position,
    tablet: &Tablet,
    rotation: Rotation,
) -> i64 {
    tablet
        .directions
        .iter()
        .map(|direction| direction.rotated(rotation))
        .filter_map(|direction| {
            let Target::Offset(offset) = direction.target else {
                return None;
            };
            let target = grid.offset(pos, offset)?;
            let artifact = artifact_at(grid, items, target)?;
            Some(effect_on(artifact, target, direction.value))
        })
        .sum()
}

/// Returns the contribution of a tablet effect with `value` landing on
/// `artifact` at `target`.
///
/// The base weight is the amount, or 1 for UNLOCK. It drops to 0 for a key
/// whose combos miss the category of `target`'s row, and for a scaled
/// artifact sitting in the wrong half. Priority artifacts double it.
#[must_use]
pub fn effect_on(artifact: &Artifact, target: Position, value: DirectionValue) -> i64 {
    let mut weight = i64::from(value.weight());
    if artifact.is_chalcedony_key()
        && !artifact.combo.is_empty()
        && !artifact.has_combo(ComboCategory::of_row(target.row))
    {
        weight = 0;
    }
    if let Some(side) = artifact.scale_position {
        let in_left_half = target.col < GRID_WIDTH / 2;
        if side.is_left() != in_left_half {
            weight = 0;
        }
    }
    if artifact.priority {
        weight *= 2;
    }
    weight
}
