//! Greedy initial placement of classified groups.
//!
//! Each [`GroupKind`] has its own strategy module. A strategy either commits
//! the whole group or leaves the grid untouched and reports failure; a group
//! that fails is dropped from the layout.

use sephiria_core::{
    Artifact, GRID_WIDTH, Grid, Item, ItemId, Placement, Position, Rotation, Topology,
};

use crate::{Group, GroupKind};

mod pair;
mod priority_tablet;
mod row_cluster;
mod single;

pub use self::priority_tablet::placement_score;

/// Places groups onto a grid one after another.
///
/// # Examples
///
/// ```
/// use sephiria_core::{Artifact, Item, Topology};
/// use sephiria_solver::{Placer, classify};
///
/// let items: Vec<Item> = vec![Artifact::new("Ring", 3).into()];
/// let topology = Topology::new(2, 6);
/// let mut placer = Placer::new(12, &items, &topology);
/// placer.place_groups(&classify(&items));
/// let grid = placer.into_grid();
/// assert_eq!(grid.occupied(), 1);
/// ```
#[derive(Debug)]
pub struct Placer<'a> {
    items: &'a [Item],
    topology: &'a Topology,
    grid: Grid,
    center_order: Vec<Position>,
    dropped: Vec<ItemId>,
}

impl<'a> Placer<'a> {
    /// Creates a placer over an empty grid of `capacity` cells.
    ///
    /// # Panics
    ///
    /// Panics if `topology` does not match the grid's dimensions.
    #[must_use]
    pub fn new(capacity: usize, items: &'a [Item], topology: &'a Topology) -> Self {
        let grid = Grid::new(capacity);
        assert_eq!(
            (topology.rows(), topology.cols()),
            (grid.height(), GRID_WIDTH),
            "topology does not match a grid of capacity {capacity}"
        );
        let center_order = grid.positions_by_center_distance();
        Self {
            items,
            topology,
            grid,
            center_order,
            dropped: Vec::new(),
        }
    }

    /// Places `groups` in order.
    pub fn place_groups(&mut self, groups: &[Group]) {
        for group in groups {
            self.place_group(group);
        }
    }

    /// Places a single group, returning `false` if it was dropped.
    pub fn place_group(&mut self, group: &Group) -> bool {
        let members = group.members();
        let placed = match group.kind() {
            GroupKind::PairedEffect => pair::place(&mut self.grid, &self.center_order, members),
            GroupKind::RowCluster => row_cluster::place(&mut self.grid, members),
            GroupKind::PriorityTablet => self.place_priority_tablet(members[0]),
            GroupKind::Single => self.place_single(members[0]),
        };
        if !placed {
            log::debug!(
                "dropped {} group of {} item(s) led by {:?}: no room",
                group.kind(),
                members.len(),
                self.items[members[0].index()].name()
            );
            self.dropped.extend_from_slice(members);
        }
        placed
    }

    fn place_priority_tablet(&mut self, id: ItemId) -> bool {
        match self.items[id.index()].as_tablet() {
            Some(tablet) => priority_tablet::place(&mut self.grid, self.topology, id, tablet),
            None => single::place_near_center(&mut self.grid, &self.center_order, id),
        }
    }

    fn place_single(&mut self, id: ItemId) -> bool {
        match self.items[id.index()].as_artifact() {
            Some(artifact) if artifact.is_chalcedony_key() => {
                single::place_key(&mut self.grid, &self.center_order, id, artifact)
            }
            Some(Artifact {
                scale_position: Some(side),
                ..
            }) => single::place_scaled(&mut self.grid, &self.center_order, id, *side),
            _ => single::place_near_center(&mut self.grid, &self.center_order, id),
        }
    }

    /// Returns the grid built so far.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the members of every dropped group, in drop order.
    #[must_use]
    pub fn dropped(&self) -> &[ItemId] {
        &self.dropped
    }

    /// Consumes the placer and returns the grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

fn place_upright(grid: &mut Grid, pos: Position, id: ItemId) -> bool {
    grid.place(pos, Placement::new(id, Rotation::R0))
}

/// Returns `cols` ordered by distance from the middle of the grid, stable.
fn columns_by_center_distance(cols: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut cols: Vec<usize> = cols.into_iter().collect();
    cols.sort_by_key(|&col| (2 * col).abs_diff(GRID_WIDTH - 1));
    cols
}
