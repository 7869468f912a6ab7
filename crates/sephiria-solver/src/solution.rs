//! A scored grid layout.

use sephiria_core::{GRID_WIDTH, Grid, Item, ItemId, Topology};

use crate::{Placer, classify, evaluate};

/// A grid together with its score.
///
/// The score always equals [`evaluate`] of the grid against the item pool it
/// was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    grid: Grid,
    score: i64,
}

impl Solution {
    /// Scores `grid` against `items`.
    #[must_use]
    pub fn new(grid: Grid, items: &[Item]) -> Self {
        let score = evaluate(&grid, items);
        Self { grid, score }
    }

    /// Builds the greedy initial layout of `items` on a grid of `capacity`
    /// cells.
    ///
    /// # Panics
    ///
    /// Panics if `topology` does not match the grid's dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use sephiria_core::{Artifact, Item, Topology};
    /// use sephiria_solver::Solution;
    ///
    /// let items: Vec<Item> = vec![Artifact::new("Ring", 3).into()];
    /// let solution = Solution::initial(36, &items, &Topology::new(6, 6));
    /// assert_eq!(solution.grid().occupied(), 1);
    /// assert_eq!(solution.score(), 0);
    /// ```
    #[must_use]
    pub fn initial(capacity: usize, items: &[Item], topology: &Topology) -> Self {
        let groups = classify(items);
        let mut placer = Placer::new(capacity, items, topology);
        placer.place_groups(&groups);
        if !placer.dropped().is_empty() {
            log::info!(
                "{} of {} item(s) did not fit the grid",
                placer.dropped().len(),
                items.len()
            );
        }
        Self::new(placer.into_grid(), items)
    }

    /// Returns the topology matching a grid of `capacity` cells.
    #[must_use]
    pub fn topology_for(capacity: usize) -> Topology {
        Topology::new(capacity.div_ceil(GRID_WIDTH), GRID_WIDTH)
    }

    pub(crate) fn from_parts(grid: Grid, score: i64) -> Self {
        Self { grid, score }
    }

    /// Returns the grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Returns the number of usable cells.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.grid.capacity()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Returns the ids of the first `item_count` pool items that are not on
    /// the grid, in pool order.
    #[must_use]
    pub fn missing_items(&self, item_count: usize) -> Vec<ItemId> {
        let mut placed = vec![false; item_count];
        for (_, placement) in self.grid.placements() {
            if let Some(slot) = placed.get_mut(placement.item.index()) {
                *slot = true;
            }
        }
        placed
            .iter()
            .enumerate()
            .filter(|(_, placed)| !**placed)
            .map(|(i, _)| ItemId::new(i))
            .collect()
    }

    /// Consumes the solution and returns the grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
