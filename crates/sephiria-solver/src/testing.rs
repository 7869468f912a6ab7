//! Test fixtures and a chaining harness for layout assertions.
//!
//! [`LayoutTester`] runs the initial greedy placement over an item list and
//! lets tests assert where each item ended up.
//!
//! ```ignore
//! LayoutTester::place(36, items)
//!     .assert_row_of(0, 2)
//!     .assert_adjacent(1, 2)
//!     .assert_score_consistent();
//! ```

use sephiria_core::{
    Artifact, DirectionKey, DirectionValue, GRID_WIDTH, Item, ItemId, Keyword, Offset, Position,
    Rotation, Tablet, Topology,
};

use crate::{Solution, evaluate};

/// Returns a level-5 artifact with no tags.
pub(crate) fn artifact(name: &str) -> Artifact {
    Artifact::new(name, 5)
}

/// Returns a tablet with a single offset direction.
pub(crate) fn offset_tablet(name: &str, dx: i32, dy: i32, amount: i32, turnable: bool) -> Item {
    Tablet::new(
        name,
        [(
            DirectionKey::Offset(Offset::new(dx, dy)),
            DirectionValue::Amount(amount),
        )],
        turnable,
    )
    .into()
}

/// Returns a tablet with a single keyword direction.
pub(crate) fn line_tablet(name: &str, keyword: Keyword, turnable: bool) -> Item {
    Tablet::new(
        name,
        [(DirectionKey::Keyword(keyword), DirectionValue::Amount(1))],
        turnable,
    )
    .into()
}

/// Chaining harness over the initial placement of an item list.
#[derive(Debug)]
pub(crate) struct LayoutTester {
    items: Vec<Item>,
    solution: Solution,
}

impl LayoutTester {
    /// Classifies and places `items` on a grid of `capacity` cells.
    pub(crate) fn place(capacity: usize, items: Vec<Item>) -> Self {
        let height = capacity.div_ceil(GRID_WIDTH);
        let topology = Topology::new(height, GRID_WIDTH);
        let solution = Solution::initial(capacity, &items, &topology);
        Self { items, solution }
    }

    pub(crate) fn solution(&self) -> &Solution {
        &self.solution
    }

    pub(crate) fn position_of(&self, item: usize) -> Option<Position> {
        self.solution
            .grid()
            .placements()
            .find(|(_, p)| p.item == ItemId::new(item))
            .map(|(pos, _)| pos)
    }

    #[track_caller]
    fn expect_position(&self, item: usize) -> Position {
        let Some(pos) = self.position_of(item) else {
            panic!(
                "item {item} ({}) was not placed",
                self.items[item].name()
            );
        };
        pos
    }

    #[track_caller]
    pub(crate) fn assert_at(self, item: usize, expected: Position) -> Self {
        let actual = self.expect_position(item);
        assert_eq!(actual, expected, "item {item} is at {actual}, expected {expected}");
        self
    }

    #[track_caller]
    pub(crate) fn assert_row_of(self, item: usize, row: usize) -> Self {
        let actual = self.expect_position(item);
        assert_eq!(actual.row, row, "item {item} is at {actual}, expected row {row}");
        self
    }

    #[track_caller]
    pub(crate) fn assert_rotation(self, item: usize, rotation: Rotation) -> Self {
        let pos = self.expect_position(item);
        let actual = self.solution.grid().get(pos).map(|p| p.rotation);
        assert_eq!(actual, Some(rotation), "item {item} at {pos} has rotation {actual:?}");
        self
    }

    #[track_caller]
    pub(crate) fn assert_adjacent(self, left: usize, right: usize) -> Self {
        let l = self.expect_position(left);
        let r = self.expect_position(right);
        assert!(
            l.row == r.row && l.col + 1 == r.col,
            "item {right} at {r} is not directly right of item {left} at {l}"
        );
        self
    }

    #[track_caller]
    pub(crate) fn assert_missing(self, item: usize) -> Self {
        if let Some(pos) = self.position_of(item) {
            panic!("item {item} was expected to be dropped but sits at {pos}");
        }
        self
    }

    #[track_caller]
    pub(crate) fn assert_placed_count(self, count: usize) -> Self {
        assert_eq!(self.solution.grid().occupied(), count);
        self
    }

    #[track_caller]
    pub(crate) fn assert_score(self, score: i64) -> Self {
        assert_eq!(self.solution.score(), score);
        self
    }

    #[track_caller]
    pub(crate) fn assert_score_consistent(self) -> Self {
        assert_eq!(
            self.solution.score(),
            evaluate(self.solution.grid(), &self.items)
        );
        self
    }

    #[track_caller]
    pub(crate) fn assert_no_locked_cells_used(self) -> Self {
        let grid = self.solution.grid();
        for (pos, _) in grid.placements() {
            assert!(!grid.is_locked(pos), "locked cell {pos} holds an item");
        }
        self
    }
}
