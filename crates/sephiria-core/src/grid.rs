//! The inventory grid: a flat arena of plain cell records.
//!
//! The grid is always [`GRID_WIDTH`] columns wide and `ceil(capacity / 6)`
//! rows high. Cells whose linear index is `capacity` or more exist in the
//! rectangle but are locked and never hold an item.
//!
//! Cells store an [`ItemId`] into the caller's item pool rather than the
//! item itself, so cloning a grid is a plain copy of a small vector.
//!
//! # Examples
//!
//! ```
//! use sephiria_core::{Grid, ItemId, Placement, Position, Rotation};
//!
//! let mut grid = Grid::new(8);
//! assert_eq!(grid.height(), 2);
//! assert!(grid.is_locked(Position::new(1, 2)));
//!
//! let pos = Position::new(0, 3);
//! assert!(grid.place(pos, Placement::new(ItemId::new(0), Rotation::R0)));
//! assert!(!grid.is_vacant(pos));
//! ```

use std::fmt;

use crate::{GRID_WIDTH, ItemId, Offset, Rotation};

/// A cell position, row-major with row 0 at the top.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index (0-5), counted from the left.
    pub col: usize,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row-major linear index of this position.
    #[must_use]
    pub const fn linear(self) -> usize {
        self.row * GRID_WIDTH + self.col
    }

    /// Returns the position at linear index `index`.
    #[must_use]
    pub const fn from_linear(index: usize) -> Self {
        Self {
            row: index / GRID_WIDTH,
            col: index % GRID_WIDTH,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An item committed to a cell together with its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// The occupying item.
    pub item: ItemId,
    /// The item's orientation; always [`Rotation::R0`] for non-turnable items.
    pub rotation: Rotation,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(item: ItemId, rotation: Rotation) -> Self {
        Self { item, rotation }
    }
}

/// A fixed-width inventory grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    capacity: usize,
    height: usize,
    cells: Vec<Option<Placement>>,
}

impl Grid {
    /// Creates an empty grid with `capacity` usable cells.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let height = capacity.div_ceil(GRID_WIDTH);
        Self {
            capacity,
            height,
            cells: vec![None; height * GRID_WIDTH],
        }
    }

    /// Returns the number of usable cells.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of columns, always [`GRID_WIDTH`].
    #[must_use]
    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    /// Returns `true` if `pos` lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < GRID_WIDTH
    }

    /// Returns `true` if `pos` is inside the rectangle but beyond the capacity.
    #[must_use]
    pub fn is_locked(&self, pos: Position) -> bool {
        self.contains(pos) && pos.linear() >= self.capacity
    }

    /// Returns `true` if `pos` is usable and empty.
    #[must_use]
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.contains(pos) && pos.linear() < self.capacity && self.cells[pos.linear()].is_none()
    }

    /// Returns the placement at `pos`, or `None` if the cell is empty or
    /// outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Placement> {
        if !self.contains(pos) {
            return None;
        }
        self.cells[pos.linear()].as_ref()
    }

    /// Commits `placement` to `pos`.
    ///
    /// Returns `false` and leaves the grid untouched if the cell is locked,
    /// occupied or outside the grid.
    pub fn place(&mut self, pos: Position, placement: Placement) -> bool {
        if !self.is_vacant(pos) {
            return false;
        }
        self.cells[pos.linear()] = Some(placement);
        true
    }

    /// Advances the rotation of the placement at `pos` by one quarter turn.
    ///
    /// Returns `false` if the cell is empty. Turnability is the caller's
    /// concern.
    pub fn rotate(&mut self, pos: Position) -> bool {
        if !self.contains(pos) {
            return false;
        }
        match &mut self.cells[pos.linear()] {
            Some(placement) => {
                placement.rotation = placement.rotation.next();
                true
            }
            None => false,
        }
    }

    /// Returns the position `offset` away from `pos`, if it lies in the rectangle.
    #[must_use]
    pub fn offset(&self, pos: Position, offset: Offset) -> Option<Position> {
        let row = pos.row.checked_add_signed(isize::try_from(offset.dy).ok()?)?;
        let col = pos.col.checked_add_signed(isize::try_from(offset.dx).ok()?)?;
        let target = Position::new(row, col);
        self.contains(target).then_some(target)
    }

    /// Returns the up to eight in-bounds neighbours of `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| Offset::new(dx, dy)))
            .filter(|offset| *offset != Offset::new(0, 0))
            .filter_map(move |offset| self.offset(pos, offset))
    }

    /// Returns every position of the rectangle in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        (0..self.height * GRID_WIDTH).map(Position::from_linear)
    }

    /// Returns every occupied cell in row-major order.
    pub fn placements(&self) -> impl Iterator<Item = (Position, &Placement)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_ref().map(|p| (Position::from_linear(i), p)))
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns the positions of the rectangle ordered by squared Euclidean
    /// distance from the grid center, ties in row-major order.
    #[must_use]
    pub fn positions_by_center_distance(&self) -> Vec<Position> {
        let mut positions: Vec<_> = self.positions().collect();
        // Distances doubled to stay in integers.
        let center_row = self.height.cast_signed() - 1;
        let center_col = GRID_WIDTH.cast_signed() - 1;
        positions.sort_by_key(|pos| {
            let dr = 2 * pos.row.cast_signed() - center_row;
            let dc = 2 * pos.col.cast_signed() - center_col;
            dr * dr + dc * dc
        });
        positions
    }
}
