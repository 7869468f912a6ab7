//! Per-cell reach tables used to rank placements of line tablets.

use crate::Position;

/// Read-only per-cell scores for a `rows × cols` grid.
///
/// Distances are Manhattan distances from the continuous center
/// `((rows - 1) / 2, (cols - 1) / 2)`. The tables never change during a
/// run and can be shared between independent searches.
///
/// # Examples
///
/// ```
/// use sephiria_core::{Position, Topology};
///
/// let topo = Topology::new(6, 6);
/// assert_eq!(topo.row_len(Position::new(0, 0)), 6);
/// assert_eq!(topo.center_score(Position::new(0, 0)), 10);
/// assert_eq!(topo.center_score(Position::new(2, 2)), 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    rows: usize,
    cols: usize,
    slash_reach: Vec<i32>,
    center_score: Vec<i32>,
}

impl Topology {
    /// Precomputes the tables for a `rows × cols` grid.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss
    )]
    pub fn new(rows: usize, cols: usize) -> Self {
        let center_row = (rows as f64 - 1.0) / 2.0;
        let center_col = (cols as f64 - 1.0) / 2.0;
        let shortest = rows.min(cols) as i32;

        let mut slash_reach = Vec::with_capacity(rows * cols);
        let mut center_score = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let distance = (row as f64 - center_row).abs() + (col as f64 - center_col).abs();
                slash_reach.push((shortest - (distance * 0.5).floor() as i32).max(1));
                center_score.push(20 - (distance * 2.0).floor() as i32);
            }
        }

        Self {
            rows,
            cols,
            slash_reach,
            center_score,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the length of the row through `pos`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn row_len(&self, _pos: Position) -> i32 {
        self.cols as i32
    }

    /// Returns the length of the column through `pos`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn col_len(&self, _pos: Position) -> i32 {
        self.rows as i32
    }

    /// Returns the diagonal reach at `pos`, at least 1 and longer near the center.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    pub fn slash_reach(&self, pos: Position) -> i32 {
        self.slash_reach[self.index(pos)]
    }

    /// Returns the center proximity score at `pos`: 20 minus twice the distance.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    pub fn center_score(&self, pos: Position) -> i32 {
        self.center_score[self.index(pos)]
    }

    fn index(&self, pos: Position) -> usize {
        assert!(pos.row < self.rows && pos.col < self.cols, "{pos} is outside the grid");
        pos.row * self.cols + pos.col
    }
}
