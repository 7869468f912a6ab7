//! Core data structures for the Sephiria inventory arranger.
//!
//! This crate provides the value types shared by the solver and its callers:
//!
//! - [`geometry`]: relative [`Offset`]s, direction [`Keyword`]s, [`Rotation`]s
//!   and the normalized [`Direction`] of a tablet effect.
//! - [`item`]: [`Tablet`]s, [`Artifact`]s and the [`Item`] union, addressed by
//!   [`ItemId`] inside a caller-owned pool.
//! - [`grid`]: the fixed-width [`Grid`] of [`Placement`]s, including locked
//!   cells beyond the inventory capacity.
//! - [`topology`]: read-only per-cell reach tables.
//!
//! # Examples
//!
//! ```
//! use sephiria_core::{
//!     Artifact, DirectionKey, DirectionValue, Grid, Item, ItemId, Placement, Position, Rotation,
//!     Tablet,
//! };
//!
//! let items: Vec<Item> = vec![
//!     Tablet::new("Arrow", [(DirectionKey::Linear(1), DirectionValue::Amount(2))], true).into(),
//!     Artifact::new("Ring", 5).into(),
//! ];
//!
//! let mut grid = Grid::new(12);
//! grid.place(Position::new(0, 0), Placement::new(ItemId::new(0), Rotation::R0));
//! grid.place(Position::new(0, 1), Placement::new(ItemId::new(1), Rotation::R0));
//! assert_eq!(grid.occupied(), 2);
//! ```

pub mod geometry;
pub mod grid;
pub mod item;
pub mod topology;

pub use self::{
    geometry::{
        Direction, DirectionKey, DirectionValue, GRID_WIDTH, Keyword, Offset, ParseKeywordError,
        Rotation, Target, rotated_directions,
    },
    grid::{Grid, Placement, Position},
    item::{
        Artifact, ArtifactFlags, CHALCEDONY_KEY, ComboCategory, DEVOTION_BADGE, HARMONY_TAG, Item,
        ItemId, ParseScaleSideError, SHINING_HOURGLASS, ScaleSide, Tablet,
    },
    topology::Topology,
};
