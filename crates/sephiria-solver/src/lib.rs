//! Layout engine for the Sephiria inventory arranger.
//!
//! Arranging an item pool happens in three stages:
//!
//! 1. [`classify`] partitions the pool into [`Group`]s that must be placed
//!    together, ordered by priority.
//! 2. A [`Placer`] greedily commits each group to the grid, dropping groups
//!    that do not fit.
//! 3. A [`LocalSearch`] turns tablets at random cells and keeps every change
//!    that does not lower the [`evaluate`] score, returning the best layout
//!    seen when its [`SearchLimits`] run out.
//!
//! [`run_solver`] and [`run_solver_with`] bundle the three stages.
//!
//! # Examples
//!
//! ```
//! use sephiria_core::{Artifact, DirectionKey, DirectionValue, Item, Offset, Tablet};
//! use sephiria_solver::{SearchLimits, SearchSeed, run_solver_with};
//!
//! let items: Vec<Item> = vec![
//!     Tablet::new(
//!         "Arrow",
//!         [(DirectionKey::Offset(Offset::new(0, 1)), DirectionValue::Amount(4))],
//!         true,
//!     )
//!     .into(),
//!     Artifact::new("Ring", 5).into(),
//! ];
//! let seed = SearchSeed::from_bytes([42; 32]);
//! let outcome = run_solver_with(6, &items, SearchLimits::default().max_iterations(1_000), &seed);
//! assert_eq!(outcome.best.score(), 4);
//! ```

mod group;
mod placement;
mod score;
mod search;
mod seed;
mod solution;
#[cfg(test)]
mod testing;

pub use self::{
    group::{
        Group, GroupKind, GroupMembers, PAIRED_EFFECT_PRIORITY, PRIORITY_TABLET_PRIORITY,
        ROW_CLUSTER_PRIORITY, SINGLE_PRIORITY, classify,
    },
    placement::{Placer, placement_score},
    score::{effect_on, evaluate},
    search::{
        DEFAULT_TIME_LIMIT, LocalSearch, SearchLimits, SearchOutcome, SearchState, SearchStats,
        run_solver, run_solver_with, turn,
    },
    seed::{ParseSeedError, SearchSeed},
    solution::Solution,
};
