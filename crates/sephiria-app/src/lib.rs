//! Command-line front end of the Sephiria inventory arranger.
//!
//! - [`plan`]: TOML arrangement plans and their expansion into item pools.
//! - [`budget`]: the enchant budget check run before searching.
//! - [`runner`]: parallel multi-start searches.
//! - [`render`]: plain-text layouts and reports.

pub mod budget;
pub mod plan;
pub mod render;
pub mod runner;

pub use self::{
    budget::{BudgetReport, BudgetWarning},
    plan::{ArtifactEntry, DirectionEntry, Plan, PlanError, TabletEntry, ValueEntry},
    runner::{RunConfig, RunError, RunOutcome, run},
};
