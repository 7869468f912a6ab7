//! Multi-start arrangement runs.

use std::cmp::Reverse;

use rayon::prelude::*;
use sephiria_core::Item;
use sephiria_solver::{LocalSearch, SearchLimits, SearchSeed, SearchStats, Solution};

use crate::{BudgetReport, BudgetWarning, Plan, PlanError, plan::seconds_to_duration};

/// Errors that can stop a run before the search starts.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RunError {
    /// The plan has more items than usable cells.
    #[display("{items} item(s) do not fit in {capacity} cell(s)")]
    #[from(skip)]
    CapacityOverflow {
        /// Expanded item count.
        items: usize,
        /// Usable cells.
        capacity: usize,
    },
    /// The budget check produced warnings and the run was not forced.
    #[display("{} budget warning(s) not confirmed", warnings.len())]
    #[from(skip)]
    UnconfirmedWarnings {
        /// The unconfirmed warnings.
        warnings: Vec<BudgetWarning>,
    },
    /// At least one restart is needed.
    #[display("the number of restarts must be at least 1")]
    #[from(skip)]
    ZeroRestarts,
    /// The plan could not be expanded.
    #[display("{_0}")]
    Plan(PlanError),
}

/// Settings of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Limits of each restart.
    pub limits: SearchLimits,
    /// Seed every restart generator is derived from.
    pub seed: SearchSeed,
    /// Number of independent searches.
    pub restarts: u64,
    /// Search even if the budget check warns.
    pub force: bool,
}

impl RunConfig {
    /// Returns the settings a plan asks for: its time limit and seed, or the
    /// default limit and a fresh random seed. Runs a single restart and is
    /// not forced.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan's time limit or seed is invalid.
    pub fn from_plan(plan: &Plan) -> Result<Self, PlanError> {
        let limits = plan
            .time_limit()?
            .map_or_else(SearchLimits::default, SearchLimits::with_time);
        let seed = plan.search_seed()?.unwrap_or_else(SearchSeed::random);
        Ok(Self {
            limits,
            seed,
            restarts: 1,
            force: false,
        })
    }

    /// Replaces the time limit with `seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidTime`] for negative or non-finite values.
    pub fn with_seconds(self, seconds: f64) -> Result<Self, PlanError> {
        let time = seconds_to_duration(seconds)?;
        Ok(Self {
            limits: SearchLimits { time, ..self.limits },
            ..self
        })
    }
}

/// The result of a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The expanded item pool the layout indexes into.
    pub items: Vec<Item>,
    /// The best layout over all restarts.
    pub best: Solution,
    /// Counters of the winning restart.
    pub stats: SearchStats,
    /// Index of the winning restart.
    pub restart: u64,
    /// Number of restarts run.
    pub restarts: u64,
    /// The seed the run used.
    pub seed: SearchSeed,
    /// Budget tally of the plan.
    pub budget: BudgetReport,
    /// Warnings the run was forced through.
    pub warnings: Vec<BudgetWarning>,
}

/// Expands `plan`, checks its budget and searches for the best layout.
///
/// Every restart starts from the same greedy layout and draws its moves from
/// `config.seed.rng_for(restart)`. The highest score wins; ties go to the
/// lowest restart index.
///
/// # Errors
///
/// Returns an error if the plan cannot be expanded, its items overflow the
/// grid, no restart is requested, or the budget check warns and
/// `config.force` is not set.
pub fn run(plan: &Plan, config: &RunConfig) -> Result<RunOutcome, RunError> {
    if config.restarts == 0 {
        return Err(RunError::ZeroRestarts);
    }

    let items = plan.items()?;
    if items.len() > plan.capacity {
        return Err(RunError::CapacityOverflow {
            items: items.len(),
            capacity: plan.capacity,
        });
    }

    let budget = BudgetReport::from_plan(plan)?;
    let warnings = budget.warnings();
    for warning in &warnings {
        log::warn!("{warning}");
    }
    if !warnings.is_empty() && !config.force {
        return Err(RunError::UnconfirmedWarnings { warnings });
    }

    let topology = Solution::topology_for(plan.capacity);
    let initial = Solution::initial(plan.capacity, &items, &topology);
    log::info!(
        "initial layout scores {} with {} of {} item(s) placed",
        initial.score(),
        initial.grid().occupied(),
        items.len()
    );

    let (restart, outcome) = (0..config.restarts)
        .into_par_iter()
        .map(|restart| {
            let rng = config.seed.rng_for(restart);
            let search = LocalSearch::from_solution(initial.clone(), &items, rng);
            (restart, search.run(config.limits))
        })
        .max_by_key(|(restart, outcome)| (outcome.best.score(), Reverse(*restart)))
        .ok_or(RunError::ZeroRestarts)?;

    log::info!(
        "restart {restart} of {} won with score {} after {} iteration(s)",
        config.restarts,
        outcome.best.score(),
        outcome.stats.iterations
    );

    Ok(RunOutcome {
        items,
        best: outcome.best,
        stats: outcome.stats,
        restart,
        restarts: config.restarts,
        seed: config.seed,
        budget,
        warnings,
    })
}
