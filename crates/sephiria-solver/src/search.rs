//! Time-boxed hill climbing over tablet rotations.
//!
//! Starting from the greedy [`Solution::initial`] layout, each step picks a
//! random cell. If it holds a turnable tablet, the tablet is turned a quarter
//! clockwise in a candidate copy of the grid. The candidate replaces the
//! current layout when its score is not lower, and replaces the best layout
//! when it is strictly higher. Accepting equal scores lets the search drift
//! across plateaus.
//!
//! Item positions never change during the search; only rotations do.

use std::time::{Duration, Instant};

use rand::seq::IndexedRandom as _;
use rand_pcg::Pcg64Mcg;
use sephiria_core::{Grid, Item, Position, Topology};

use crate::{SearchSeed, Solution, evaluate};

/// Default wall-clock budget of a search.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(3);

/// When a search stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget, checked before every step.
    pub time: Duration,
    /// Optional cap on the number of steps.
    pub max_iterations: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME_LIMIT,
            max_iterations: None,
        }
    }
}

impl SearchLimits {
    /// Limits with the given time budget and no step cap.
    #[must_use]
    pub fn with_time(time: Duration) -> Self {
        Self {
            time,
            max_iterations: None,
        }
    }

    /// Adds a step cap.
    #[must_use]
    pub fn max_iterations(self, max_iterations: u64) -> Self {
        Self {
            max_iterations: Some(max_iterations),
            ..self
        }
    }

    fn allows(&self, started: Instant, iterations: u64) -> bool {
        started.elapsed() < self.time && self.max_iterations.is_none_or(|max| iterations < max)
    }
}

/// Lifecycle of a [`LocalSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchState {
    /// Steps may still be taken.
    Running,
    /// The limits were reached; the best solution is final.
    Done,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Steps taken.
    pub iterations: u64,
    /// Steps whose candidate became the current layout.
    pub accepted: u64,
    /// Steps that raised the best score.
    pub improvements: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// The result of a finished search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The best layout found.
    pub best: Solution,
    /// Search counters.
    pub stats: SearchStats,
}

/// A hill-climbing search over one item pool.
///
/// # Examples
///
/// ```
/// use sephiria_core::{DirectionKey, DirectionValue, Item, Tablet};
/// use sephiria_solver::{LocalSearch, SearchLimits, SearchSeed, Solution};
///
/// let items: Vec<Item> = vec![
///     Tablet::new("Arrow", [(DirectionKey::Linear(1), DirectionValue::Amount(2))], true).into(),
/// ];
/// let topology = Solution::topology_for(12);
/// let rng = SearchSeed::from_bytes([0; 32]).rng_for(0);
/// let search = LocalSearch::new(12, &items, &topology, rng);
/// let outcome = search.run(SearchLimits::default().max_iterations(100));
/// assert_eq!(outcome.stats.iterations, 100);
/// assert_eq!(outcome.best.grid().occupied(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    items: &'a [Item],
    cells: Vec<Position>,
    current: Solution,
    best: Solution,
    rng: Pcg64Mcg,
    state: SearchState,
    stats: SearchStats,
}

impl<'a> LocalSearch<'a> {
    /// Builds the initial layout and prepares a search driven by `rng`.
    #[must_use]
    pub fn new(capacity: usize, items: &'a [Item], topology: &Topology, rng: Pcg64Mcg) -> Self {
        let initial = Solution::initial(capacity, items, topology);
        Self::from_solution(initial, items, rng)
    }

    /// Prepares a search starting from an existing layout.
    #[must_use]
    pub fn from_solution(initial: Solution, items: &'a [Item], rng: Pcg64Mcg) -> Self {
        let cells = initial.grid().positions().collect();
        log::debug!("initial score {}", initial.score());
        Self {
            items,
            cells,
            best: initial.clone(),
            current: initial,
            rng,
            state: SearchState::Running,
            stats: SearchStats::default(),
        }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Returns the current layout.
    #[must_use]
    pub fn current(&self) -> &Solution {
        &self.current
    }

    /// Returns the best layout seen so far.
    #[must_use]
    pub fn best(&self) -> &Solution {
        &self.best
    }

    /// Returns the counters collected so far.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Takes one search step.
    ///
    /// Returns `true` if the candidate was accepted. Does nothing once the
    /// search is [`SearchState::Done`].
    pub fn step(&mut self) -> bool {
        if self.state.is_done() {
            return false;
        }
        self.stats.iterations += 1;

        let mut candidate = self.current.grid().clone();
        if let Some(&pos) = self.cells.choose(&mut self.rng) {
            turn(&mut candidate, self.items, pos);
        }
        let score = evaluate(&candidate, self.items);
        if score < self.current.score() {
            return false;
        }

        self.stats.accepted += 1;
        self.current = Solution::from_parts(candidate, score);
        if score > self.best.score() {
            log::trace!(
                "iteration {}: best score {} -> {score}",
                self.stats.iterations,
                self.best.score()
            );
            self.stats.improvements += 1;
            self.best = self.current.clone();
        }
        true
    }

    /// Steps until `limits` are reached and returns the best layout.
    #[must_use]
    pub fn run(mut self, limits: SearchLimits) -> SearchOutcome {
        let started = Instant::now();
        while limits.allows(started, self.stats.iterations) {
            self.step();
        }
        self.stats.elapsed = started.elapsed();
        self.finish()
    }

    /// Stops the search and returns the best layout.
    #[must_use]
    pub fn finish(mut self) -> SearchOutcome {
        self.state = SearchState::Done;
        log::debug!(
            "search done: {} iteration(s), {} accepted, {} improvement(s), best score {}",
            self.stats.iterations,
            self.stats.accepted,
            self.stats.improvements,
            self.best.score()
        );
        SearchOutcome {
            best: self.best,
            stats: self.stats,
        }
    }
}

/// Turns the tablet at `pos` a quarter clockwise, if it is turnable.
///
/// Returns `false` and leaves `grid` untouched for empty cells and
/// non-turnable items.
pub fn turn(grid: &mut Grid, items: &[Item], pos: Position) -> bool {
    let turnable = grid
        .get(pos)
        .is_some_and(|placement| items[placement.item.index()].is_turnable());
    turnable && grid.rotate(pos)
}

/// Arranges `items` on a grid of `capacity` cells within `max_time`.
///
/// Uses a fresh random seed; see [`run_solver_with`] for reproducible runs.
#[must_use]
pub fn run_solver(capacity: usize, items: &[Item], max_time: Duration) -> Solution {
    run_solver_with(
        capacity,
        items,
        SearchLimits::with_time(max_time),
        &SearchSeed::random(),
    )
    .best
}

/// Arranges `items` on a grid of `capacity` cells, stopping at `limits`.
///
/// The search is driven by the first restart generator of `seed`.
#[must_use]
pub fn run_solver_with(
    capacity: usize,
    items: &[Item],
    limits: SearchLimits,
    seed: &SearchSeed,
) -> SearchOutcome {
    let topology = Solution::topology_for(capacity);
    LocalSearch::new(capacity, items, &topology, seed.rng_for(0)).run(limits)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sephiria_core::{Keyword, Rotation};

    use super::*;
    use crate::testing::{artifact, line_tablet, offset_tablet};

    fn seed(byte: u8) -> SearchSeed {
        SearchSeed::from_bytes([byte; 32])
    }

    fn limits(iterations: u64) -> SearchLimits {
        SearchLimits::with_time(Duration::from_secs(60)).max_iterations(iterations)
    }

    #[test]
    fn test_empty_pool_stays_empty() {
        let outcome = run_solver_with(36, &[], limits(50), &seed(0));
        assert_eq!(outcome.best.grid().occupied(), 0);
        assert_eq!(outcome.best.score(), 0);
        assert_eq!(outcome.stats.iterations, 50);
        assert_eq!(outcome.stats.improvements, 0);
    }

    #[test]
    fn test_zero_capacity_is_harmless() {
        let items: Vec<Item> = vec![artifact("Ring").into()];
        let outcome = run_solver_with(0, &items, limits(10), &seed(0));
        assert_eq!(outcome.best.height(), 0);
        assert_eq!(outcome.best.score(), 0);
    }

    #[test]
    fn test_zero_time_returns_initial_layout() {
        let items: Vec<Item> = vec![offset_tablet("Arrow", 0, 1, 2, true), artifact("Ring").into()];
        let topology = Solution::topology_for(12);
        let initial = Solution::initial(12, &items, &topology);
        let no_time = SearchLimits::with_time(Duration::ZERO);
        let outcome = run_solver_with(12, &items, no_time, &seed(1));
        assert_eq!(outcome.stats.iterations, 0);
        assert_eq!(outcome.best, initial);
    }

    #[test]
    fn test_fixed_items_never_turn() {
        let items: Vec<Item> = vec![
            offset_tablet("Arrow", 1, 0, 2, false),
            line_tablet("Beam", Keyword::Col, false),
            artifact("Ring").into(),
        ];
        let topology = Solution::topology_for(18);
        let initial = Solution::initial(18, &items, &topology);
        let outcome = run_solver_with(18, &items, limits(500), &seed(2));
        assert_eq!(outcome.best.grid(), initial.grid());
        assert_eq!(outcome.stats.improvements, 0);
        // Every step keeps the score, so every step is accepted.
        assert_eq!(outcome.stats.accepted, 500);
    }

    #[test]
    fn test_search_finds_the_facing_rotation() {
        // The tablet goes to (0, 2) and the ring to (0, 3). The arrow starts
        // pointing down; three clockwise quarter turns point it at the ring.
        let items: Vec<Item> = vec![offset_tablet("Arrow", 0, 1, 5, true), artifact("Ring").into()];
        let outcome = run_solver_with(6, &items, limits(2_000), &seed(3));
        assert_eq!(outcome.best.score(), 5);
        let tablet = outcome
            .best
            .grid()
            .placements()
            .find(|(_, p)| p.item.index() == 0)
            .map(|(_, p)| p.rotation);
        assert_eq!(tablet, Some(Rotation::R270));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let items: Vec<Item> = (0..6)
            .map(|i| offset_tablet(&format!("Arrow {i}"), 1, 0, i, true))
            .chain((0..6).map(|i| artifact(&format!("Ring {i}")).into()))
            .collect();
        let a = run_solver_with(18, &items, limits(300), &seed(4));
        let b = run_solver_with(18, &items, limits(300), &seed(4));
        assert_eq!(a.best, b.best);
        assert_eq!(a.stats.accepted, b.stats.accepted);
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let items: Vec<Item> = vec![offset_tablet("Arrow", 1, 0, 1, true)];
        let topology = Solution::topology_for(6);
        let mut search = LocalSearch::new(6, &items, &topology, seed(5).rng_for(0));
        assert!(search.state().is_running());
        search.state = SearchState::Done;
        assert!(!search.step());
        assert_eq!(search.stats().iterations, 0);
    }

    #[test]
    fn test_turn_respects_turnability() {
        let items: Vec<Item> = vec![
            offset_tablet("Fixed", 1, 0, 1, false),
            offset_tablet("Free", 1, 0, 1, true),
            artifact("Ring").into(),
        ];
        let topology = Solution::topology_for(6);
        let mut grid = Solution::initial(6, &items, &topology).into_grid();
        let positions: Vec<_> = grid.placements().map(|(pos, p)| (pos, p.item.index())).collect();
        for (pos, item) in positions {
            assert_eq!(turn(&mut grid, &items, pos), item == 1);
        }
        assert!(!turn(&mut grid, &items, Position::new(0, 5)));
    }

    proptest! {
        #[test]
        fn test_best_never_decreases(
            amounts in prop::collection::vec(-3..=3_i32, 1..8),
            rings in 0_usize..6,
            byte in any::<u8>(),
        ) {
            let items: Vec<Item> = amounts
                .iter()
                .enumerate()
                .map(|(i, &amount)| offset_tablet(&format!("T{i}"), 1, 0, amount, true))
                .chain((0..rings).map(|i| artifact(&format!("R{i}")).into()))
                .collect();
            let topology = Solution::topology_for(18);
            let mut search = LocalSearch::new(18, &items, &topology, seed(byte).rng_for(0));
            let mut best = search.best().score();
            let initial_grid = search.current().grid().clone();
            for _ in 0..100 {
                search.step();
                prop_assert!(search.best().score() >= best);
                prop_assert!(search.best().score() >= search.current().score());
                prop_assert_eq!(search.current().score(), evaluate(search.current().grid(), &items));
                best = search.best().score();
            }
            // Positions never move.
            let occupied = |grid: &Grid| {
                grid.placements().map(|(pos, p)| (pos, p.item)).collect::<Vec<_>>()
            };
            prop_assert_eq!(occupied(search.best().grid()), occupied(&initial_grid));
        }
    }
}
