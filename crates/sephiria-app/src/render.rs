//! Plain-text rendering of layouts and run reports.
//!
//! Each pool item gets a short label: `T1`, `T2`, … for tablets and `A1`,
//! `A2`, … for artifacts, numbered in pool order. Grid cells show the label,
//! followed for tablets by an arrow for the current rotation. Empty cells
//! show `.` and locked cells `#`.

use std::fmt;

use sephiria_core::{GRID_WIDTH, Item, ItemId, Position, Rotation};
use sephiria_solver::{Group, Solution};

use crate::RunOutcome;

const CELL_WIDTH: usize = 5;

/// Returns the arrow drawn for `rotation`.
#[must_use]
pub fn rotation_arrow(rotation: Rotation) -> char {
    match rotation.quarter_turns() {
        0 => '↑',
        1 => '→',
        2 => '↓',
        _ => '←',
    }
}

/// Short labels for every item of a pool.
#[derive(Debug, Clone)]
pub struct Labels(Vec<String>);

impl Labels {
    /// Labels `items` in pool order.
    #[must_use]
    pub fn new(items: &[Item]) -> Self {
        let mut tablets = 0;
        let mut artifacts = 0;
        let labels = items
            .iter()
            .map(|item| match item {
                Item::Tablet(_) => {
                    tablets += 1;
                    format!("T{tablets}")
                }
                Item::Artifact(_) => {
                    artifacts += 1;
                    format!("A{artifacts}")
                }
            })
            .collect();
        Self(labels)
    }

    /// Returns the label of `id`.
    #[must_use]
    pub fn get(&self, id: ItemId) -> &str {
        &self.0[id.index()]
    }
}

/// Displays a grid, one line per row.
///
/// # Examples
///
/// ```
/// use sephiria_app::render::GridView;
/// use sephiria_core::{Artifact, Item};
/// use sephiria_solver::Solution;
///
/// let items: Vec<Item> = vec![Artifact::new("Ring", 3).into()];
/// let solution = Solution::initial(8, &items, &Solution::topology_for(8));
/// let text = GridView::new(&solution, &items).to_string();
/// assert_eq!(text.lines().count(), 2);
/// assert!(text.contains("A1"));
/// assert!(text.lines().nth(1).is_some_and(|row| row.contains('#')));
/// ```
#[derive(Debug)]
pub struct GridView<'a> {
    solution: &'a Solution,
    items: &'a [Item],
    labels: Labels,
}

impl<'a> GridView<'a> {
    /// Creates a view of `solution`, whose cells index into `items`.
    #[must_use]
    pub fn new(solution: &'a Solution, items: &'a [Item]) -> Self {
        Self {
            solution,
            items,
            labels: Labels::new(items),
        }
    }

    fn cell(&self, pos: Position) -> String {
        let grid = self.solution.grid();
        if grid.is_locked(pos) {
            return "#".to_owned();
        }
        let Some(placement) = grid.get(pos) else {
            return ".".to_owned();
        };
        let label = self.labels.get(placement.item);
        match &self.items[placement.item.index()] {
            Item::Tablet(_) => format!("{label}{}", rotation_arrow(placement.rotation)),
            Item::Artifact(_) => label.to_owned(),
        }
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.solution.height() {
            let cells: Vec<String> = (0..GRID_WIDTH)
                .map(|col| format!("{:<CELL_WIDTH$}", self.cell(Position::new(row, col))))
                .collect();
            writeln!(f, "{}", cells.join(" ").trim_end())?;
        }
        Ok(())
    }
}

/// Displays the legend of the items on a grid, in pool order.
#[derive(Debug)]
pub struct LegendView<'a> {
    solution: &'a Solution,
    items: &'a [Item],
    labels: Labels,
}

impl<'a> LegendView<'a> {
    /// Creates a legend for `solution`, whose cells index into `items`.
    #[must_use]
    pub fn new(solution: &'a Solution, items: &'a [Item]) -> Self {
        Self {
            solution,
            items,
            labels: Labels::new(items),
        }
    }
}

impl fmt::Display for LegendView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut placed: Vec<_> = self.solution.grid().placements().collect();
        placed.sort_by_key(|(_, placement)| placement.item);
        for (pos, placement) in placed {
            let label = self.labels.get(placement.item);
            match &self.items[placement.item.index()] {
                Item::Tablet(tablet) => writeln!(
                    f,
                    "  {label:<4} {} {} at {pos}",
                    tablet.name,
                    rotation_arrow(placement.rotation)
                )?,
                Item::Artifact(artifact) => writeln!(
                    f,
                    "  {label:<4} {} +{}/{} at {pos}",
                    artifact.name, artifact.current_enchant, artifact.max_level
                )?,
            }
        }
        Ok(())
    }
}

/// Displays the classification of a pool, one group per line.
#[derive(Debug)]
pub struct GroupsView<'a> {
    groups: &'a [Group],
    items: &'a [Item],
    labels: Labels,
}

impl<'a> GroupsView<'a> {
    /// Creates a view of `groups` over `items`.
    #[must_use]
    pub fn new(groups: &'a [Group], items: &'a [Item]) -> Self {
        Self {
            groups,
            items,
            labels: Labels::new(items),
        }
    }
}

impl fmt::Display for GroupsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in self.groups {
            let members: Vec<String> = group
                .members()
                .iter()
                .map(|&id| format!("{} {}", self.labels.get(id), self.items[id.index()].name()))
                .collect();
            writeln!(
                f,
                "  [{:>3}] {}: {}",
                group.priority(),
                group.kind(),
                members.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Displays a full run report: grid, legend, score, statistics, seed and
/// dropped items.
#[derive(Debug)]
pub struct ReportView<'a> {
    outcome: &'a RunOutcome,
}

impl<'a> ReportView<'a> {
    /// Creates a report of `outcome`.
    #[must_use]
    pub fn new(outcome: &'a RunOutcome) -> Self {
        Self { outcome }
    }
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RunOutcome {
            items,
            best,
            stats,
            seed,
            restart,
            restarts,
            ..
        } = self.outcome;

        writeln!(f, "Layout:")?;
        write!(f, "{}", GridView::new(best, items))?;
        writeln!(f)?;
        writeln!(f, "Legend:")?;
        write!(f, "{}", LegendView::new(best, items))?;
        writeln!(f)?;
        writeln!(f, "Score: {}", best.score())?;
        writeln!(
            f,
            "Search: {} iteration(s), {} accepted, {} improvement(s) in {:.2?}",
            stats.iterations, stats.accepted, stats.improvements, stats.elapsed
        )?;
        writeln!(f, "Best of {restarts} restart(s): #{restart}")?;
        writeln!(f, "Seed: {seed}")?;

        let missing = best.missing_items(items.len());
        if !missing.is_empty() {
            let labels = Labels::new(items);
            writeln!(f)?;
            writeln!(f, "Not placed:")?;
            for id in missing {
                writeln!(f, "  {:<4} {}", labels.get(id), items[id.index()].name())?;
            }
        }
        Ok(())
    }
}
