//! Enchant budget check run before a search.
//!
//! Tablets supply enchant points and UNLOCK effects; priority artifacts and
//! unlocked artifacts consume them. A plan that asks for more than its
//! tablets can supply still runs, but only after the caller confirms the
//! [`BudgetWarning`]s.

use sephiria_core::{DirectionValue, GRID_WIDTH, Keyword, Tablet, Target};

use crate::{Plan, PlanError};

/// Enchant points one tablet supplies on a grid of `height` rows.
///
/// `ROW` gives 5, `TOP` and `BOTTOM` 6, `COL` one less than the height and
/// `SLASH` one less than the shorter grid side. Offsets give their amount
/// when it is positive. Everything else gives nothing.
///
/// # Examples
///
/// ```
/// use sephiria_app::budget::tablet_points;
/// use sephiria_core::{DirectionKey, DirectionValue, Keyword, Tablet};
///
/// let tablet = Tablet::new(
///     "Cross",
///     [
///         (DirectionKey::Keyword(Keyword::Row), DirectionValue::Amount(1)),
///         (DirectionKey::Keyword(Keyword::Col), DirectionValue::Amount(1)),
///         (DirectionKey::Linear(1), DirectionValue::Amount(3)),
///     ],
///     false,
/// );
/// assert_eq!(tablet_points(&tablet, 6), 5 + 5 + 3);
/// ```
#[must_use]
pub fn tablet_points(tablet: &Tablet, height: usize) -> u64 {
    let height = height as u64;
    tablet
        .directions
        .iter()
        .map(|direction| match (direction.target, direction.value) {
            (Target::Keyword(Keyword::Row), _) => 5,
            (Target::Keyword(Keyword::Top | Keyword::Bottom), _) => 6,
            (Target::Keyword(Keyword::Col), _) => height.saturating_sub(1),
            (Target::Keyword(Keyword::Slash), _) => {
                height.min(GRID_WIDTH as u64).saturating_sub(1)
            }
            (Target::Offset(_), DirectionValue::Amount(amount)) => {
                u64::try_from(amount).unwrap_or(0)
            }
            _ => 0,
        })
        .sum()
}

/// Supply and demand of enchant points, UNLOCK effects and hourglasses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetReport {
    /// Enchant points all tablets supply.
    pub enchant_capacity: u64,
    /// Enchant points needed to max out every priority artifact.
    pub enchant_required: u64,
    /// Tablets with at least one UNLOCK direction.
    pub unlock_supply: usize,
    /// Artifacts marked as unlocked.
    pub unlocks_used: usize,
    /// Hourglass artifacts.
    pub hourglasses: usize,
    /// Spellbooks an hourglass can pair with.
    pub spells: usize,
}

/// A budget shortfall that needs confirmation before searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BudgetWarning {
    /// Priority artifacts need more enchant than the tablets supply.
    #[display("required enchant exceeds supply ({required} > {capacity})")]
    EnchantShortage {
        /// Points needed.
        required: u64,
        /// Points supplied.
        capacity: u64,
    },
    /// More artifacts are unlocked than there are UNLOCK tablets.
    #[display("not enough UNLOCK tablets ({used} > {supply})")]
    UnlockShortage {
        /// Unlocked artifacts.
        used: usize,
        /// UNLOCK tablets.
        supply: usize,
    },
    /// More hourglasses than spellbooks to pair them with.
    #[display("too many hourglasses ({hourglasses} > {spells})")]
    HourglassSurplus {
        /// Hourglass artifacts.
        hourglasses: usize,
        /// Spellbooks.
        spells: usize,
    },
}

impl BudgetReport {
    /// Tallies the budget of `plan`.
    ///
    /// # Errors
    ///
    /// Returns an error if a tablet direction in the plan is invalid.
    pub fn from_plan(plan: &Plan) -> Result<Self, PlanError> {
        let height = plan.capacity.div_ceil(GRID_WIDTH);
        let mut report = Self::default();

        for entry in &plan.tablets {
            let tablet = entry.to_tablet()?;
            report.enchant_capacity += entry.quantity as u64 * tablet_points(&tablet, height);
            if tablet.has_unlock() {
                report.unlock_supply += entry.quantity;
            }
        }

        for entry in &plan.artifacts {
            if entry.priority {
                let missing = entry.max_level.saturating_sub(entry.enchant);
                report.enchant_required += entry.quantity as u64 * u64::from(missing);
            }
            if entry.unlock {
                report.unlocks_used += entry.quantity;
            }
            if entry.hourglass {
                report.hourglasses += entry.quantity;
            } else if entry.spell {
                report.spells += entry.quantity;
            }
        }

        Ok(report)
    }

    /// Returns every shortfall in this report.
    #[must_use]
    pub fn warnings(&self) -> Vec<BudgetWarning> {
        let mut warnings = Vec::new();
        if self.enchant_required > self.enchant_capacity {
            warnings.push(BudgetWarning::EnchantShortage {
                required: self.enchant_required,
                capacity: self.enchant_capacity,
            });
        }
        if self.unlocks_used > self.unlock_supply {
            warnings.push(BudgetWarning::UnlockShortage {
                used: self.unlocks_used,
                supply: self.unlock_supply,
            });
        }
        if self.hourglasses > self.spells {
            warnings.push(BudgetWarning::HourglassSurplus {
                hourglasses: self.hourglasses,
                spells: self.spells,
            });
        }
        warnings
    }
}
