//! Arrangement plans: the TOML description of an inventory and its items.
//!
//! A plan lists tablet and artifact kinds with quantities. [`Plan::items`]
//! expands it into the flat item pool the solver works on: every tablet
//! instance in plan order, then every artifact instance in plan order.
//!
//! ```toml
//! capacity = 24
//! time = 2.5
//!
//! [[tablets]]
//! name = "Arrow"
//! quantity = 2
//! turnable = true
//! directions = [{ offset = 1, value = 2 }, { dx = 0, dy = -1, value = "UNLOCK" }]
//!
//! [[tablets]]
//! name = "Beam"
//! directions = [{ keyword = "ROW", value = 1 }]
//!
//! [[artifacts]]
//! name = "Chalcedony Key"
//! max_level = 5
//! enchant = 2
//! combo = ["ember"]
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;
use sephiria_core::{
    Artifact, ArtifactFlags, DirectionKey, DirectionValue, Item, Keyword, Offset,
    ParseKeywordError, ParseScaleSideError, ScaleSide, Tablet,
};
use sephiria_solver::{ParseSeedError, SearchSeed};

/// Errors that can occur while loading or expanding a plan.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PlanError {
    /// The plan file could not be read.
    #[display("failed to read {}: {source}", path.display())]
    #[from(skip)]
    Io {
        /// The plan file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The plan is not valid TOML or does not match the plan layout.
    #[display("invalid plan: {_0}")]
    Toml(toml::de::Error),
    /// The grid has no usable cell.
    #[display("capacity must be at least 1")]
    #[from(skip)]
    ZeroCapacity,
    /// The time limit is negative or not finite.
    #[display("invalid time limit {seconds} s")]
    #[from(skip)]
    InvalidTime {
        /// The rejected value.
        seconds: f64,
    },
    /// The plan seed is malformed.
    #[display("invalid seed: {_0}")]
    Seed(ParseSeedError),
    /// A direction value is neither an integer nor `"UNLOCK"`.
    #[display("{item}: invalid direction value {value:?}, expected an integer or \"UNLOCK\"")]
    #[from(skip)]
    InvalidValue {
        /// The tablet the direction belongs to.
        item: String,
        /// The rejected value.
        value: String,
    },
    /// A direction keyword is unknown.
    #[display("{item}: {source}")]
    #[from(skip)]
    InvalidKeyword {
        /// The tablet the direction belongs to.
        item: String,
        /// The parse failure.
        source: ParseKeywordError,
    },
    /// A scale side is neither left nor right.
    #[display("{item}: {source}")]
    #[from(skip)]
    InvalidScale {
        /// The artifact carrying the scale setting.
        item: String,
        /// The parse failure.
        source: ParseScaleSideError,
    },
}

/// An inventory and the items to arrange in it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Number of usable inventory cells.
    pub capacity: usize,
    /// Search time in seconds.
    #[serde(default)]
    pub time: Option<f64>,
    /// Search seed as 64 hex digits.
    #[serde(default)]
    pub seed: Option<String>,
    /// Tablet kinds.
    #[serde(default)]
    pub tablets: Vec<TabletEntry>,
    /// Artifact kinds.
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
}

/// A tablet kind in a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabletEntry {
    /// Display name.
    pub name: String,
    /// Number of copies.
    #[serde(default = "one")]
    pub quantity: usize,
    /// Whether the tablet may be rotated.
    #[serde(default)]
    pub turnable: bool,
    /// Placement tags.
    #[serde(default)]
    pub constraint: Vec<String>,
    /// Effect directions.
    #[serde(default)]
    pub directions: Vec<DirectionEntry>,
}

/// One tablet direction, keyed by a linear offset, a `(dx, dy)` pair or a
/// keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DirectionEntry {
    /// `{ offset = n, value = v }`
    Linear {
        /// Row-major offset, normalized to `(dx, dy)`.
        offset: i32,
        /// Effect value.
        value: ValueEntry,
    },
    /// `{ dx = x, dy = y, value = v }`
    Offset {
        /// Column delta.
        dx: i32,
        /// Row delta, positive downwards.
        dy: i32,
        /// Effect value.
        value: ValueEntry,
    },
    /// `{ keyword = "ROW", value = v }`
    Keyword {
        /// Keyword name, case-insensitive.
        keyword: String,
        /// Effect value.
        value: ValueEntry,
    },
}

/// A direction value as written in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ValueEntry {
    /// An integer amount.
    Amount(i32),
    /// A word; only `"UNLOCK"` is accepted.
    Word(String),
}

/// An artifact kind in a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
#[expect(clippy::struct_excessive_bools)]
pub struct ArtifactEntry {
    /// Display name.
    pub name: String,
    /// Number of copies.
    #[serde(default = "one")]
    pub quantity: usize,
    /// Highest enchant level.
    pub max_level: u32,
    /// Current enchant level, clamped to `max_level`.
    #[serde(default)]
    pub enchant: u32,
    /// Doubles every tablet effect received.
    #[serde(default)]
    pub priority: bool,
    /// Combo labels.
    #[serde(default)]
    pub combo: Vec<String>,
    /// Placement tags.
    #[serde(default)]
    pub constraint: Vec<String>,
    /// Only one copy may be owned.
    #[serde(default)]
    pub unique: bool,
    /// Summons a unit.
    #[serde(default)]
    pub unit: bool,
    /// Is a spellbook.
    #[serde(default)]
    pub spell: bool,
    /// Joins the devotion badge row.
    #[serde(default)]
    pub devotion: bool,
    /// Is an hourglass applied to a spellbook.
    #[serde(default)]
    pub hourglass: bool,
    /// Unlocked by an UNLOCK tablet, clearing its placement tags.
    #[serde(default)]
    pub unlock: bool,
    /// Requested half of the grid: `"left"` or `"right"`.
    #[serde(default)]
    pub scale: Option<String>,
}

fn one() -> usize {
    1
}

impl FromStr for Plan {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let plan: Self = toml::from_str(s)?;
        if plan.capacity == 0 {
            return Err(PlanError::ZeroCapacity);
        }
        Ok(plan)
    }
}

impl Plan {
    /// Reads and parses the plan file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Io`] if the file cannot be read, or any error of
    /// [`Plan::from_str`].
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let content = fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_owned(),
            source,
        })?;
        content.parse()
    }

    /// Returns the time limit, if the plan sets one.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidTime`] for negative or non-finite values.
    pub fn time_limit(&self) -> Result<Option<Duration>, PlanError> {
        self.time.map(seconds_to_duration).transpose()
    }

    /// Returns the seed, if the plan sets one.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Seed`] if the seed is malformed.
    pub fn search_seed(&self) -> Result<Option<SearchSeed>, PlanError> {
        Ok(self
            .seed
            .as_deref()
            .map(str::parse::<SearchSeed>)
            .transpose()?)
    }

    /// Returns the number of item instances the plan expands to.
    #[must_use]
    pub fn item_count(&self) -> usize {
        let tablets: usize = self.tablets.iter().map(|t| t.quantity).sum();
        let artifacts: usize = self.artifacts.iter().map(|a| a.quantity).sum();
        tablets + artifacts
    }

    /// Expands the plan into the flat item pool.
    ///
    /// # Errors
    ///
    /// Returns an error if a direction value, keyword or scale side is
    /// invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use sephiria_app::Plan;
    ///
    /// let plan: Plan = r#"
    ///     capacity = 12
    ///     [[tablets]]
    ///     name = "Arrow"
    ///     quantity = 2
    ///     directions = [{ offset = 1, value = 1 }]
    ///     [[artifacts]]
    ///     name = "Ring"
    ///     max_level = 3
    ///     enchant = 9
    /// "#.parse()?;
    /// let items = plan.items()?;
    /// assert_eq!(items.len(), 3);
    /// assert_eq!(items[2].as_artifact().map(|a| a.current_enchant), Some(3));
    /// # Ok::<(), sephiria_app::PlanError>(())
    /// ```
    pub fn items(&self) -> Result<Vec<Item>, PlanError> {
        let mut items = Vec::with_capacity(self.item_count());
        for entry in &self.tablets {
            let tablet = entry.to_tablet()?;
            items.extend(std::iter::repeat_n(Item::Tablet(tablet), entry.quantity));
        }
        for entry in &self.artifacts {
            let artifact = entry.to_artifact()?;
            items.extend(std::iter::repeat_n(
                Item::Artifact(artifact),
                entry.quantity,
            ));
        }
        Ok(items)
    }
}

/// Converts a seconds value into a [`Duration`].
///
/// # Errors
///
/// Returns [`PlanError::InvalidTime`] for negative or non-finite values.
pub fn seconds_to_duration(seconds: f64) -> Result<Duration, PlanError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| PlanError::InvalidTime { seconds })
}

impl TabletEntry {
    /// Builds one tablet instance.
    ///
    /// # Errors
    ///
    /// Returns an error if a direction value or keyword is invalid.
    pub fn to_tablet(&self) -> Result<Tablet, PlanError> {
        let directions = self
            .directions
            .iter()
            .map(|direction| direction.resolve(&self.name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Tablet::new(self.name.clone(), directions, self.turnable)
            .with_constraint(self.constraint.iter().cloned()))
    }
}

impl DirectionEntry {
    /// Resolves the entry into a key and value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value or keyword is invalid.
    pub fn resolve(&self, item: &str) -> Result<(DirectionKey, DirectionValue), PlanError> {
        match self {
            Self::Linear { offset, value } => {
                Ok((DirectionKey::Linear(*offset), value.resolve(item)?))
            }
            Self::Offset { dx, dy, value } => Ok((
                DirectionKey::Offset(Offset::new(*dx, *dy)),
                value.resolve(item)?,
            )),
            Self::Keyword { keyword, value } => {
                let keyword = keyword
                    .parse::<Keyword>()
                    .map_err(|source| PlanError::InvalidKeyword {
                        item: item.to_owned(),
                        source,
                    })?;
                Ok((DirectionKey::Keyword(keyword), value.resolve(item)?))
            }
        }
    }
}

impl ValueEntry {
    /// Resolves the entry into a direction value.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidValue`] for words other than `"UNLOCK"`.
    pub fn resolve(&self, item: &str) -> Result<DirectionValue, PlanError> {
        match self {
            Self::Amount(amount) => Ok(DirectionValue::Amount(*amount)),
            Self::Word(word) if word.eq_ignore_ascii_case("UNLOCK") => Ok(DirectionValue::Unlock),
            Self::Word(word) => Err(PlanError::InvalidValue {
                item: item.to_owned(),
                value: word.clone(),
            }),
        }
    }
}

impl ArtifactEntry {
    /// Returns the flags set on this entry.
    #[must_use]
    pub fn flags(&self) -> ArtifactFlags {
        let mut flags = ArtifactFlags::empty();
        flags.set(ArtifactFlags::UNIQUE, self.unique);
        flags.set(ArtifactFlags::UNIT, self.unit);
        flags.set(ArtifactFlags::SPELL, self.spell);
        flags.set(ArtifactFlags::DEVOTION, self.devotion);
        flags.set(ArtifactFlags::HOURGLASS, self.hourglass);
        flags
    }

    /// Builds one artifact instance.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidScale`] if the scale side is invalid.
    pub fn to_artifact(&self) -> Result<Artifact, PlanError> {
        let scale = self
            .scale
            .as_deref()
            .map(str::parse::<ScaleSide>)
            .transpose()
            .map_err(|source| PlanError::InvalidScale {
                item: self.name.clone(),
                source,
            })?;
        let constraint = if self.unlock {
            &[][..]
        } else {
            &self.constraint[..]
        };
        Ok(Artifact::new(self.name.clone(), self.max_level)
            .with_enchant(self.enchant)
            .with_priority(self.priority)
            .with_constraint(constraint.iter().cloned())
            .with_combo(self.combo.iter().cloned())
            .with_flags(self.flags())
            .with_scale(scale))
    }
}
