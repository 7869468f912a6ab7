//! Tablets, artifacts and the tagged [`Item`] union placed on the grid.

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{Direction, DirectionKey, DirectionValue, Keyword, Target};

/// Name of the artifact whose combo must match the row it sits in.
pub const CHALCEDONY_KEY: &str = "Chalcedony Key";

/// Name of the artifact that lines up devoted units in a single row.
pub const DEVOTION_BADGE: &str = "Badge of Devotion";

/// Name of the artifact that pairs with a spellbook.
pub const SHINING_HOURGLASS: &str = "Shining Hourglass";

/// Constraint tag that makes an artifact score from its neighbours.
pub const HARMONY_TAG: &str = "harmony";

/// A directional item whose effects reach other cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tablet {
    /// Display name.
    pub name: String,
    /// Canonical (unrotated) directions.
    pub directions: Vec<Direction>,
    /// Whether rotations other than 0 are allowed.
    pub turnable: bool,
    /// Opaque placement tags, consumed by the caller.
    pub constraint: BTreeSet<String>,
}

impl Tablet {
    /// Creates a tablet, normalizing every direction key.
    #[must_use]
    pub fn new<I>(name: impl Into<String>, directions: I, turnable: bool) -> Self
    where
        I: IntoIterator<Item = (DirectionKey, DirectionValue)>,
    {
        Self {
            name: name.into(),
            directions: directions
                .into_iter()
                .map(|(key, value)| Direction::new(key, value))
                .collect(),
            turnable,
            constraint: BTreeSet::new(),
        }
    }

    /// Replaces the constraint tags.
    #[must_use]
    pub fn with_constraint<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraint = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if any direction names a whole row, column or diagonal,
    /// or carries an UNLOCK effect.
    ///
    /// Such tablets are placed before ordinary items.
    #[must_use]
    pub fn is_line_tablet(&self) -> bool {
        self.directions.iter().any(|d| {
            matches!(
                d.target,
                Target::Keyword(Keyword::Row | Keyword::Col | Keyword::Slash | Keyword::BackSlash)
            ) || d.value.is_unlock()
        })
    }

    /// Returns `true` if any direction carries an UNLOCK effect.
    #[must_use]
    pub fn has_unlock(&self) -> bool {
        self.directions.iter().any(|d| d.value.is_unlock())
    }
}

bitflags::bitflags! {
    /// Boolean traits of an artifact.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ArtifactFlags: u8 {
        /// Only one copy may be owned.
        const UNIQUE = 1 << 0;
        /// Summons a companion unit.
        const UNIT = 1 << 1;
        /// Is a spellbook.
        const SPELL = 1 << 2;
        /// Joins the row of a [`DEVOTION_BADGE`].
        const DEVOTION = 1 << 3;
        /// Is an hourglass to be paired with a spellbook.
        const HOURGLASS = 1 << 4;
    }
}

/// Which half of the grid an artifact asks to sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleSide {
    /// Columns 0-2.
    Left,
    /// Columns 3-5.
    Right,
}

impl ScaleSide {
    /// Returns `true` for [`ScaleSide::Left`].
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::Left)
    }
}

impl fmt::Display for ScaleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Error returned when a string is neither `left` nor `right`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid scale side {input:?}, expected \"left\" or \"right\"")]
pub struct ParseScaleSideError {
    input: String,
}

impl FromStr for ScaleSide {
    type Err = ParseScaleSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("left") {
            Ok(Self::Left)
        } else if s.eq_ignore_ascii_case("right") {
            Ok(Self::Right)
        } else {
            Err(ParseScaleSideError {
                input: s.to_owned(),
            })
        }
    }
}

/// The four combo categories, in row-parity order.
///
/// Row `r` of the grid belongs to category `ALL[r % 4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboCategory {
    /// Rows 0, 4, 8, ...
    Sturdy,
    /// Rows 1, 5, 9, ...
    Ember,
    /// Rows 2, 6, 10, ...
    Glacier,
    /// Rows 3, 7, 11, ...
    Magitech,
}

impl ComboCategory {
    /// All categories in row-parity order.
    pub const ALL: [Self; 4] = [Self::Sturdy, Self::Ember, Self::Glacier, Self::Magitech];

    /// Returns the category acting on `row`.
    #[must_use]
    pub const fn of_row(row: usize) -> Self {
        Self::ALL[row % 4]
    }

    /// Returns the row parity class (0-3) of this category.
    #[must_use]
    pub const fn parity(self) -> usize {
        self as usize
    }

    /// Looks up a combo label, ignoring ASCII case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label))
    }

    /// Returns the lower-case label of this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sturdy => "sturdy",
            Self::Ember => "ember",
            Self::Glacier => "glacier",
            Self::Magitech => "magitech",
        }
    }
}

/// A stationary item that receives tablet effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Display name.
    pub name: String,
    /// Highest enchant level.
    pub max_level: u32,
    /// Current enchant level, at most `max_level`.
    pub current_enchant: u32,
    /// Doubles every tablet effect received.
    pub priority: bool,
    /// Placement tags; [`HARMONY_TAG`] enables neighbour scoring.
    pub constraint: BTreeSet<String>,
    /// Combo labels.
    pub combo: BTreeSet<String>,
    /// Boolean traits.
    pub flags: ArtifactFlags,
    /// Requested half of the grid, if any.
    pub scale_position: Option<ScaleSide>,
}

impl Artifact {
    /// Creates an artifact at enchant level 0 with no tags.
    #[must_use]
    pub fn new(name: impl Into<String>, max_level: u32) -> Self {
        Self {
            name: name.into(),
            max_level,
            current_enchant: 0,
            priority: false,
            constraint: BTreeSet::new(),
            combo: BTreeSet::new(),
            flags: ArtifactFlags::empty(),
            scale_position: None,
        }
    }

    /// Sets the enchant level, clamped to `max_level`.
    #[must_use]
    pub fn with_enchant(mut self, level: u32) -> Self {
        self.current_enchant = level.min(self.max_level);
        self
    }

    /// Sets the priority flag.
    #[must_use]
    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the constraint tags.
    #[must_use]
    pub fn with_constraint<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraint = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the combo labels.
    #[must_use]
    pub fn with_combo<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.combo = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Adds flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ArtifactFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Sets the requested side.
    #[must_use]
    pub fn with_scale(mut self, side: Option<ScaleSide>) -> Self {
        self.scale_position = side;
        self
    }

    /// Returns `true` if this is the [`CHALCEDONY_KEY`].
    #[must_use]
    pub fn is_chalcedony_key(&self) -> bool {
        self.name == CHALCEDONY_KEY
    }

    /// Returns `true` if this is the [`DEVOTION_BADGE`].
    #[must_use]
    pub fn is_devotion_badge(&self) -> bool {
        self.name == DEVOTION_BADGE
    }

    /// Returns `true` if the constraint set carries [`HARMONY_TAG`].
    #[must_use]
    pub fn has_harmony(&self) -> bool {
        self.constraint.contains(HARMONY_TAG)
    }

    /// Returns `true` if any combo label names `category`.
    #[must_use]
    pub fn has_combo(&self, category: ComboCategory) -> bool {
        self.combo
            .iter()
            .any(|label| ComboCategory::from_label(label) == Some(category))
    }

    /// Returns the category of the first combo label, if it is a known one.
    #[must_use]
    pub fn primary_combo(&self) -> Option<ComboCategory> {
        self.combo
            .first()
            .and_then(|label| ComboCategory::from_label(label))
    }
}

/// Anything that occupies a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Item {
    /// A directional tablet.
    Tablet(Tablet),
    /// A stationary artifact.
    Artifact(Artifact),
}

impl Item {
    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tablet(tablet) => &tablet.name,
            Self::Artifact(artifact) => &artifact.name,
        }
    }

    /// Returns the tablet, if this is one.
    #[must_use]
    pub fn as_tablet(&self) -> Option<&Tablet> {
        match self {
            Self::Tablet(tablet) => Some(tablet),
            Self::Artifact(_) => None,
        }
    }

    /// Returns the artifact, if this is one.
    #[must_use]
    pub fn as_artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Artifact(artifact) => Some(artifact),
            Self::Tablet(_) => None,
        }
    }

    /// Returns `true` for tablets that may be rotated.
    #[must_use]
    pub fn is_turnable(&self) -> bool {
        self.as_tablet().is_some_and(|tablet| tablet.turnable)
    }
}

impl From<Tablet> for Item {
    fn from(tablet: Tablet) -> Self {
        Self::Tablet(tablet)
    }
}

impl From<Artifact> for Item {
    fn from(artifact: Artifact) -> Self {
        Self::Artifact(artifact)
    }
}

/// Index of an item in the caller's item pool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

impl ItemId {
    /// Creates an id for pool index `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the pool index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}
