//! Relative coordinates, direction keywords and quarter-turn rotation.
//!
//! Tablet directions are authored against a width-6 inventory. A direction
//! key is either a linear offset into that band, an explicit relative
//! coordinate, or a [`Keyword`] naming a whole line. Linear offsets are
//! normalized into [`Offset`]s as soon as a [`Direction`] is built, so
//! everything downstream only deals with [`Target::Offset`] and
//! [`Target::Keyword`].
//!
//! # Examples
//!
//! ```
//! use sephiria_core::{Direction, DirectionKey, DirectionValue, Offset, Rotation, Target};
//!
//! let up = Direction::new(DirectionKey::Linear(-6), DirectionValue::Amount(2));
//! assert_eq!(up.target, Target::Offset(Offset::new(0, -1)));
//!
//! // A quarter turn clockwise points the same effect to the right.
//! let turned = up.rotated(Rotation::R90);
//! assert_eq!(turned.target, Target::Offset(Offset::new(1, 0)));
//! ```

use std::{fmt, str::FromStr};

/// Number of columns of every inventory grid.
pub const GRID_WIDTH: usize = 6;

#[expect(clippy::cast_possible_wrap)]
const WIDTH: i32 = GRID_WIDTH as i32;

/// A coordinate relative to a tablet's anchor cell.
///
/// `+dx` points right and `+dy` points down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Horizontal displacement (positive to the right).
    pub dx: i32,
    /// Vertical displacement (positive downwards).
    pub dy: i32,
}

impl Offset {
    /// Creates an offset from its components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Converts a linear offset in a width-6 band into a relative coordinate.
    ///
    /// The row is the floor of `offset / 6` and the column its Euclidean
    /// remainder. Columns above 3 are re-centered one row down, so the
    /// resulting `dx` always lies in `-2..=3` and `dy * 6 + dx == offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sephiria_core::Offset;
    ///
    /// assert_eq!(Offset::from_linear(1), Offset::new(1, 0));
    /// assert_eq!(Offset::from_linear(-1), Offset::new(-1, 0));
    /// assert_eq!(Offset::from_linear(-6), Offset::new(0, -1));
    /// assert_eq!(Offset::from_linear(5), Offset::new(-1, 1));
    /// ```
    #[must_use]
    pub const fn from_linear(offset: i32) -> Self {
        let mut dy = offset.div_euclid(WIDTH);
        let mut dx = offset.rem_euclid(WIDTH);
        if dx > 3 {
            dx -= WIDTH;
            dy += 1;
        }
        Self { dx, dy }
    }

    /// Rotates the offset a quarter turn clockwise: `(dx, dy) -> (-dy, dx)`.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }
}

/// A line-shaped direction that a tablet can name instead of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// The anchor's whole row.
    Row,
    /// The anchor's whole column.
    Col,
    /// Everything above the anchor.
    Top,
    /// Everything below the anchor.
    Bottom,
    /// Everything left of the anchor.
    Left,
    /// Everything right of the anchor.
    Right,
    /// The `/` diagonal through the anchor.
    Slash,
    /// The `\` diagonal through the anchor.
    BackSlash,
}

impl Keyword {
    /// All keywords, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Row,
        Self::Col,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::Slash,
        Self::BackSlash,
    ];

    /// Returns the keyword after a quarter turn clockwise.
    ///
    /// Rows and columns swap, the four sides cycle
    /// `Top -> Right -> Bottom -> Left -> Top`, and the diagonals swap.
    ///
    /// # Examples
    ///
    /// ```
    /// use sephiria_core::Keyword;
    ///
    /// assert_eq!(Keyword::Row.rotated_cw(), Keyword::Col);
    /// assert_eq!(Keyword::Top.rotated_cw(), Keyword::Right);
    /// assert_eq!(Keyword::Slash.rotated_cw(), Keyword::BackSlash);
    /// ```
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::Row => Self::Col,
            Self::Col => Self::Row,
            Self::Top => Self::Right,
            Self::Right => Self::Bottom,
            Self::Bottom => Self::Left,
            Self::Left => Self::Top,
            Self::Slash => Self::BackSlash,
            Self::BackSlash => Self::Slash,
        }
    }

    /// Returns the upper-case name used in tablet definitions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Row => "ROW",
            Self::Col => "COL",
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Slash => "SLASH",
            Self::BackSlash => "BACK_SLASH",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known [`Keyword`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown direction keyword: {input:?}")]
pub struct ParseKeywordError {
    input: String,
}

impl FromStr for Keyword {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|keyword| keyword.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKeywordError {
                input: s.to_owned(),
            })
    }
}

/// One of the four orientations of a tablet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rotation(u8);

impl Rotation {
    /// No rotation.
    pub const R0: Self = Self(0);
    /// A quarter turn clockwise.
    pub const R90: Self = Self(1);
    /// A half turn.
    pub const R180: Self = Self(2);
    /// Three quarter turns clockwise.
    pub const R270: Self = Self(3);

    /// All four orientations in ascending order.
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Creates a rotation of `turns` quarter turns, reduced modulo 4.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_quarter_turns(turns: u32) -> Self {
        Self((turns % 4) as u8)
    }

    /// Returns the number of clockwise quarter turns (0-3).
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// Returns the rotation one quarter turn further clockwise.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % 4)
    }
}

/// A direction key as written in a tablet definition.
///
/// Only used as input; [`Direction::new`] normalizes it into a [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionKey {
    /// A linear offset in a width-6 band, see [`Offset::from_linear`].
    Linear(i32),
    /// An explicit relative coordinate.
    Offset(Offset),
    /// A line-shaped keyword.
    Keyword(Keyword),
}

/// The normalized target of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Target {
    /// A single cell relative to the anchor.
    Offset(Offset),
    /// A whole line relative to the anchor.
    Keyword(Keyword),
}

impl From<DirectionKey> for Target {
    fn from(key: DirectionKey) -> Self {
        match key {
            DirectionKey::Linear(offset) => Self::Offset(Offset::from_linear(offset)),
            DirectionKey::Offset(offset) => Self::Offset(offset),
            DirectionKey::Keyword(keyword) => Self::Keyword(keyword),
        }
    }
}

impl Target {
    /// Returns the target after a quarter turn clockwise.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::Offset(offset) => Self::Offset(offset.rotated_cw()),
            Self::Keyword(keyword) => Self::Keyword(keyword.rotated_cw()),
        }
    }
}

/// The effect a direction applies to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum DirectionValue {
    /// Adds this many enchant levels.
    Amount(i32),
    /// Lifts the placement constraints of the target.
    Unlock,
}

impl DirectionValue {
    /// Returns the score weight of this value: the amount itself, or 1 for
    /// [`DirectionValue::Unlock`].
    #[must_use]
    pub const fn weight(self) -> i32 {
        match self {
            Self::Amount(amount) => amount,
            Self::Unlock => 1,
        }
    }
}

/// A single normalized tablet direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Where the effect lands.
    pub target: Target,
    /// What the effect does.
    pub value: DirectionValue,
}

impl Direction {
    /// Builds a direction, normalizing linear keys into offsets.
    #[must_use]
    pub fn new(key: DirectionKey, value: DirectionValue) -> Self {
        Self {
            target: key.into(),
            value,
        }
    }

    /// Returns this direction turned by `rotation`.
    #[must_use]
    pub fn rotated(self, rotation: Rotation) -> Self {
        let mut target = self.target;
        for _ in 0..rotation.quarter_turns() {
            target = target.rotated_cw();
        }
        Self { target, ..self }
    }
}

/// Returns `directions` turned by `rotation`, in the same order.
///
/// Always pass the canonical (unrotated) list; results of earlier calls are
/// not meant to be rotated again.
///
/// # Examples
///
/// ```
/// use sephiria_core::{Direction, DirectionKey, DirectionValue, Keyword, Rotation, rotated_directions};
///
/// let row = [Direction::new(DirectionKey::Keyword(Keyword::Row), DirectionValue::Amount(1))];
/// let col = rotated_directions(&row, Rotation::R90);
/// assert_eq!(col[0].target, sephiria_core::Target::Keyword(Keyword::Col));
/// ```
#[must_use]
pub fn rotated_directions(directions: &[Direction], rotation: Rotation) -> Vec<Direction> {
    directions.iter().map(|d| d.rotated(rotation)).collect()
}
