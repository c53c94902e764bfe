#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Point, PlannerError};

/// Sentinel heading value for a robot whose terminal facing is left unset.
///
/// Not a valid [Heading] variant; exposed only so callers translating to/from
/// an external wire encoding can recognise it.
pub const SKIP: u8 = 8;

/// A cardinal heading of the robot, encoded the way the planner's cost
/// arithmetic wants it: `North=0, East=2, South=4, West=6`, so that two
/// headings exactly 180° apart differ by `4` and [Heading::rotation_cost]
/// is a plain `min(|a-b|, 8-|a-b|)` over those codes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// This heading's wire code: `0, 2, 4, 6`.
    #[inline]
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Heading::North => 0,
            Heading::East => 2,
            Heading::South => 4,
            Heading::West => 6,
        }
    }

    /// Parse a heading from its wire code. Half-steps and anything other
    /// than `{0, 2, 4, 6}` (including the `SKIP` sentinel) are rejected.
    #[inline]
    pub fn from_code(code: u8) -> Result<Self, PlannerError> {
        match code {
            0 => Ok(Heading::North),
            2 => Ok(Heading::East),
            4 => Ok(Heading::South),
            6 => Ok(Heading::West),
            _ => Err(PlannerError::InvalidHeading(code)),
        }
    }

    /// The unit displacement a forward step in this heading produces.
    #[inline]
    #[must_use]
    pub fn unit(&self) -> Point {
        match self {
            Heading::North => Point::new(0, 1),
            Heading::East => Point::new(1, 0),
            Heading::South => Point::new(0, -1),
            Heading::West => Point::new(-1, 0),
        }
    }

    /// The heading 180° opposite this one.
    #[inline]
    #[must_use]
    pub fn opposite(&self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
        }
    }

    /// The heading 90° to the left (counter-clockwise) of this one.
    #[inline]
    #[must_use]
    pub fn left(&self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// The heading 90° to the right (clockwise) of this one.
    #[inline]
    #[must_use]
    pub fn right(&self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// The rotation cost between two headings: `min(|a-b|, 8-|a-b|)` over
    /// their wire codes. `0` when equal, `2` for a 90° turn, `4` for 180°.
    #[inline]
    #[must_use]
    pub fn rotation_cost(a: Heading, b: Heading) -> i32 {
        let diff = (a.code() as i32 - b.code() as i32).abs();
        diff.min(8 - diff)
    }
}
