#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Heading, PlannerError, Point};

/// A static obstacle on the grid: a position, the side that carries its
/// photographable symbol, and an id used to tag the viewing pose and the
/// `SNAP` token produced for it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub facing: Heading,
    pub id: u32,
}

impl Obstacle {
    /// Construct an obstacle from a raw heading code, validating both the
    /// heading and that the coordinates are non-negative.
    pub fn new(x: i32, y: i32, facing_code: u8, id: u32) -> Result<Self, PlannerError> {
        if x < 0 || y < 0 {
            return Err(PlannerError::NegativeCoordinate { x, y });
        }
        let facing = Heading::from_code(facing_code)?;
        Ok(Self { x, y, facing, id })
    }

    #[inline]
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_rejects_negative_coordinates() {
        assert!(Obstacle::new(-1, 0, 0, 1).is_err());
    }

    #[test]
    fn new_rejects_invalid_heading() {
        assert!(Obstacle::new(0, 0, 7, 1).is_err());
    }
}
