#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Heading, PlannerError, Point};
use std::hash::{Hash, Hasher};

/// A pose of the robot: `(x, y, heading)`, optionally carrying the id of the
/// obstacle photographed at this state.
///
/// Two cell-states are equal, and hash equally, iff their `(x, y, heading)`
/// triples match — `screenshot_id` is metadata carried alongside the
/// identity, not part of it (see the data model invariants).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct CellState {
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    pub screenshot_id: Option<u32>,
}

impl CellState {
    /// Construct a cell-state from a raw heading code, validating both the
    /// heading and that the coordinates are non-negative. This is the
    /// boundary constructor external callers should use.
    pub fn new(x: i32, y: i32, heading_code: u8) -> Result<Self, PlannerError> {
        if x < 0 || y < 0 {
            return Err(PlannerError::NegativeCoordinate { x, y });
        }
        let heading = Heading::from_code(heading_code)?;
        Ok(Self {
            x,
            y,
            heading,
            screenshot_id: None,
        })
    }

    /// Construct a cell-state from an already-validated [Heading]. Used
    /// internally by the motion model and A* search, which only ever
    /// produce states derived from other valid states.
    #[inline]
    #[must_use]
    pub fn at(x: i32, y: i32, heading: Heading) -> Self {
        Self {
            x,
            y,
            heading,
            screenshot_id: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Return a copy of this state tagged with `screenshot_id`.
    #[inline]
    #[must_use]
    pub fn with_screenshot(mut self, screenshot_id: u32) -> Self {
        self.screenshot_id = Some(screenshot_id);
        self
    }

    /// The `(x, y, heading code)` triple that forms this state's identity,
    /// suitable as a hash map key over the working set of a solve.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> (i32, i32, u8) {
        (self.x, self.y, self.heading.code())
    }
}

impl PartialEq for CellState {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for CellState {}

impl Hash for CellState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equality_ignores_screenshot_id() {
        let a = CellState::at(1, 2, Heading::North);
        let b = CellState::at(1, 2, Heading::North).with_screenshot(7);
        assert_eq!(a, b);
    }

    #[test]
    fn new_rejects_negative_coordinates() {
        assert!(CellState::new(-1, 0, 0).is_err());
    }

    #[test]
    fn new_rejects_invalid_heading_code() {
        assert!(CellState::new(0, 0, 3).is_err());
        assert!(CellState::new(0, 0, 8).is_err());
    }
}
