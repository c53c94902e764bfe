#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::ops::{Add, Div, Mul, Neg, Sub};

/// An integer point on the planner's grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The Manhattan (L1) distance between this point and `other`.
    #[inline]
    #[must_use]
    pub fn manhattan_distance_to(&self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The Chebyshev (L-infinity) distance between this point and `other`.
    #[inline]
    #[must_use]
    pub fn chebyshev_distance_to(&self, other: Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Point {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn manhattan_distance() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 5);
        assert_eq!(a.manhattan_distance_to(b), 7);
    }

    #[test]
    fn chebyshev_distance() {
        let a = Point::new(5, 5);
        let b = Point::new(7, 6);
        assert_eq!(a.chebyshev_distance_to(b), 2);
    }
}
