#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Obstacle, PlannerError};

/// Margin, in cells, added around an obstacle for the plain occupancy test.
const STRAIGHT_MARGIN: i32 = 1;
/// Margin, in cells, added around an obstacle for the mid-turn / pre-turn
/// tests. Wider than [STRAIGHT_MARGIN] because an arc sweeps a larger
/// region than the footprint occupies at rest.
const TURN_MARGIN: i32 = 2;

/// The static 20x20 (by default) arena the robot plans over, together with
/// its obstacles.
///
/// `Grid` owns no mutable state; every query it exposes is a pure function
/// of its `width`, `height`, and `obstacles`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    obstacles: Vec<Obstacle>,
}

impl Grid {
    /// Construct a grid, rejecting a size too small to ever hold the
    /// robot's 3x3 footprint, and any obstacle that falls outside its
    /// bounds.
    pub fn new(width: i32, height: i32, obstacles: Vec<Obstacle>) -> Result<Self, PlannerError> {
        if width < 3 || height < 3 {
            return Err(PlannerError::GridTooSmall { width, height });
        }
        for ob in &obstacles {
            if ob.x < 0 || ob.x >= width || ob.y < 0 || ob.y >= height {
                return Err(PlannerError::OutOfBounds {
                    x: ob.x,
                    y: ob.y,
                    width,
                    height,
                });
            }
        }
        Ok(Self {
            width,
            height,
            obstacles,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Whether `(x, y)` falls inside the band the 3x3 footprint must stay
    /// within regardless of obstacles: `1 <= x <= width-2`, `1 <= y <= height-2`.
    #[inline]
    #[must_use]
    fn in_footprint_band(&self, x: i32, y: i32) -> bool {
        x >= 1 && x <= self.width - 2 && y >= 1 && y <= self.height - 2
    }

    #[inline]
    fn clear_of_obstacles(&self, x: i32, y: i32, margin: i32, ignore_id: Option<u32>) -> bool {
        !self.obstacles.iter().any(|ob| {
            Some(ob.id) != ignore_id && (ob.x - x).abs() <= margin && (ob.y - y).abs() <= margin
        })
    }

    /// Centre-only occupancy test used during straight moves: `(x, y)` is
    /// clear of every obstacle's one-cell margin and inside the footprint
    /// band.
    #[inline]
    #[must_use]
    pub fn reachable(&self, x: i32, y: i32) -> bool {
        self.in_footprint_band(x, y) && self.clear_of_obstacles(x, y, STRAIGHT_MARGIN, None)
    }

    /// The same test as [Grid::reachable], but ignoring the margin of the
    /// obstacle identified by `ignore_id`. Used by the viewing-pose
    /// generator: a pose one cell from the obstacle it photographs is
    /// necessarily inside that obstacle's own margin, and this is the
    /// point of the pose, not a collision with it. Other obstacles'
    /// margins still apply in full.
    #[inline]
    #[must_use]
    pub fn reachable_for_pose(&self, x: i32, y: i32, ignore_id: u32) -> bool {
        self.in_footprint_band(x, y)
            && self.clear_of_obstacles(x, y, STRAIGHT_MARGIN, Some(ignore_id))
    }

    /// The stricter mid-turn occupancy test: rejects `(x, y)` if any
    /// obstacle lies within two cells in both axes, since the robot sweeps
    /// a larger region during an arc than its footprint occupies at rest.
    #[inline]
    #[must_use]
    pub fn reachable_turn(&self, x: i32, y: i32) -> bool {
        self.in_footprint_band(x, y) && self.clear_of_obstacles(x, y, TURN_MARGIN, None)
    }

    /// The pre-turn test applied to the source cell of a turn. Uses the
    /// same stricter rule as [Grid::reachable_turn].
    #[inline]
    #[must_use]
    pub fn reachable_pre_turn(&self, x: i32, y: i32) -> bool {
        self.reachable_turn(x, y)
    }

    /// The same test as [Grid::reachable_turn], but ignoring the margin of
    /// the obstacle identified by `ignore_id`. Used when an arc turn's
    /// endpoint (or pre-turn source) is itself a viewing pose for that
    /// obstacle, for the same reason [Grid::reachable_for_pose] exists.
    #[inline]
    #[must_use]
    pub fn reachable_turn_for_pose(&self, x: i32, y: i32, ignore_id: u32) -> bool {
        self.in_footprint_band(x, y) && self.clear_of_obstacles(x, y, TURN_MARGIN, Some(ignore_id))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Heading;

    fn grid_with(obstacles: Vec<Obstacle>) -> Grid {
        Grid::new(20, 20, obstacles).unwrap()
    }

    #[test]
    fn rejects_grid_too_small_for_footprint() {
        assert!(Grid::new(2, 20, vec![]).is_err());
        assert!(Grid::new(20, 2, vec![]).is_err());
    }

    #[test]
    fn rejects_obstacle_out_of_bounds() {
        let ob = Obstacle::new(25, 1, 0, 1).unwrap();
        assert!(Grid::new(20, 20, vec![ob]).is_err());
    }

    #[test]
    fn clear_field_is_reachable_within_band() {
        let grid = grid_with(vec![]);
        assert!(grid.reachable(1, 1));
        assert!(grid.reachable(18, 18));
        assert!(!grid.reachable(0, 5));
        assert!(!grid.reachable(19, 5));
    }

    #[test]
    fn straight_margin_excludes_one_cell_ring() {
        let ob = Obstacle::new(10, 10, Heading::North.code(), 1).unwrap();
        let grid = grid_with(vec![ob]);
        assert!(!grid.reachable(10, 10));
        assert!(!grid.reachable(11, 11));
        assert!(grid.reachable(12, 12));
    }

    #[test]
    fn turn_margin_is_stricter_than_straight_margin() {
        let ob = Obstacle::new(10, 10, Heading::North.code(), 1).unwrap();
        let grid = grid_with(vec![ob]);
        // Two cells away: clear for straight moves, forbidden mid-turn.
        assert!(grid.reachable(12, 10));
        assert!(!grid.reachable_turn(12, 10));
    }

    #[test]
    fn reachable_for_pose_variants_ignore_only_the_named_obstacle() {
        let ob = Obstacle::new(10, 10, Heading::North.code(), 1).unwrap();
        let other = Obstacle::new(15, 15, Heading::North.code(), 2).unwrap();
        let grid = grid_with(vec![ob, other]);

        assert!(!grid.reachable(11, 11));
        assert!(grid.reachable_for_pose(11, 11, 1));
        assert!(!grid.reachable_for_pose(11, 11, 2));

        assert!(!grid.reachable_turn(12, 10));
        assert!(grid.reachable_turn_for_pose(12, 10, 1));
        assert!(!grid.reachable_turn_for_pose(12, 10, 2));
    }
}
