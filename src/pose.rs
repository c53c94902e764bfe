//! Candidate viewing poses: the cell-states from which an obstacle's
//! photographable face is visible.

use crate::{CellState, Grid, Obstacle};
use log::warn;

/// Cost added to a pose's selection beyond the path cost of reaching it:
/// zero for the nearest viewing depth, [SCREENSHOT_COST] for every
/// fallback (farther depth, lateral offset).
pub const SCREENSHOT_COST: i32 = 50;

/// A candidate cell-state from which an obstacle's face is visible,
/// together with the fixed cost of choosing it.
#[derive(Debug, Clone, Copy)]
pub struct ViewingPose {
    pub state: CellState,
    pub penalty: i32,
}

/// Generate the candidate viewing poses for a single obstacle.
///
/// - The primary pose sits one cell in front of the obstacle's facing side;
///   penalty zero if the grid can hold the robot there.
/// - The secondary pose sits two cells in front, penalty
///   [SCREENSHOT_COST].
/// - When the primary pose is blocked, two lateral poses (one to either
///   side of it) are also offered, same penalty.
/// - In `retry` mode, lateral poses are offered unconditionally and a
///   third, deeper pose is added, admitting lower-quality views a
///   non-retry solve would refuse.
///
/// All candidates carry `obstacle.id` as their `screenshot_id`.
#[must_use]
pub fn generate_poses(grid: &Grid, obstacle: &Obstacle, retry: bool) -> Vec<ViewingPose> {
    let mut out = Vec::with_capacity(8);
    let facing = obstacle.facing;
    let viewing_heading = facing.opposite();
    let unit = facing.unit();
    let origin = obstacle.point();

    let primary_point = origin + unit * 1;
    let primary_ok = grid.reachable_for_pose(primary_point.x, primary_point.y, obstacle.id);
    if primary_ok {
        out.push(ViewingPose {
            state: CellState::at(primary_point.x, primary_point.y, viewing_heading)
                .with_screenshot(obstacle.id),
            penalty: 0,
        });
    }

    let secondary_point = origin + unit * 2;
    if grid.reachable_for_pose(secondary_point.x, secondary_point.y, obstacle.id) {
        out.push(ViewingPose {
            state: CellState::at(secondary_point.x, secondary_point.y, viewing_heading)
                .with_screenshot(obstacle.id),
            penalty: SCREENSHOT_COST,
        });
    }

    if !primary_ok || retry {
        for lateral_heading in [viewing_heading.left(), viewing_heading.right()] {
            let lateral_point = primary_point + lateral_heading.unit();
            if grid.reachable_for_pose(lateral_point.x, lateral_point.y, obstacle.id) {
                out.push(ViewingPose {
                    state: CellState::at(lateral_point.x, lateral_point.y, viewing_heading)
                        .with_screenshot(obstacle.id),
                    penalty: SCREENSHOT_COST,
                });
            }
        }
    }

    if retry {
        let tertiary_point = origin + unit * 3;
        if grid.reachable_for_pose(tertiary_point.x, tertiary_point.y, obstacle.id) {
            out.push(ViewingPose {
                state: CellState::at(tertiary_point.x, tertiary_point.y, viewing_heading)
                    .with_screenshot(obstacle.id),
                penalty: SCREENSHOT_COST,
            });
        }
    }

    if out.is_empty() {
        warn!(
            "obstacle {} has zero viable viewing poses (facing {:?} from ({}, {}))",
            obstacle.id, facing, obstacle.x, obstacle.y
        );
    }

    out
}

/// Generate viewing poses for every obstacle. The outer index matches
/// `obstacles`; an obstacle with zero viable poses contributes an empty
/// inner list rather than being omitted.
#[must_use]
pub fn generate_all_poses(grid: &Grid, obstacles: &[Obstacle], retry: bool) -> Vec<Vec<ViewingPose>> {
    obstacles
        .iter()
        .map(|ob| generate_poses(grid, ob, retry))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Heading;

    #[test]
    fn primary_pose_faces_the_obstacle() {
        let grid = Grid::new(20, 20, vec![]).unwrap();
        let ob = Obstacle::new(5, 10, Heading::East.code(), 1).unwrap();
        let poses = generate_poses(&grid, &ob, false);
        let primary = poses[0];
        assert_eq!(primary.state.x, 6);
        assert_eq!(primary.state.y, 10);
        assert!(matches!(primary.state.heading, Heading::West));
        assert_eq!(primary.penalty, 0);
    }

    #[test]
    fn border_obstacle_falls_back_to_secondary_pose() {
        // Facing east from x=18 puts the primary one step out at x=19,
        // inside the footprint band (width-2 = 18) only up to x=18, so the
        // primary at x=19 is rejected and the secondary at x=20 is out of
        // bounds too; pick a case where only the primary is blocked.
        let grid = Grid::new(20, 20, vec![]).unwrap();
        let ob = Obstacle::new(17, 1, Heading::East.code(), 1).unwrap();
        let poses = generate_poses(&grid, &ob, false);
        assert!(poses.iter().any(|p| p.penalty == 0));
    }

    #[test]
    fn obstacle_with_no_viable_pose_yields_empty_list() {
        let grid = Grid::new(6, 6, vec![]).unwrap();
        let ob = Obstacle::new(0, 0, Heading::South.code(), 1).unwrap();
        let poses = generate_poses(&grid, &ob, false);
        assert!(poses.is_empty());
    }

    #[test]
    fn retry_mode_admits_more_candidates_than_default() {
        let grid = Grid::new(20, 20, vec![]).unwrap();
        let ob = Obstacle::new(5, 10, Heading::East.code(), 1).unwrap();
        let default_poses = generate_poses(&grid, &ob, false);
        let retry_poses = generate_poses(&grid, &ob, true);
        assert!(retry_poses.len() >= default_poses.len());
    }

    #[test]
    fn every_pose_is_tagged_with_the_obstacle_id() {
        let grid = Grid::new(20, 20, vec![]).unwrap();
        let ob = Obstacle::new(5, 10, Heading::East.code(), 7).unwrap();
        for pose in generate_poses(&grid, &ob, true) {
            assert_eq!(pose.state.screenshot_id, Some(7));
        }
    }
}
