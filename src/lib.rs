//! snapshot_planner
//! ================
//!
//! Plans the shortest command sequence for a differential-drive robot on a
//! small discrete grid that must visit a set of obstacles, stop at a
//! viewing pose in front of each, and "photograph" it.
//!
//! The core pipeline, leaves first:
//!
//! - [grid] / [Grid] — the static arena and its footprint-aware occupancy
//!   predicates.
//! - [pose] — candidate viewing poses per obstacle.
//! - [motion] — the legal `(x, y, heading)` successor model.
//! - [pathfinding] — memoised pairwise A* over that model.
//! - [tsp] / [selector] — exact subset choice, pose selection, and visit
//!   ordering.
//! - [assembler] — stitches the winning order's segments into one state
//!   sequence.
//! - [translator] — converts that sequence into a compressed motor-command
//!   token stream.
//!
//! [solve] drives the whole pipeline from a [PlannerConfig] and a set of
//! [Obstacle]s to a [SolveOutcome].

mod assembler;
mod cell_state;
mod config;
mod error;
mod grid;
mod heading;
mod motion;
mod obstacle;
mod pathfinding;
mod point;
mod pose;
mod selector;
mod translator;
mod tsp;

pub use self::{
    cell_state::CellState,
    config::{PlannerConfig, TurnProfile},
    error::PlannerError,
    grid::Grid,
    heading::{Heading, SKIP},
    motion::{neighbors, Neighbor, ARC_PREMIUM, SAFE_COST, TURN_FACTOR},
    obstacle::Obstacle,
    pathfinding::{shortest_path, PathTables},
    point::Point,
    pose::{generate_all_poses, generate_poses, ViewingPose, SCREENSHOT_COST},
    selector::{select_and_order, SolveOutcome},
    translator::{to_motor_protocol, translate, SnapSide, Token},
    tsp::{held_karp, TspResult},
};

use log::info;

/// Run the full pipeline: generate viewing poses for every obstacle, choose
/// a subset and an order via [select_and_order], and return the result.
///
/// `retry` loosens the viewing-pose generator (§4.2): it admits lateral and
/// deeper poses unconditionally instead of only when the primary pose is
/// blocked. It does not retry any search internally; the planner is
/// otherwise a single deterministic pass.
///
/// Returns `Err` only for a malformed grid (too small to ever hold the
/// robot's footprint) or an obstacle placed out of bounds — both are
/// boundary-validation failures, not planning outcomes. A grid with no
/// feasible plan is represented in-band as an infeasible [SolveOutcome],
/// never as an `Err`.
pub fn solve(
    config: &PlannerConfig,
    robot_start: CellState,
    obstacles: Vec<Obstacle>,
    retry: bool,
) -> Result<SolveOutcome, PlannerError> {
    let grid = Grid::new(config.width, config.height, obstacles)?;
    let all_poses = generate_all_poses(&grid, grid.obstacles(), retry);

    info!(
        "solving for {} obstacle(s) from ({}, {}), retry={}",
        grid.obstacles().len(),
        robot_start.x,
        robot_start.y,
        retry
    );

    Ok(select_and_order(
        &grid,
        robot_start,
        grid.obstacles(),
        &all_poses,
        config.turn_profile,
        config.iterations,
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn end_to_end_single_obstacle_clear_field() {
        let config = PlannerConfig::default();
        let start = CellState::new(1, 1, Heading::North.code()).unwrap();
        let obstacle = Obstacle::new(5, 10, Heading::East.code(), 1).unwrap();

        let outcome = solve(&config, start, vec![obstacle], false).unwrap();
        assert!(outcome.feasible);
        assert_eq!(outcome.visited_obstacle_ids, vec![1]);

        // The primary pose, one cell east of the obstacle's East-facing
        // side, carries no penalty and is reachable: the planner has no
        // reason to fall back to the farther, penalised pose.
        let last = outcome.states.last().unwrap();
        assert_eq!((last.x, last.y), (6, 10));
        assert_eq!(last.screenshot_id, Some(1));

        let tokens = translate(&outcome.states, &[obstacle]).unwrap();
        let snaps: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t, Token::Snap { .. }))
            .collect();
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].to_string(), "SNAP1_C");
    }

    #[test]
    fn end_to_end_two_colinear_obstacles_are_visited_in_order() {
        let config = PlannerConfig::default();
        let start = CellState::new(1, 1, Heading::North.code()).unwrap();
        let near = Obstacle::new(5, 10, Heading::East.code(), 1).unwrap();
        let far = Obstacle::new(5, 15, Heading::East.code(), 2).unwrap();

        let outcome = solve(&config, start, vec![near, far], false).unwrap();
        assert!(outcome.feasible);
        assert_eq!(outcome.visited_obstacle_ids, vec![1, 2]);

        let snap_ids: Vec<u32> = outcome
            .states
            .iter()
            .filter_map(|s| s.screenshot_id)
            .collect();
        assert_eq!(snap_ids, vec![1, 2]);

        // Every non-viewing state must clear every obstacle's margin
        // outright; a viewing-pose state need only clear every margin
        // except the one belonging to the obstacle it is tagged for.
        let grid = Grid::new(config.width, config.height, vec![near, far]).unwrap();
        for state in &outcome.states[1..] {
            match state.screenshot_id {
                Some(id) => assert!(grid.reachable_for_pose(state.x, state.y, id)),
                None => assert!(grid.reachable(state.x, state.y)),
            }
        }
    }

    #[test]
    fn end_to_end_nearby_obstacle_blocks_the_primary_pose_forcing_a_penalised_pose() {
        let config = PlannerConfig::default();
        let start = CellState::new(1, 1, Heading::North.code()).unwrap();
        let obstacle = Obstacle::new(5, 10, Heading::East.code(), 1).unwrap();
        // Sits diagonally adjacent to obstacle 1's primary pose (6, 10),
        // blocking it under the one-cell margin test.
        let blocker = Obstacle::new(5, 11, Heading::North.code(), 2).unwrap();

        let outcome = solve(&config, start, vec![obstacle, blocker], false).unwrap();
        assert!(outcome.feasible);
        assert!(outcome.visited_obstacle_ids.contains(&1));
        assert!(outcome.cost >= SCREENSHOT_COST);

        let snap_state = outcome
            .states
            .iter()
            .find(|s| s.screenshot_id == Some(1))
            .expect("obstacle 1 was visited");
        // The primary (penalty-0) pose is blocked; whichever penalised
        // fallback the selector picks, it is not that pose.
        assert_ne!((snap_state.x, snap_state.y), (6, 10));
    }

    #[test]
    fn end_to_end_unreachable_obstacle_is_dropped_and_others_still_visited() {
        let config = PlannerConfig::default();
        let start = CellState::new(1, 1, Heading::North.code()).unwrap();
        let reachable_ob = Obstacle::new(5, 10, Heading::East.code(), 1).unwrap();
        // A corner obstacle with no side whose front cell lands in the
        // footprint band.
        let unreachable_ob = Obstacle::new(0, 0, Heading::South.code(), 2).unwrap();

        let outcome = solve(&config, start, vec![reachable_ob, unreachable_ob], false).unwrap();
        assert!(outcome.feasible);
        assert_eq!(outcome.visited_obstacle_ids, vec![1]);
        assert!(outcome.cost > 0);
    }

    #[test]
    fn end_to_end_all_obstacles_unreachable_yields_empty_diagnostic_plan() {
        let config = PlannerConfig::default();
        let start = CellState::new(1, 1, Heading::North.code()).unwrap();
        let obstacle = Obstacle::new(0, 0, Heading::South.code(), 1).unwrap();

        let outcome = solve(&config, start, vec![obstacle], false).unwrap();
        assert!(!outcome.feasible);
        assert_eq!(outcome.cost, 0);
        assert!(outcome.states.is_empty());
        assert!(outcome.diagnostic.is_some());
    }

    #[test]
    fn grid_too_small_is_rejected_at_the_boundary() {
        let config = PlannerConfig { width: 2, height: 2, ..PlannerConfig::default() };
        let start = CellState::new(1, 1, Heading::North.code()).unwrap();
        assert!(solve(&config, start, vec![], false).is_err());
    }
}
