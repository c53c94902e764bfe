//! Visit Selector & TSP Ordering: chooses one viewing pose per obstacle and
//! the order to visit them in, by exact search over subsets and pose
//! combinations, scored with [crate::tsp::held_karp] on the pairwise-cost
//! matrix [crate::pathfinding::PathTables] fills in.

use crate::tsp::{held_karp, SENTINEL};
use crate::{CellState, Grid, Obstacle, PathTables, TurnProfile, ViewingPose};
use fxhash::FxHashMap;
use log::{debug, info, warn};

/// The result of a solve: either a feasible plan (`feasible = true`, a
/// non-empty `states` sequence starting at the robot's start state) or an
/// empty, zero-cost outcome carrying a human-readable `diagnostic` (see
/// §4.8/§7 kinds 1-2 of the design: infeasible input is not an error).
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub states: Vec<CellState>,
    pub cost: i32,
    pub visited_obstacle_ids: Vec<u32>,
    pub feasible: bool,
    pub diagnostic: Option<String>,
}

impl SolveOutcome {
    fn empty(diagnostic: impl Into<String>) -> Self {
        Self {
            states: vec![],
            cost: 0,
            visited_obstacle_ids: vec![],
            feasible: false,
            diagnostic: Some(diagnostic.into()),
        }
    }

    fn start_only(start: CellState, diagnostic: Option<String>) -> Self {
        Self {
            states: vec![start],
            cost: 0,
            visited_obstacle_ids: vec![],
            feasible: true,
            diagnostic,
        }
    }
}

/// Choose a subset of obstacles, one viewing pose per chosen obstacle, and a
/// visit order, minimising total cost (path cost plus pose penalties).
///
/// Subsets are tried in decreasing popcount order (largest first); the first
/// subset that yields a feasible combination wins (see DESIGN.md for why
/// this is the documented behaviour, not a premature exit).
#[must_use]
pub fn select_and_order(
    grid: &Grid,
    start: CellState,
    obstacles: &[Obstacle],
    all_poses: &[Vec<ViewingPose>],
    turn_profile: TurnProfile,
    iterations: usize,
) -> SolveOutcome {
    let k = obstacles.len();
    if k == 0 {
        return SolveOutcome::start_only(start, None);
    }

    let reachable: Vec<usize> = (0..k).filter(|&i| !all_poses[i].is_empty()).collect();
    if reachable.len() < k {
        warn!(
            "{} of {} obstacles have zero viable viewing poses and will be skipped",
            k - reachable.len(),
            k
        );
    }
    if reachable.is_empty() {
        return SolveOutcome::empty("no obstacle has a viable viewing pose");
    }

    let full_popcount = reachable.len();

    for subset in subsets_by_decreasing_popcount(&reachable) {
        if subset.is_empty() {
            debug!("no non-trivial subset of obstacles admits a feasible plan");
            return SolveOutcome::empty("no feasible subset visits any obstacle");
        }

        if subset.len() < full_popcount {
            warn!(
                "falling back to a subset of {} of {} reachable obstacles",
                subset.len(),
                full_popcount
            );
        }

        match try_subset(grid, start, obstacles, all_poses, &subset, turn_profile, iterations) {
            Some(outcome) => {
                debug!("subset {:?} is feasible with cost {}", subset, outcome.cost);
                info!(
                    "feasible plan found: cost={} obstacles_visited={}",
                    outcome.cost,
                    outcome.visited_obstacle_ids.len()
                );
                return outcome;
            }
            None => debug!("subset {:?} is infeasible", subset),
        }
    }

    SolveOutcome::empty("no subset of obstacles admits a feasible plan")
}

/// All subsets of `indices`, each itself a `Vec<usize>` of obstacle indices,
/// ordered by descending popcount (ties broken by ascending bitmask, for a
/// deterministic order).
fn subsets_by_decreasing_popcount(indices: &[usize]) -> Vec<Vec<usize>> {
    let n = indices.len();
    let mut masks: Vec<u32> = (0u32..(1u32 << n)).collect();
    masks.sort_by(|a, b| b.count_ones().cmp(&a.count_ones()).then(a.cmp(b)));
    masks
        .into_iter()
        .map(|mask| (0..n).filter(|i| mask & (1 << i) != 0).map(|i| indices[i]).collect())
        .collect()
}

/// Enumerate the mixed-radix counter over `option_counts` (one digit per
/// obstacle in the subset, ranging over its candidate pose indices), capped
/// at `cap` combinations.
fn cartesian_indices(option_counts: &[usize], cap: usize) -> Vec<Vec<usize>> {
    if option_counts.is_empty() || option_counts.iter().any(|&c| c == 0) {
        return vec![];
    }
    let mut combos = Vec::new();
    let mut current = vec![0usize; option_counts.len()];
    loop {
        combos.push(current.clone());
        if combos.len() >= cap {
            break;
        }
        let mut idx = option_counts.len();
        let mut wrapped = true;
        while idx > 0 {
            idx -= 1;
            current[idx] += 1;
            if current[idx] < option_counts[idx] {
                wrapped = false;
                break;
            }
            current[idx] = 0;
        }
        if wrapped {
            break;
        }
    }
    combos
}

fn try_subset(
    grid: &Grid,
    start: CellState,
    obstacles: &[Obstacle],
    all_poses: &[Vec<ViewingPose>],
    subset: &[usize],
    turn_profile: TurnProfile,
    iterations: usize,
) -> Option<SolveOutcome> {
    let mut flat_states = vec![start];
    // (obstacle id, flat indices of its candidate poses, their penalties)
    let mut obstacle_ranges: Vec<(u32, Vec<usize>, Vec<i32>)> = Vec::with_capacity(subset.len());

    for &oi in subset {
        let poses = &all_poses[oi];
        let lo = flat_states.len();
        for pose in poses {
            flat_states.push(pose.state);
        }
        let indices: Vec<usize> = (lo..flat_states.len()).collect();
        let penalties: Vec<i32> = poses.iter().map(|p| p.penalty).collect();
        obstacle_ranges.push((obstacles[oi].id, indices, penalties));
    }

    let tables = PathTables::compute(grid, turn_profile, &flat_states);

    let option_counts: Vec<usize> = obstacle_ranges.iter().map(|(_, idx, _)| idx.len()).collect();
    let combos = cartesian_indices(&option_counts, iterations);

    let mut best_total: i64 = i64::MAX;
    let mut best_perm: Option<Vec<usize>> = None;

    for combo in &combos {
        let chosen: Vec<usize> = combo
            .iter()
            .enumerate()
            .map(|(pos, &pick)| obstacle_ranges[pos].1[pick])
            .collect();
        let fixed_cost: i32 = combo
            .iter()
            .enumerate()
            .map(|(pos, &pick)| obstacle_ranges[pos].2[pick])
            .sum();

        let nodes: Vec<usize> = std::iter::once(0).chain(chosen.iter().copied()).collect();
        let n = nodes.len();

        let mut matrix = vec![vec![SENTINEL; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 0;
        }
        for i in 0..n {
            for j in 0..n {
                if i == j || j == 0 {
                    continue;
                }
                if let Some(c) = tables.cost(nodes[i], nodes[j]) {
                    matrix[i][j] = c as i64;
                }
            }
        }
        // Return to start is free: zero the whole first column, not just
        // the diagonal, matching `cost_np[:, 0] = 0` in the source.
        for row in matrix.iter_mut() {
            row[0] = 0;
        }

        let Some(tsp) = held_karp(&matrix) else {
            continue;
        };
        let total = tsp.cost + fixed_cost as i64;
        if total < best_total {
            best_total = total;
            let perm: Vec<usize> = std::iter::once(0).chain(tsp.order.iter().map(|&i| nodes[i])).collect();
            best_perm = Some(perm);
        }
    }

    let perm = best_perm?;

    let obstacle_by_node: FxHashMap<usize, u32> = obstacle_ranges
        .iter()
        .flat_map(|(id, idxs, _)| idxs.iter().map(move |&i| (i, *id)))
        .collect();

    let visited_obstacle_ids: Vec<u32> = perm[1..]
        .iter()
        .map(|node| *obstacle_by_node.get(node).expect("every non-start perm node is a pose"))
        .collect();

    let states = crate::assembler::assemble(&tables, &obstacle_by_node, &perm);

    Some(SolveOutcome {
        states,
        cost: best_total as i32,
        visited_obstacle_ids,
        feasible: true,
        diagnostic: None,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Heading, PlannerConfig};

    #[test]
    fn subsets_are_ordered_by_decreasing_popcount() {
        let subsets = subsets_by_decreasing_popcount(&[0, 1, 2]);
        assert_eq!(subsets[0].len(), 3);
        assert!(subsets.windows(2).all(|w| w[0].len() >= w[1].len()));
        assert_eq!(*subsets.last().unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn cartesian_indices_respects_the_iteration_cap() {
        let combos = cartesian_indices(&[3, 3, 3], 5);
        assert_eq!(combos.len(), 5);
    }

    #[test]
    fn cartesian_indices_enumerates_everything_under_the_cap() {
        let combos = cartesian_indices(&[2, 2], 100);
        assert_eq!(combos.len(), 4);
    }

    #[test]
    fn single_obstacle_clear_field_is_visited() {
        let config = PlannerConfig::default();
        let grid = Grid::new(config.width, config.height, vec![]).unwrap();
        let obstacle = Obstacle::new(5, 10, Heading::East.code(), 1).unwrap();
        let poses = crate::pose::generate_all_poses(&grid, &[obstacle], false);
        let start = CellState::at(1, 1, Heading::North);

        let outcome = select_and_order(
            &grid,
            start,
            &[obstacle],
            &poses,
            config.turn_profile,
            config.iterations,
        );

        assert!(outcome.feasible);
        assert_eq!(outcome.visited_obstacle_ids, vec![1]);
        assert!(outcome.cost > 0);
    }

    #[test]
    fn no_obstacles_yields_a_trivial_plan_at_the_start() {
        let config = PlannerConfig::default();
        let grid = Grid::new(config.width, config.height, vec![]).unwrap();
        let start = CellState::at(1, 1, Heading::North);
        let outcome = select_and_order(&grid, start, &[], &[], config.turn_profile, config.iterations);
        assert!(outcome.feasible);
        assert_eq!(outcome.states, vec![start]);
        assert_eq!(outcome.cost, 0);
    }

    #[test]
    fn all_obstacles_unreachable_yields_empty_infeasible_outcome() {
        let grid = Grid::new(6, 6, vec![]).unwrap();
        // A 6x6 grid's footprint band is 1..=4; an obstacle sitting on a
        // corner has no side whose front cell lands inside that band.
        let obstacle = Obstacle::new(0, 0, Heading::South.code(), 1).unwrap();
        let poses = crate::pose::generate_all_poses(&grid, &[obstacle], false);
        let start = CellState::at(2, 2, Heading::North);
        let outcome = select_and_order(&grid, start, &[obstacle], &poses, TurnProfile::ThreeOne, 2000);
        assert!(!outcome.feasible);
        assert_eq!(outcome.cost, 0);
        assert!(outcome.states.is_empty());
        assert!(outcome.diagnostic.is_some());
    }
}
