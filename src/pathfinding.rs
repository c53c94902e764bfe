//! The pairwise path search (A*) described in the planner's design: shortest
//! cost and reconstructed path between two cell-states in the directed
//! graph [crate::motion] defines.

use crate::{CellState, Grid, Heading, TurnProfile};
use fxhash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type Identity = (i32, i32, u8);

/// A single entry on the open set: ordered by `f = g + h`, smallest first,
/// ties broken by `g` (prefer the entry already deeper into the search).
struct OpenEntry {
    f: i32,
    g: i32,
    identity: Identity,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    // BinaryHeap is a max-heap; reverse so the smallest f (and, on a tie,
    // the smallest g) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.g.cmp(&self.g))
    }
}

/// Find the least-cost path from `start` to `goal` in the state graph
/// [crate::motion::neighbors] defines, using Manhattan distance on `(x, y)`
/// as an admissible heuristic. Returns the total cost and the forward path
/// (inclusive of both endpoints), or `None` if no path exists.
///
/// When `goal` carries a `screenshot_id` (it is a viewing pose), that
/// obstacle's margin is ignored throughout the search, the same relaxation
/// [crate::pose::generate_poses] grants when generating the pose itself —
/// otherwise the goal cell, sitting inside that obstacle's own one-cell
/// margin by construction, would never appear as a neighbor and every
/// viewing pose would be unreachable.
#[must_use]
pub fn shortest_path(
    grid: &Grid,
    turn_profile: TurnProfile,
    start: CellState,
    goal: CellState,
) -> Option<(i32, Vec<CellState>)> {
    let ignore_id = goal.screenshot_id;
    let start_id = start.identity();
    let goal_id = goal.identity();

    if start_id == goal_id {
        return Some((0, vec![start]));
    }

    let mut open = BinaryHeap::new();
    let mut g_score: FxHashMap<Identity, i32> = FxHashMap::default();
    let mut came_from: FxHashMap<Identity, Identity> = FxHashMap::default();
    let mut closed: FxHashSet<Identity> = FxHashSet::default();

    g_score.insert(start_id, 0);
    open.push(OpenEntry {
        f: manhattan(start_id, goal_id),
        g: 0,
        identity: start_id,
    });

    while let Some(OpenEntry { g, identity, .. }) = open.pop() {
        if identity == goal_id {
            return Some((g, reconstruct(&came_from, identity)));
        }
        if closed.contains(&identity) {
            continue;
        }
        closed.insert(identity);

        let heading = Heading::from_code(identity.2).expect("identities only hold valid headings");
        let state = CellState::at(identity.0, identity.1, heading);

        for neighbor in crate::motion::neighbors(grid, state, turn_profile, ignore_id) {
            let next_id = neighbor.state.identity();
            if closed.contains(&next_id) {
                continue;
            }
            let tentative_g = g + neighbor.cost;
            let is_better = match g_score.get(&next_id) {
                Some(&existing) => tentative_g < existing,
                None => true,
            };
            if is_better {
                g_score.insert(next_id, tentative_g);
                came_from.insert(next_id, identity);
                open.push(OpenEntry {
                    f: tentative_g + manhattan(next_id, goal_id),
                    g: tentative_g,
                    identity: next_id,
                });
            }
        }
    }

    None
}

#[inline]
fn manhattan(a: Identity, b: Identity) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

fn reconstruct(came_from: &FxHashMap<Identity, Identity>, goal: Identity) -> Vec<CellState> {
    let mut path = vec![identity_to_state(goal)];
    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        path.push(identity_to_state(prev));
        cur = prev;
    }
    path.reverse();
    path
}

#[inline]
fn identity_to_state(identity: Identity) -> CellState {
    let heading = Heading::from_code(identity.2).expect("identities only hold valid headings");
    CellState::at(identity.0, identity.1, heading)
}

/// The memoised `cost`/`path` tables for one solver trial's working set: the
/// robot start plus every candidate viewing pose considered for that trial.
/// Populated eagerly over every unordered pair, since [crate::selector] reuses
/// the same working set across many pose combinations.
pub struct PathTables {
    states: Vec<CellState>,
    cost: FxHashMap<(usize, usize), i32>,
    path: FxHashMap<(usize, usize), Vec<CellState>>,
}

impl PathTables {
    /// Compute the pairwise cost and path tables for `states`. Symmetric
    /// entries are derived from a single A* search per unordered pair:
    /// `cost[u,v] = cost[v,u]` and `path[v,u] = reverse(path[u,v])`.
    #[must_use]
    pub fn compute(grid: &Grid, turn_profile: TurnProfile, states: &[CellState]) -> Self {
        let n = states.len();
        let mut cost = FxHashMap::default();
        let mut path = FxHashMap::default();

        for i in 0..n {
            cost.insert((i, i), 0);
            path.insert((i, i), vec![states[i]]);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if let Some((c, forward)) = shortest_path(grid, turn_profile, states[i], states[j]) {
                    let mut backward = forward.clone();
                    backward.reverse();
                    cost.insert((i, j), c);
                    cost.insert((j, i), c);
                    path.insert((i, j), forward);
                    path.insert((j, i), backward);
                }
            }
        }

        Self {
            states: states.to_vec(),
            cost,
            path,
        }
    }

    /// The minimum cost from `states[i]` to `states[j]`, or `None` if no
    /// path was found (treated as `+inf` by the selector).
    #[inline]
    #[must_use]
    pub fn cost(&self, i: usize, j: usize) -> Option<i32> {
        self.cost.get(&(i, j)).copied()
    }

    /// The reconstructed forward path from `states[i]` to `states[j]`,
    /// inclusive of both endpoints.
    #[inline]
    #[must_use]
    pub fn path(&self, i: usize, j: usize) -> Option<&[CellState]> {
        self.path.get(&(i, j)).map(Vec::as_slice)
    }

    #[inline]
    #[must_use]
    pub fn state(&self, i: usize) -> CellState {
        self.states[i]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
