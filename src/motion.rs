//! The motion model: legal successor states from `(x, y, heading)`.

use crate::{CellState, Grid, Heading, TurnProfile};

/// Additive cost when a candidate cell sits dangerously close to an
/// obstacle on the diagonal (see [safe_cost]).
pub const SAFE_COST: i32 = 1000;

/// The multiplier applied to [Heading::rotation_cost] when computing a
/// transition's cost.
pub const TURN_FACTOR: i32 = 1;

/// Additive premium that makes an arc turn strictly more expensive than
/// the straight moves it could be confused with. Undocumented in the
/// original source; kept here as a bare constant rather than derived from
/// any other parameter (see DESIGN.md).
pub const ARC_PREMIUM: i32 = 10;

/// A legal successor state together with the cost of the transition that
/// produces it.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub state: CellState,
    pub cost: i32,
}

/// The two geometric arc displacements (forward-arc, reverse-arc) for a
/// `(from, to)` heading pair, expressed in `(bigger, smaller)` units. A
/// new turn-radius profile is a new table, never new control flow.
fn turn_displacements(from: Heading, to: Heading, bigger: i32, smaller: i32) -> Option<[(i32, i32); 2]> {
    use Heading::*;
    match (from, to) {
        (North, East) => Some([(bigger, smaller), (-smaller, -bigger)]),
        (East, North) => Some([(smaller, bigger), (-bigger, -smaller)]),
        (East, South) => Some([(smaller, -bigger), (-bigger, smaller)]),
        (South, East) => Some([(bigger, -smaller), (-smaller, bigger)]),
        (South, West) => Some([(-bigger, -smaller), (smaller, bigger)]),
        (West, South) => Some([(-smaller, -bigger), (bigger, smaller)]),
        (West, North) => Some([(-smaller, bigger), (bigger, -smaller)]),
        (North, West) => Some([(smaller, -bigger), (-bigger, smaller)]),
        _ => None,
    }
}

/// The safety penalty for occupying `(x, y)`: [SAFE_COST] if an obstacle
/// lies diagonally close enough that the robot's footprint would brush it
/// mid-arc (Chebyshev offset of `(2,2)`, `(1,2)`, or `(2,1)`), else zero.
#[must_use]
pub fn safe_cost(grid: &Grid, x: i32, y: i32) -> i32 {
    let dangerous = grid.obstacles().iter().any(|ob| {
        let dx = (ob.x - x).abs();
        let dy = (ob.y - y).abs();
        matches!((dx, dy), (2, 2) | (1, 2) | (2, 1))
    });
    if dangerous {
        SAFE_COST
    } else {
        0
    }
}

/// Enumerate every legal successor of `state`: the two straight moves
/// (forward and reverse) and, for each heading 90 degrees away, the two
/// arc-turn displacements the [TurnProfile] allows. A 180 degree change of
/// heading is never produced.
///
/// `ignore_id`, when set, relaxes every reachability test in this call to
/// ignore that obstacle's margin, the same relaxation
/// [crate::grid::Grid::reachable_for_pose] grants the viewing-pose
/// generator. A search whose goal is a viewing pose for obstacle `N` passes
/// `Some(N)` here so the pose's own cell — necessarily inside obstacle
/// `N`'s one-cell margin by construction — is a reachable neighbor rather
/// than a dead end.
#[must_use]
pub fn neighbors(
    grid: &Grid,
    state: CellState,
    turn_profile: TurnProfile,
    ignore_id: Option<u32>,
) -> Vec<Neighbor> {
    let mut out = Vec::with_capacity(6);
    let h = state.heading;
    let unit = h.unit();

    for sign in [1, -1] {
        let nx = state.x + unit.x * sign;
        let ny = state.y + unit.y * sign;
        let ok = match ignore_id {
            Some(id) => grid.reachable_for_pose(nx, ny, id),
            None => grid.reachable(nx, ny),
        };
        if ok {
            let cost = 1 + safe_cost(grid, nx, ny);
            out.push(Neighbor {
                state: CellState::at(nx, ny, h),
                cost,
            });
        }
    }

    let (bigger, smaller) = turn_profile.displacements();
    let pre_turn_ok = match ignore_id {
        Some(id) => grid.reachable_turn_for_pose(state.x, state.y, id),
        None => grid.reachable_pre_turn(state.x, state.y),
    };
    if !pre_turn_ok {
        return out;
    }
    for h2 in Heading::ALL {
        if Heading::rotation_cost(h, h2) != 2 {
            continue;
        }
        let Some(displacements) = turn_displacements(h, h2, bigger, smaller) else {
            continue;
        };
        for (dx, dy) in displacements {
            let nx = state.x + dx;
            let ny = state.y + dy;
            let ok = match ignore_id {
                Some(id) => grid.reachable_turn_for_pose(nx, ny, id),
                None => grid.reachable_turn(nx, ny),
            };
            if ok {
                let cost =
                    Heading::rotation_cost(h2, h) * TURN_FACTOR + 1 + safe_cost(grid, nx, ny) + ARC_PREMIUM;
                out.push(Neighbor {
                    state: CellState::at(nx, ny, h2),
                    cost,
                });
            }
        }
    }

    out
}
