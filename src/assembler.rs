//! Plan Assembler: stitches the winning TSP permutation's per-segment paths
//! into a single emitted state sequence, tagging the terminal state of each
//! segment with the obstacle photographed there.

use crate::{CellState, PathTables};
use fxhash::FxHashMap;

/// Concatenate `tables.path(perm[i], perm[i+1])` for every consecutive pair
/// in `perm`, skipping the duplicated anchor state at each join. The first
/// element of `perm` is the plan's start (emitted with no screenshot tag);
/// every other element is tagged with the obstacle id `obstacle_by_node`
/// gives it, if any.
///
/// Panics if `perm` references an edge `tables` has no path for; the
/// selector only ever builds `perm` from edges it already confirmed were
/// feasible, so this would indicate an internal inconsistency rather than a
/// planning failure.
#[must_use]
pub fn assemble(
    tables: &PathTables,
    obstacle_by_node: &FxHashMap<usize, u32>,
    perm: &[usize],
) -> Vec<CellState> {
    assert!(!perm.is_empty(), "assembler requires at least the start node");

    let mut result = vec![tables.state(perm[0])];

    for pair in perm.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let segment = tables
            .path(from, to)
            .expect("selector only assembles edges it already verified are feasible");

        let mut tail: Vec<CellState> = segment[1..].to_vec();
        if let Some(last) = tail.last_mut() {
            if let Some(&id) = obstacle_by_node.get(&to) {
                *last = last.with_screenshot(id);
            }
        }
        result.extend(tail);
    }

    result
}
