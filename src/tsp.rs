//! Exact dynamic-programming TSP (Held-Karp) over a small cost matrix.
//!
//! Node `0` is the tour's anchor (the robot start); the matrix handed in is
//! expected to already have its first column zeroed by the caller so that
//! "return to start" is free, turning this into an open-tour solver without
//! changing the algorithm itself (see [crate::selector]).

/// Cost entries at or above this value are treated as "no edge" by the
/// selector; a tour whose optimum still includes one is infeasible.
pub const SENTINEL: i64 = 1_000_000_000;

/// The outcome of an exact Held-Karp solve: the tour's cost and the visiting
/// order of every node but `0` (which is implicit at both ends of the open
/// tour).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TspResult {
    pub cost: i64,
    pub order: Vec<usize>,
}

/// Solve the open-tour TSP over `matrix` exactly via Held-Karp. `matrix` must
/// be square; node `0` is the start/return anchor. Returns `None` if fewer
/// than 1 node is supplied, or if every tour is blocked by a missing edge.
#[must_use]
pub fn held_karp(matrix: &[Vec<i64>]) -> Option<TspResult> {
    let n = matrix.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(TspResult { cost: 0, order: vec![] });
    }

    let m = n - 1; // nodes 1..=n-1, reindexed 0..m for bitmask use
    let full: usize = (1 << m) - 1;

    let mut dp = vec![vec![i64::MAX / 2; m]; 1 << m];
    let mut parent = vec![vec![usize::MAX; m]; 1 << m];

    for j in 0..m {
        let mask = 1 << j;
        dp[mask][j] = matrix[0][j + 1];
    }

    for mask in 1..=full {
        for j in 0..m {
            if mask & (1 << j) == 0 {
                continue;
            }
            let current = dp[mask][j];
            if current >= i64::MAX / 2 {
                continue;
            }
            for k in 0..m {
                if mask & (1 << k) != 0 {
                    continue;
                }
                let next_mask = mask | (1 << k);
                let candidate = current + matrix[j + 1][k + 1];
                if candidate < dp[next_mask][k] {
                    dp[next_mask][k] = candidate;
                    parent[next_mask][k] = j;
                }
            }
        }
    }

    let mut best_cost = i64::MAX;
    let mut best_last = usize::MAX;
    for j in 0..m {
        let total = dp[full][j] + matrix[j + 1][0];
        if total < best_cost {
            best_cost = total;
            best_last = j;
        }
    }

    if best_last == usize::MAX || best_cost >= SENTINEL {
        return None;
    }

    let mut order = Vec::with_capacity(m);
    let mut mask = full;
    let mut j = best_last;
    loop {
        order.push(j + 1);
        let prev = parent[mask][j];
        if prev == usize::MAX {
            break;
        }
        mask &= !(1 << j);
        j = prev;
    }
    order.reverse();

    Some(TspResult {
        cost: best_cost,
        order,
    })
}
