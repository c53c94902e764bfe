use crate::CellState;
use thiserror::Error;

/// Hard failures the planner surfaces as `Err`.
///
/// These are boundary-validation failures (rejected before any solve begins)
/// or an invariant violation inside the command translator. They are
/// distinct from the *recoverable* planning outcomes of [crate::SolveOutcome]
/// (infeasible input, no feasible subset), which are represented in-band
/// rather than as errors because they are expected results of planning over
/// a possibly-cluttered grid, not exceptional conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// A heading code outside `{0, 2, 4, 6}` was supplied at a boundary
    /// constructor (`Grid::new`, `Obstacle::new`, `CellState::new`, ...).
    #[error("invalid heading code {0}, expected one of {{0, 2, 4, 6}}")]
    InvalidHeading(u8),

    /// A coordinate supplied to a state or obstacle constructor was negative.
    #[error("coordinate ({x}, {y}) has a negative component")]
    NegativeCoordinate { x: i32, y: i32 },

    /// A coordinate fell outside `0..width`/`0..height` of the grid it was
    /// being placed on.
    #[error("coordinate ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// The grid is too small to ever hold the robot's 3x3 footprint.
    #[error("grid {width}x{height} cannot hold a 3x3 robot footprint")]
    GridTooSmall { width: i32, height: i32 },

    /// The command translator observed a transition between consecutive
    /// states that is neither a straight move nor a single 90 degree arc
    /// turn. This signals a corrupted planner invariant: the path that was
    /// handed to the translator was not produced by the motion model.
    #[error("illegal state transition from {from:?} to {to:?}")]
    IllegalTransition { from: CellState, to: CellState },
}
