use thiserror::Error;

use crate::cell::CellPos;

/// Contract violations when asking for a search. These are caller bugs, not
/// search outcomes: an unreachable goal is `Outcome::Exhausted`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSearchRequest {
    #[error("no start cell has been placed")]
    MissingStart,

    #[error("no end cell has been placed")]
    MissingEnd,

    #[error("a search is already running")]
    AlreadyRunning,

    #[error("cell ({}, {}) is outside the {rows}x{rows} grid", .pos.row, .pos.col)]
    OutOfBounds { pos: CellPos, rows: usize },

    #[error("neighbor lists are stale; recompute them after editing barriers")]
    StaleNeighbors,
}
