use crate::cell::CellPos;

/// Estimate of the remaining cost between two cells.
///
/// Must be non-negative, zero only when `a == b`, and never overestimate the
/// true grid distance, otherwise the search loses its shortest-path guarantee.
pub trait Heuristic {
    fn estimate(&self, a: CellPos, b: CellPos) -> u32;
}

/// Manhattan distance. Admissible for unit-cost orthogonal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, a: CellPos, b: CellPos) -> u32 {
        (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as u32
    }
}
