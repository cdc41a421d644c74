use std::collections::HashMap;

use crate::cell::{CellPos, Role};
use crate::grid::Grid;

/// Walks a predecessor map backward from the goal.
///
/// Yields the goal's predecessor first and the start's successor last. Neither
/// endpoint is yielded: the start is the only cell without a predecessor, so the
/// walk stops there.
pub struct PathTrace<'a> {
    came_from: &'a HashMap<CellPos, CellPos>,
    next: Option<CellPos>,
}

pub fn trace(came_from: &HashMap<CellPos, CellPos>, end: CellPos) -> PathTrace<'_> {
    PathTrace {
        came_from,
        next: came_from.get(&end).copied(),
    }
}

impl Iterator for PathTrace<'_> {
    type Item = CellPos;

    fn next(&mut self) -> Option<CellPos> {
        let current = self.next.take()?;
        let &predecessor = self.came_from.get(&current)?;
        self.next = Some(predecessor);
        Some(current)
    }
}

/// Mark the cells between start and end as `Path`, calling `on_step` after each
/// mark. Reads the map only, so calling it twice marks the same cells.
pub fn reconstruct(
    came_from: &HashMap<CellPos, CellPos>,
    end: CellPos,
    grid: &mut Grid,
    mut on_step: impl FnMut(&Grid),
) -> Vec<CellPos> {
    let cells: Vec<CellPos> = trace(came_from, end).collect();
    for &pos in &cells {
        grid.set_role(pos, Role::Path);
        on_step(grid);
    }
    cells
}
