use crate::cell::{Cell, CellPos, Role};

/// Square R×R grid of cells
#[derive(Clone, Debug)]
pub struct Grid {
    pub rows: usize,
    /// Pixel size of one cell: pixel width / rows (remainder pixels are never drawn)
    pub cell_size: u32,
    cells: Vec<Cell>,
    /// Revision number - incremented whenever any cell role changes
    pub revision: u64,
    /// Incremented whenever a cell becomes or stops being a barrier
    barrier_revision: u64,
    /// Barrier revision seen by the last neighbor recompute
    neighbors_revision: Option<u64>,
}

impl Grid {
    /// Create a rows×rows grid of empty cells with no neighbors computed
    pub fn build(rows: usize, pixel_width: u32) -> Self {
        let cell_size = if rows == 0 { 0 } else { pixel_width / rows as u32 };
        let mut cells = Vec::with_capacity(rows * rows);
        for row in 0..rows {
            for col in 0..rows {
                cells.push(Cell::new(row, col));
            }
        }
        Grid {
            rows,
            cell_size,
            cells,
            revision: 0,
            barrier_revision: 0,
            neighbors_revision: None,
        }
    }

    /// Create a grid with specific barrier cells
    pub fn with_barriers(rows: usize, pixel_width: u32, barriers: &[CellPos]) -> Self {
        let mut grid = Self::build(rows, pixel_width);
        for &pos in barriers {
            if grid.contains(pos) {
                grid.set_role(pos, Role::Barrier);
            }
        }
        grid
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.rows
    }

    fn index(&self, pos: CellPos) -> usize {
        pos.row * self.rows + pos.col
    }

    /// Cell at `pos`. Panics when `pos` is outside the grid.
    pub fn cell(&self, pos: CellPos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        if self.contains(pos) {
            Some(self.cell(pos))
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn role(&self, pos: CellPos) -> Role {
        self.cell(pos).role()
    }

    /// Set the role of the cell at `pos`, tracking revisions
    pub fn set_role(&mut self, pos: CellPos, role: Role) {
        let idx = self.index(pos);
        let cell = &mut self.cells[idx];
        if cell.role() == role {
            return;
        }
        let was_barrier = cell.is_barrier();
        cell.set_role(role);
        self.revision += 1;
        if was_barrier != (role == Role::Barrier) {
            self.barrier_revision += 1;
        }
    }

    pub fn reset(&mut self, pos: CellPos) {
        self.set_role(pos, Role::Empty);
    }

    /// Map a pixel coordinate to the cell under it.
    /// Returns `None` outside the drawn area, including the unrendered remainder.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<CellPos> {
        if self.cell_size == 0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let pos = CellPos::new(y as usize / self.cell_size as usize, x as usize / self.cell_size as usize);
        if self.contains(pos) {
            Some(pos)
        } else {
            None
        }
    }

    /// Traversable orthogonal neighbors of `pos`, scanned down, up, right, left.
    /// The scan order fixes frontier insertion order and with it search determinism.
    pub fn scan_neighbors(&self, pos: CellPos) -> Vec<CellPos> {
        let CellPos { row, col } = pos;
        let candidates = [
            (row + 1 < self.rows).then(|| CellPos::new(row + 1, col)),
            row.checked_sub(1).map(|r| CellPos::new(r, col)),
            (col + 1 < self.rows).then(|| CellPos::new(row, col + 1)),
            col.checked_sub(1).map(|c| CellPos::new(row, c)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|&p| !self.cell(p).is_barrier())
            .collect()
    }

    /// Refresh the neighbor list of a single cell
    pub fn recompute_neighbors(&mut self, pos: CellPos) {
        let neighbors = self.scan_neighbors(pos);
        let idx = self.index(pos);
        self.cells[idx].set_neighbors(neighbors);
    }

    /// Refresh every neighbor list. Must run after barrier edits and before a search.
    pub fn recompute_all_neighbors(&mut self) {
        let lists: Vec<Vec<CellPos>> = self.cells.iter().map(|c| self.scan_neighbors(c.pos())).collect();
        for (cell, neighbors) in self.cells.iter_mut().zip(lists) {
            cell.set_neighbors(neighbors);
        }
        self.neighbors_revision = Some(self.barrier_revision);
    }

    /// True if neighbor lists reflect the current barrier layout
    pub fn neighbors_current(&self) -> bool {
        self.neighbors_revision == Some(self.barrier_revision)
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }

    /// One line per row, one character per cell (see `Role::symbol`)
    pub fn to_layout_string(&self) -> String {
        let mut result = String::with_capacity(self.rows * (self.rows + 1));
        for row in 0..self.rows {
            for col in 0..self.rows {
                result.push(self.role(CellPos::new(row, col)).symbol());
            }
            result.push('\n');
        }
        result
    }
}
