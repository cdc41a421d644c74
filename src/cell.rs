use serde::{Deserialize, Serialize};

/// Logical state of a single grid cell. Exactly one role at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Empty,
    /// Discovered, waiting in the frontier
    Open,
    /// Fully expanded
    Closed,
    Barrier,
    Start,
    End,
    Path,
}

impl Role {
    /// Character used by the text layout of a grid
    pub fn symbol(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Open => 'o',
            Role::Closed => 'x',
            Role::Barrier => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Path => '*',
        }
    }
}

/// A (row, col) coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }
}

/// One grid unit: a position, a role and the cached list of traversable neighbors.
///
/// Neighbors are stored as positions, not references, so a rebuilt grid never
/// carries cycles that need tearing down.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pos: CellPos,
    role: Role,
    neighbors: Vec<CellPos>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell {
            pos: CellPos::new(row, col),
            role: Role::Empty,
            neighbors: Vec::new(),
        }
    }

    pub fn pos(&self) -> CellPos {
        self.pos
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_empty(&self) -> bool {
        self.role == Role::Empty
    }

    pub fn is_open(&self) -> bool {
        self.role == Role::Open
    }

    pub fn is_closed(&self) -> bool {
        self.role == Role::Closed
    }

    pub fn is_barrier(&self) -> bool {
        self.role == Role::Barrier
    }

    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }

    pub fn is_end(&self) -> bool {
        self.role == Role::End
    }

    pub fn is_path(&self) -> bool {
        self.role == Role::Path
    }

    /// Neighbors as of the last `Grid::recompute_all_neighbors` call
    pub fn neighbors(&self) -> &[CellPos] {
        &self.neighbors
    }

    // Any role may overwrite any other. Keeping Start/End unique is up to the caller.
    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<CellPos>) {
        self.neighbors = neighbors;
    }
}
