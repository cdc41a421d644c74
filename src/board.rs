use log::{debug, info};

use crate::cell::{CellPos, Role};
use crate::error::InvalidSearchRequest;
use crate::grid::Grid;
use crate::heuristic::Manhattan;
use crate::search::{AStar, Outcome, Step};

/// What a pointer action did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    PlacedStart(CellPos),
    PlacedEnd(CellPos),
    PlacedBarrier(CellPos),
    /// Cell reset to Empty; carries the role it had
    Erased(CellPos, Role),
    Ignored,
}

/// Editing and search state behind the window: the grid, the Start/End
/// designations and the running search, if any.
pub struct Board {
    grid: Grid,
    pixel_width: u32,
    start: Option<CellPos>,
    end: Option<CellPos>,
    search: Option<AStar<Manhattan>>,
    last_outcome: Option<Outcome>,
}

impl Board {
    pub fn new(rows: usize, pixel_width: u32) -> Self {
        Board {
            grid: Grid::build(rows, pixel_width),
            pixel_width,
            start: None,
            end: None,
            search: None,
            last_outcome: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<CellPos> {
        self.start
    }

    pub fn end(&self) -> Option<CellPos> {
        self.end
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Outcome of the most recent search that ran to an end or was cancelled
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// The running search, for inspection
    pub fn search(&self) -> Option<&AStar<Manhattan>> {
        self.search.as_ref()
    }

    /// Left click: place Start, then End, then barriers
    pub fn primary_action(&mut self, pos: CellPos) -> Edit {
        if self.is_searching() || !self.grid.contains(pos) {
            return Edit::Ignored;
        }

        if self.start.is_none() && self.end != Some(pos) {
            self.grid.set_role(pos, Role::Start);
            self.start = Some(pos);
            Edit::PlacedStart(pos)
        } else if self.end.is_none() && self.start != Some(pos) {
            self.grid.set_role(pos, Role::End);
            self.end = Some(pos);
            Edit::PlacedEnd(pos)
        } else if self.start != Some(pos) && self.end != Some(pos) && !self.grid.cell(pos).is_barrier() {
            self.grid.set_role(pos, Role::Barrier);
            Edit::PlacedBarrier(pos)
        } else {
            Edit::Ignored
        }
    }

    /// Right click: reset a non-empty cell, dropping Start/End designation
    pub fn secondary_action(&mut self, pos: CellPos) -> Edit {
        if self.is_searching() || !self.grid.contains(pos) {
            return Edit::Ignored;
        }

        let role = self.grid.role(pos);
        if role == Role::Empty {
            return Edit::Ignored;
        }
        self.grid.reset(pos);
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
        Edit::Erased(pos, role)
    }

    /// Start a search between the placed Start and End cells
    pub fn begin_search(&mut self) -> Result<(), InvalidSearchRequest> {
        if self.is_searching() {
            return Err(InvalidSearchRequest::AlreadyRunning);
        }
        let start = self.start.ok_or(InvalidSearchRequest::MissingStart)?;
        let end = self.end.ok_or(InvalidSearchRequest::MissingEnd)?;

        self.clear_search_marks();
        self.grid.recompute_all_neighbors();
        self.search = Some(AStar::new(&self.grid, start, end, Manhattan)?);
        self.last_outcome = None;
        info!(
            "Search started: ({},{}) -> ({},{})",
            start.row, start.col, end.row, end.col
        );
        Ok(())
    }

    /// Advance the running search by one step. `None` when no search runs.
    pub fn tick(&mut self) -> Option<Step> {
        let search = self.search.as_mut()?;
        let step = search.step(&mut self.grid);
        if let Step::Finished(outcome) = &step {
            self.finish_search(outcome.clone());
        }
        Some(step)
    }

    pub fn cancel_search(&mut self) -> bool {
        let Some(search) = self.search.as_mut() else {
            return false;
        };
        search.cancel();
        self.finish_search(Outcome::Cancelled);
        true
    }

    /// Rebuild the grid empty and forget Start/End. No-op while searching.
    pub fn clear(&mut self) -> bool {
        if self.is_searching() {
            return false;
        }
        self.grid = Grid::build(self.grid.rows, self.pixel_width);
        self.start = None;
        self.end = None;
        self.last_outcome = None;
        debug!("Grid cleared");
        true
    }

    fn finish_search(&mut self, outcome: Outcome) {
        match &outcome {
            Outcome::Found(path) => info!("Path found: {} steps", path.len().saturating_sub(1)),
            Outcome::Exhausted => info!("No path exists"),
            Outcome::Cancelled => info!("Search cancelled"),
        }
        self.search = None;
        self.last_outcome = Some(outcome);
    }

    // Marks from a previous run would otherwise mix with the new frontier
    fn clear_search_marks(&mut self) {
        let marked: Vec<CellPos> = self
            .grid
            .cells()
            .filter(|c| c.is_open() || c.is_closed() || c.is_path())
            .map(|c| c.pos())
            .collect();
        for pos in marked {
            self.grid.reset(pos);
        }
    }
}
