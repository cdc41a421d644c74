use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::ops::ControlFlow;

use log::{debug, trace};

use crate::cell::{CellPos, Role};
use crate::error::InvalidSearchRequest;
use crate::grid::Grid;
use crate::heuristic::{Heuristic, Manhattan};
use crate::path;

/// Score of a cell that has not been reached yet
pub const UNREACHABLE: u32 = u32::MAX;

/// Terminal result of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Shortest path, start and end included
    Found(Vec<CellPos>),
    /// Every reachable cell was expanded without meeting the end
    Exhausted,
    /// The caller asked to stop; search state was discarded
    Cancelled,
}

impl Outcome {
    /// Number of moves on the found path
    pub fn path_len(&self) -> Option<usize> {
        match self {
            Outcome::Found(path) => Some(path.len().saturating_sub(1)),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }
}

/// One unit of search work, reported so the caller can redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A cell was popped from the frontier and its neighbors relaxed
    Expanded(CellPos),
    /// A cell on the solution path was marked
    PathMarked(CellPos),
    Finished(Outcome),
}

/// Frontier entry keyed by (f score, insertion sequence).
///
/// Sequence numbers are unique, so equal scores pop in insertion order and the
/// cell itself never takes part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f_score: u32,
    sequence: u64,
    cell: CellPos,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug)]
enum Phase {
    Searching,
    /// Marking path cells one per step
    Tracing { cells: Vec<CellPos>, next: usize },
    Finished(Outcome),
}

/// Incremental A* over a `Grid`.
///
/// Each call to `step` does one expansion or one path mark, so a frame-driven
/// caller can redraw between steps. `drive` runs it to the end with a callback.
#[derive(Debug)]
pub struct AStar<H = Manhattan> {
    start: CellPos,
    end: CellPos,
    heuristic: H,
    g_score: HashMap<CellPos, u32>,
    f_score: HashMap<CellPos, u32>,
    came_from: HashMap<CellPos, CellPos>,
    frontier: BinaryHeap<FrontierEntry>,
    frontier_members: HashSet<CellPos>,
    insertion_counter: u64,
    /// Expanded on the previous step, marked Closed at the start of the next one
    pending_close: Option<CellPos>,
    expansion_order: Vec<CellPos>,
    phase: Phase,
}

impl<H: Heuristic> AStar<H> {
    /// Prepare a search. The grid's neighbor lists must be current.
    pub fn new(grid: &Grid, start: CellPos, end: CellPos, heuristic: H) -> Result<Self, InvalidSearchRequest> {
        for pos in [start, end] {
            if !grid.contains(pos) {
                return Err(InvalidSearchRequest::OutOfBounds { pos, rows: grid.rows });
            }
        }
        if !grid.neighbors_current() {
            return Err(InvalidSearchRequest::StaleNeighbors);
        }

        let start_f = heuristic.estimate(start, end);
        let mut search = AStar {
            start,
            end,
            heuristic,
            g_score: HashMap::new(),
            f_score: HashMap::new(),
            came_from: HashMap::new(),
            frontier: BinaryHeap::new(),
            frontier_members: HashSet::new(),
            insertion_counter: 1,
            pending_close: None,
            expansion_order: Vec::new(),
            phase: Phase::Searching,
        };
        search.g_score.insert(start, 0);
        search.f_score.insert(start, start_f);
        search.frontier.push(FrontierEntry {
            f_score: start_f,
            sequence: 0,
            cell: start,
        });
        search.frontier_members.insert(start);

        debug!(
            "[search] ({},{}) -> ({},{}), estimate {}",
            start.row, start.col, end.row, end.col, start_f
        );
        Ok(search)
    }

    pub fn start(&self) -> CellPos {
        self.start
    }

    pub fn end(&self) -> CellPos {
        self.end
    }

    /// Predecessor of every cell reached so far
    pub fn came_from(&self) -> &HashMap<CellPos, CellPos> {
        &self.came_from
    }

    /// Cells in the order they were expanded
    pub fn expansion_order(&self) -> &[CellPos] {
        &self.expansion_order
    }

    pub fn g_score(&self, pos: CellPos) -> u32 {
        self.g_score.get(&pos).copied().unwrap_or(UNREACHABLE)
    }

    pub fn f_score(&self, pos: CellPos) -> u32 {
        self.f_score.get(&pos).copied().unwrap_or(UNREACHABLE)
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier_members.len()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Advance by one expansion or one path mark
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        if let Phase::Finished(outcome) = &self.phase {
            return Step::Finished(outcome.clone());
        }
        if let Phase::Tracing { cells, next } = &mut self.phase {
            if let Some(&pos) = cells.get(*next) {
                *next += 1;
                grid.set_role(pos, Role::Path);
                return Step::PathMarked(pos);
            }
            // A start that is also the end keeps its Start role
            if self.end != self.start {
                grid.set_role(self.end, Role::End);
            }
            let path = self.solution_path();
            return self.finish(Outcome::Found(path));
        }
        self.expand(grid)
    }

    /// Run to completion, calling `on_step` after every expansion and path mark.
    /// `ControlFlow::Break` from the callback cancels the search.
    pub fn drive(&mut self, grid: &mut Grid, mut on_step: impl FnMut(&Grid) -> ControlFlow<()>) -> Outcome {
        loop {
            match self.step(grid) {
                Step::Finished(outcome) => return outcome,
                Step::Expanded(_) | Step::PathMarked(_) => {
                    if on_step(grid).is_break() {
                        self.cancel();
                        return Outcome::Cancelled;
                    }
                }
            }
        }
    }

    /// Stop and discard search state. No effect on a finished search.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            debug!("[search] cancelled after {} expansions", self.expansion_order.len());
            self.finish(Outcome::Cancelled);
        }
    }

    fn expand(&mut self, grid: &mut Grid) -> Step {
        if let Some(done) = self.pending_close.take() {
            grid.set_role(done, Role::Closed);
        }

        let current = loop {
            let Some(entry) = self.frontier.pop() else {
                return self.finish(Outcome::Exhausted);
            };
            // Entries whose cell already left the frontier are stale
            if self.frontier_members.remove(&entry.cell) {
                break entry.cell;
            }
        };

        if current == self.end {
            let cells: Vec<CellPos> = path::trace(&self.came_from, self.end).collect();
            self.phase = Phase::Tracing { cells, next: 0 };
            return self.step(grid);
        }

        // Unit step cost with an admissible, consistent heuristic means an expanded
        // cell already holds its best g score. Closed cells are never reopened and
        // the relaxation below never fires for them.
        let current_g = self.g_score(current);
        let tentative_g = current_g + 1;
        let neighbors = grid.cell(current).neighbors().to_vec();
        for neighbor in neighbors {
            if tentative_g >= self.g_score(neighbor) {
                continue;
            }
            let f = tentative_g + self.heuristic.estimate(neighbor, self.end);
            self.came_from.insert(neighbor, current);
            self.g_score.insert(neighbor, tentative_g);
            self.f_score.insert(neighbor, f);

            // A cell already in the frontier gets a fresh entry under its lower key.
            // The old entry goes stale and is skipped when popped.
            self.frontier.push(FrontierEntry {
                f_score: f,
                sequence: self.insertion_counter,
                cell: neighbor,
            });
            self.insertion_counter += 1;
            if self.frontier_members.insert(neighbor) {
                grid.set_role(neighbor, Role::Open);
            }
        }

        trace!(
            "[search] expanded ({},{}) g={} frontier={}",
            current.row,
            current.col,
            current_g,
            self.frontier_members.len()
        );

        self.expansion_order.push(current);
        if current != self.start {
            self.pending_close = Some(current);
        }
        Step::Expanded(current)
    }

    fn solution_path(&self) -> Vec<CellPos> {
        let mut path = vec![self.end];
        let mut current = self.end;
        while let Some(&predecessor) = self.came_from.get(&current) {
            path.push(predecessor);
            current = predecessor;
        }
        path.reverse();
        path
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        debug!(
            "[search] finished after {} expansions: {}",
            self.expansion_order.len(),
            outcome.path_len().map_or("no path".to_string(), |n| format!("{} steps", n))
        );
        self.frontier.clear();
        self.frontier_members.clear();
        self.g_score.clear();
        self.f_score.clear();
        self.pending_close = None;
        self.phase = Phase::Finished(outcome.clone());
        Step::Finished(outcome)
    }
}

/// Search `grid` from `start` to `end`, calling `on_step` after every expansion
/// and every path mark. Returning `ControlFlow::Break` cancels the search.
pub fn run<H: Heuristic>(
    grid: &mut Grid,
    start: CellPos,
    end: CellPos,
    heuristic: H,
    on_step: impl FnMut(&Grid) -> ControlFlow<()>,
) -> Result<Outcome, InvalidSearchRequest> {
    let mut search = AStar::new(grid, start, end, heuristic)?;
    Ok(search.drive(grid, on_step))
}
