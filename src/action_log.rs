use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::board::Edit;
use crate::search::Outcome;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// How a search ended, as recorded in the log
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchResult {
    Found { steps: usize },
    Exhausted,
    Cancelled,
}

impl From<&Outcome> for SearchResult {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Found(path) => SearchResult::Found {
                steps: path.len().saturating_sub(1),
            },
            Outcome::Exhausted => SearchResult::Exhausted,
            Outcome::Cancelled => SearchResult::Cancelled,
        }
    }
}

/// User actions that change the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    PlaceStart { row: usize, col: usize },
    PlaceEnd { row: usize, col: usize },
    PlaceBarrier { row: usize, col: usize },
    EraseCell { row: usize, col: usize },
    /// Logged with Start when the search begins and with Finish when it ends
    Search,
    SearchFinished { result: SearchResult, expanded: usize },
    ClearGrid,
    CopyLayout,
}

impl Action {
    /// Log entry for a pointer edit, `None` when nothing changed
    pub fn from_edit(edit: Edit) -> Option<Self> {
        match edit {
            Edit::PlacedStart(p) => Some(Action::PlaceStart { row: p.row, col: p.col }),
            Edit::PlacedEnd(p) => Some(Action::PlaceEnd { row: p.row, col: p.col }),
            Edit::PlacedBarrier(p) => Some(Action::PlaceBarrier { row: p.row, col: p.col }),
            Edit::Erased(p, _) => Some(Action::EraseCell { row: p.row, col: p.col }),
            Edit::Ignored => None,
        }
    }
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub phase: ActionPhase,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    /// Record an instantaneous action as a start/finish pair
    pub fn log_instant(&mut self, action: Action) {
        self.log_start(action.clone());
        self.log_finish(action);
    }

    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log through the logger
    pub fn print(&self) {
        info!("=== Action Log ({} events) ===", self.actions.len());
        for (i, logged) in self.actions.iter().enumerate() {
            let phase_str = match logged.phase {
                ActionPhase::Start => "START ",
                ActionPhase::Finish => "FINISH",
            };
            info!("[{:6}ms] #{:3} {} {:?}", logged.timestamp_ms, i + 1, phase_str, logged.action);
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut barriers = 0;
        let mut erased = 0;
        let mut searches = 0;
        let mut found = 0;
        let mut exhausted = 0;
        let mut cancelled = 0;
        let mut clears = 0;

        // Only count finish events to get completed action counts
        for logged in self.actions.iter().filter(|a| a.phase == ActionPhase::Finish) {
            match &logged.action {
                Action::PlaceBarrier { .. } => barriers += 1,
                Action::EraseCell { .. } => erased += 1,
                Action::Search => searches += 1,
                Action::SearchFinished { result, .. } => match result {
                    SearchResult::Found { .. } => found += 1,
                    SearchResult::Exhausted => exhausted += 1,
                    SearchResult::Cancelled => cancelled += 1,
                },
                Action::ClearGrid => clears += 1,
                _ => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Edits: {} barriers placed, {} cells erased, {} clears\n\
             Searches: {} run ({} found, {} exhausted, {} cancelled)",
            duration,
            self.actions.len(),
            barriers,
            erased,
            clears,
            searches,
            found,
            exhausted,
            cancelled
        )
    }
}
