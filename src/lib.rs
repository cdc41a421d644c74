pub mod action_log;
pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod path;
pub mod search;

pub use board::{Board, Edit};
pub use cell::{Cell, CellPos, Role};
pub use error::InvalidSearchRequest;
pub use grid::Grid;
pub use heuristic::{Heuristic, Manhattan};
pub use search::{run, AStar, Outcome, Step};
