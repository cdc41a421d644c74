#![allow(dead_code)]

use astar_visualizer::{CellPos, Grid, Role};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};

/// Pixel width used for every test grid; only the row count matters to the search
pub const TEST_WIDTH: u32 = 800;

/// Parse a layout in the grid's own text format
/// Format:
/// - S: start
/// - E: end
/// - #: barrier
/// - .: empty cell
pub fn parse_layout(layout: &str) -> (Grid, Option<CellPos>, Option<CellPos>) {
    let lines: Vec<&str> = layout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let rows = lines.len();
    assert!(
        lines.iter().all(|line| line.chars().count() == rows),
        "layout must be square"
    );

    let mut grid = Grid::build(rows, TEST_WIDTH);
    let mut start = None;
    let mut end = None;

    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let pos = CellPos::new(row, col);
            match ch {
                'S' => {
                    grid.set_role(pos, Role::Start);
                    start = Some(pos);
                }
                'E' => {
                    grid.set_role(pos, Role::End);
                    end = Some(pos);
                }
                '#' => grid.set_role(pos, Role::Barrier),
                '.' => {}
                other => panic!("unexpected layout character {:?}", other),
            }
        }
    }

    (grid, start, end)
}

/// Place Start/End on a grid and make its neighbor lists current
pub fn prepare(grid: &mut Grid, start: CellPos, end: CellPos) {
    grid.set_role(start, Role::Start);
    grid.set_role(end, Role::End);
    grid.recompute_all_neighbors();
}

/// Shortest step count by breadth-first search over non-barrier cells
pub fn bfs_distance(grid: &Grid, start: CellPos, end: CellPos) -> Option<usize> {
    reachable_with_distance(grid, start)
        .into_iter()
        .find(|&(pos, _)| pos == end)
        .map(|(_, dist)| dist)
}

/// Every cell reachable from `start`, start included
pub fn component(grid: &Grid, start: CellPos) -> HashSet<CellPos> {
    reachable_with_distance(grid, start)
        .into_iter()
        .map(|(pos, _)| pos)
        .collect()
}

fn reachable_with_distance(grid: &Grid, start: CellPos) -> Vec<(CellPos, usize)> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0)]);
    let mut out = Vec::new();

    while let Some((pos, dist)) = queue.pop_front() {
        out.push((pos, dist));
        for next in grid.scan_neighbors(pos) {
            if seen.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }
    out
}

/// Random grid with roughly `density` of its cells as barriers, plus two distinct
/// free endpoints. Same seed, same grid.
pub fn random_grid(seed: u64, rows: usize, density: f64) -> (Grid, CellPos, CellPos) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::build(rows, TEST_WIDTH);
    for row in 0..rows {
        for col in 0..rows {
            if rng.gen_bool(density) {
                grid.set_role(CellPos::new(row, col), Role::Barrier);
            }
        }
    }

    let mut pick = |grid: &mut Grid| {
        let pos = CellPos::new(rng.gen_range(0..rows), rng.gen_range(0..rows));
        grid.reset(pos);
        pos
    };
    let start = pick(&mut grid);
    let mut end = pick(&mut grid);
    while end == start {
        end = pick(&mut grid);
    }
    (grid, start, end)
}
