mod common;

use astar_visualizer::{run, AStar, CellPos, Grid, Heuristic, InvalidSearchRequest, Manhattan, Outcome, Role};
use common::{bfs_distance, component, parse_layout, prepare, random_grid, TEST_WIDTH};
use std::ops::ControlFlow;

/// Run to completion counting callback invocations
fn run_counting(grid: &mut Grid, start: CellPos, end: CellPos) -> (Outcome, usize) {
    let mut steps = 0;
    let outcome = run(grid, start, end, Manhattan, |_| {
        steps += 1;
        ControlFlow::Continue(())
    })
    .expect("valid search request");
    (outcome, steps)
}

fn search_layout(layout: &str) -> (Grid, CellPos, CellPos, Outcome) {
    let (mut grid, start, end) = parse_layout(layout);
    let start = start.expect("layout has a start");
    let end = end.expect("layout has an end");
    grid.recompute_all_neighbors();
    let (outcome, _) = run_counting(&mut grid, start, end);
    (grid, start, end, outcome)
}

/// Path is a chain of orthogonal moves over non-barrier cells
fn assert_valid_path(grid: &Grid, path: &[CellPos], start: CellPos, end: CellPos) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    for pair in path.windows(2) {
        assert_eq!(Manhattan.estimate(pair[0], pair[1]), 1, "non-adjacent step {:?}", pair);
    }
    for &pos in path {
        assert!(!grid.cell(pos).is_barrier(), "path crosses barrier at {:?}", pos);
    }
}

#[test]
fn test_open_grid_corner_to_corner() {
    let mut grid = Grid::build(5, TEST_WIDTH);
    let start = CellPos::new(0, 0);
    let end = CellPos::new(4, 4);
    prepare(&mut grid, start, end);

    let mut search = AStar::new(&grid, start, end, Manhattan).unwrap();
    let mut steps = 0;
    let outcome = search.drive(&mut grid, |_| {
        steps += 1;
        ControlFlow::Continue(())
    });

    assert_eq!(outcome.path_len(), Some(8));
    if let Outcome::Found(path) = &outcome {
        assert_valid_path(&grid, path, start, end);
    }
    // One callback per expansion plus one per marked path cell
    assert_eq!(steps, search.expansion_order().len() + 7);
    assert_eq!(grid.cells().filter(|c| c.is_path()).count(), 7);
    assert_eq!(grid.role(start), Role::Start);
    assert_eq!(grid.role(end), Role::End);
}

#[test]
fn test_wall_forces_detour_through_bottom_row() {
    let (grid, start, end, outcome) = search_layout(
        "
        S.#.E
        ..#..
        ..#..
        ..#..
        .....
        ",
    );

    // Down 4, across 4, up 4
    assert_eq!(outcome.path_len(), Some(12));
    assert_eq!(bfs_distance(&grid, start, end), Some(12));
    let Outcome::Found(path) = outcome else {
        panic!("expected a path");
    };
    assert_valid_path(&grid, &path, start, end);
    assert!(path.contains(&CellPos::new(4, 2)));
}

#[test]
fn test_boxed_in_start_is_exhausted() {
    let (mut grid, start, end) = parse_layout(
        "
        S#.
        #..
        ..E
        ",
    );
    let (start, end) = (start.unwrap(), end.unwrap());
    grid.recompute_all_neighbors();

    let mut search = AStar::new(&grid, start, end, Manhattan).unwrap();
    let mut steps = 0;
    let outcome = search.drive(&mut grid, |_| {
        steps += 1;
        ControlFlow::Continue(())
    });

    assert_eq!(outcome, Outcome::Exhausted);
    assert_eq!(search.expansion_order(), &[start]);
    assert_eq!(steps, 1);
    assert!(grid.cells().all(|c| !c.is_open() && !c.is_closed() && !c.is_path()));
    assert_eq!(grid.to_layout_string(), "S#.\n#..\n..E\n");
}

#[test]
fn test_adjacent_start_and_end() {
    let mut grid = Grid::build(5, TEST_WIDTH);
    let start = CellPos::new(2, 2);
    let end = CellPos::new(2, 3);
    prepare(&mut grid, start, end);

    let mut search = AStar::new(&grid, start, end, Manhattan).unwrap();
    let mut steps = 0;
    let outcome = search.drive(&mut grid, |_| {
        steps += 1;
        ControlFlow::Continue(())
    });

    assert_eq!(outcome, Outcome::Found(vec![start, end]));
    assert_eq!(outcome.path_len(), Some(1));
    assert_eq!(search.expansion_order(), &[start]);
    assert_eq!(steps, 1);
    assert_eq!(grid.cells().filter(|c| c.is_path()).count(), 0);
    assert_eq!(grid.role(end), Role::End);
}

#[test]
fn test_start_equals_end() {
    let mut grid = Grid::build(4, TEST_WIDTH);
    let start = CellPos::new(1, 1);
    grid.set_role(start, Role::Start);
    grid.recompute_all_neighbors();

    let (outcome, steps) = run_counting(&mut grid, start, start);

    assert_eq!(outcome, Outcome::Found(vec![start]));
    assert_eq!(outcome.path_len(), Some(0));
    assert_eq!(steps, 0);
    assert_eq!(grid.role(start), Role::Start);
    assert!(grid.cells().filter(|c| c.pos() != start).all(|c| c.is_empty()));
}

#[test]
fn test_no_barriers_path_is_manhattan() {
    let pairs = [
        ((0, 0), (9, 9)),
        ((9, 0), (0, 9)),
        ((3, 7), (3, 1)),
        ((5, 5), (0, 5)),
        ((8, 2), (1, 6)),
    ];
    for ((r1, c1), (r2, c2)) in pairs {
        let start = CellPos::new(r1, c1);
        let end = CellPos::new(r2, c2);
        let mut grid = Grid::build(10, TEST_WIDTH);
        prepare(&mut grid, start, end);

        let (outcome, _) = run_counting(&mut grid, start, end);
        assert_eq!(
            outcome.path_len(),
            Some(Manhattan.estimate(start, end) as usize),
            "{:?} -> {:?}",
            start,
            end
        );
    }
}

#[test]
fn test_enclosed_start_explores_only_its_pocket() {
    let (grid, start, _end, outcome) = search_layout(
        "
        .......
        .#####.
        .#...#.
        .#.S.#.
        .#...#.
        .#####.
        E......
        ",
    );

    assert_eq!(outcome, Outcome::Exhausted);
    let pocket = component(&grid, start);
    assert_eq!(pocket.len(), 9);

    let touched: Vec<CellPos> = grid
        .cells()
        .filter(|c| c.is_open() || c.is_closed())
        .map(|c| c.pos())
        .collect();
    assert_eq!(touched.len(), 8);
    assert!(touched.iter().all(|pos| pocket.contains(pos)));
    // Every pocket cell but the start ends up closed
    assert!(touched.iter().all(|&pos| grid.cell(pos).is_closed()));
    assert_eq!(grid.cells().filter(|c| c.is_path()).count(), 0);
}

#[test]
fn test_identical_grids_search_identically() {
    for seed in 0..20 {
        let (mut a, start, end) = random_grid(seed, 15, 0.25);
        let (mut b, _, _) = random_grid(seed, 15, 0.25);
        prepare(&mut a, start, end);
        prepare(&mut b, start, end);

        let mut first = AStar::new(&a, start, end, Manhattan).unwrap();
        let mut second = AStar::new(&b, start, end, Manhattan).unwrap();
        let first_outcome = first.drive(&mut a, |_| ControlFlow::Continue(()));
        let second_outcome = second.drive(&mut b, |_| ControlFlow::Continue(()));

        assert_eq!(first_outcome, second_outcome, "seed {}", seed);
        assert_eq!(first.expansion_order(), second.expansion_order(), "seed {}", seed);
        assert_eq!(first.came_from(), second.came_from(), "seed {}", seed);
        assert_eq!(a.to_layout_string(), b.to_layout_string(), "seed {}", seed);
    }
}

#[test]
fn test_path_length_matches_bfs() {
    let mut found = 0;
    let mut exhausted = 0;

    for seed in 0..300 {
        let density = [0.1, 0.25, 0.35, 0.45][seed as usize % 4];
        let (mut grid, start, end) = random_grid(seed, 12, density);
        let expected = bfs_distance(&grid, start, end);
        prepare(&mut grid, start, end);

        let (outcome, _) = run_counting(&mut grid, start, end);
        assert_eq!(outcome.path_len(), expected, "seed {}\n{}", seed, grid.to_layout_string());

        match outcome {
            Outcome::Found(path) => {
                found += 1;
                assert_valid_path(&grid, &path, start, end);
                let marked = grid.cells().filter(|c| c.is_path()).count();
                assert_eq!(marked, path.len() - 2, "seed {}", seed);
            }
            Outcome::Exhausted => {
                exhausted += 1;
                assert!(grid.cells().all(|c| !c.is_path()));
                // Exploration never leaves the start's component
                let reach = component(&grid, start);
                assert!(grid
                    .cells()
                    .filter(|c| c.is_open() || c.is_closed())
                    .all(|c| reach.contains(&c.pos())));
            }
            Outcome::Cancelled => panic!("search was not cancelled"),
        }
    }

    // The seeds cover both outcomes
    assert!(found > 0 && exhausted > 0, "found {}, exhausted {}", found, exhausted);
}

#[test]
fn test_callback_break_cancels() {
    let mut grid = Grid::build(10, TEST_WIDTH);
    let start = CellPos::new(0, 0);
    let end = CellPos::new(9, 9);
    prepare(&mut grid, start, end);

    let mut calls = 0;
    let outcome = run(&mut grid, start, end, Manhattan, |_| {
        calls += 1;
        if calls == 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(calls, 3);
    assert_eq!(grid.cells().filter(|c| c.is_path()).count(), 0);
}

#[test]
fn test_callback_sees_grid_between_expansions() {
    let mut grid = Grid::build(6, TEST_WIDTH);
    let start = CellPos::new(0, 0);
    let end = CellPos::new(5, 5);
    prepare(&mut grid, start, end);

    let mut open_counts = Vec::new();
    run(&mut grid, start, end, Manhattan, |g| {
        open_counts.push(g.cells().filter(|c| c.is_open()).count());
        ControlFlow::Continue(())
    })
    .unwrap();

    // First redraw shows both neighbors of the corner start in the frontier
    assert_eq!(open_counts.first(), Some(&2));
}

#[test]
fn test_stale_neighbors_rejected() {
    let mut grid = Grid::build(5, TEST_WIDTH);
    let start = CellPos::new(0, 0);
    let end = CellPos::new(4, 4);
    prepare(&mut grid, start, end);
    grid.set_role(CellPos::new(2, 2), Role::Barrier);

    let result = run(&mut grid, start, end, Manhattan, |_| ControlFlow::Continue(()));
    assert_eq!(result, Err(InvalidSearchRequest::StaleNeighbors));
}
