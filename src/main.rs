use arboard::Clipboard;
use astar_visualizer::action_log::{Action, ActionLog, SearchResult};
use astar_visualizer::config::Config;
use astar_visualizer::{Board, CellPos, Role, Step};
use log::{error, info, warn};
use macroquad::prelude::*;

/// Everything drawing needs to know about the window
struct RenderContext {
    cell_size: f32,
    width: f32,
    show_grid_lines: bool,
}

/// Display color of each role
fn role_color(role: Role) -> Color {
    match role {
        Role::Empty => Color::from_rgba(255, 255, 255, 255),
        Role::Open => Color::from_rgba(0, 255, 0, 255),
        Role::Closed => Color::from_rgba(255, 0, 0, 255),
        Role::Barrier => Color::from_rgba(0, 0, 0, 255),
        Role::Start => Color::from_rgba(255, 165, 0, 255),
        Role::End => Color::from_rgba(64, 224, 208, 255),
        Role::Path => Color::from_rgba(128, 0, 128, 255),
    }
}

const GRID_LINE_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);

struct App {
    board: Board,
    render: RenderContext,
    steps_per_frame: u32,
    action_log: Option<ActionLog>,
    action_log_path: String,
}

impl App {
    fn new(config: &Config) -> Self {
        let board = Board::new(config.grid.rows, config.grid.width);
        let render = RenderContext {
            cell_size: board.grid().cell_size as f32,
            width: config.grid.width as f32,
            show_grid_lines: config.visual.show_grid_lines,
        };
        App {
            board,
            render,
            steps_per_frame: config.animation.steps_per_frame,
            action_log: config.logging.enable_action_log.then(ActionLog::new),
            action_log_path: config.logging.action_log_path.clone(),
        }
    }

    fn record(&mut self, action: Action) {
        if let Some(log) = self.action_log.as_mut() {
            log.log_instant(action);
        }
    }

    fn handle_input(&mut self) {
        let (mouse_x, mouse_y) = mouse_position();
        let hovered = self.board.grid().cell_at(mouse_x, mouse_y);

        if let Some(pos) = hovered {
            let edit = if is_mouse_button_down(MouseButton::Left) {
                Some(self.board.primary_action(pos))
            } else if is_mouse_button_down(MouseButton::Right) {
                Some(self.board.secondary_action(pos))
            } else {
                None
            };
            if let Some(action) = edit.and_then(Action::from_edit) {
                self.record(action);
            }
        }

        if is_key_pressed(KeyCode::Space) {
            self.begin_search();
        }

        if is_key_pressed(KeyCode::C) && self.board.clear() {
            self.record(Action::ClearGrid);
        }

        if is_key_pressed(KeyCode::Y) {
            self.copy_to_clipboard();
        }
    }

    fn begin_search(&mut self) {
        match self.board.begin_search() {
            Ok(()) => {
                if let Some(log) = self.action_log.as_mut() {
                    log.log_start(Action::Search);
                }
            }
            // Space while a search runs is a no-op for the user
            Err(e) => warn!("Cannot start search: {}", e),
        }
    }

    /// Run this frame's share of search steps
    fn advance(&mut self) {
        for _ in 0..self.steps_per_frame {
            let expanded = self.board.search().map_or(0, |s| s.expansion_order().len());
            match self.board.tick() {
                None => break,
                Some(Step::Finished(outcome)) => {
                    self.search_finished(SearchResult::from(&outcome), expanded);
                    break;
                }
                Some(_) => {}
            }
        }
    }

    fn cancel_search(&mut self) {
        let expanded = self.board.search().map_or(0, |s| s.expansion_order().len());
        if self.board.cancel_search() {
            self.search_finished(SearchResult::Cancelled, expanded);
        }
    }

    fn search_finished(&mut self, result: SearchResult, expanded: usize) {
        if let Some(log) = self.action_log.as_mut() {
            log.log_instant(Action::SearchFinished { result, expanded });
            log.log_finish(Action::Search);
        }
    }

    fn copy_to_clipboard(&mut self) {
        let layout = self.board.grid().to_layout_string();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(layout) {
                    error!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Grid layout copied to clipboard");
                    self.record(Action::CopyLayout);
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => error!("Failed to access clipboard: {}", e),
        }
    }

    fn draw(&self) {
        draw_board(&self.board, &self.render);
    }

    fn shutdown(&self) {
        if let Some(log) = &self.action_log {
            log.print();
            info!("{}", log.summary());
            match log.save_to_file(&self.action_log_path) {
                Ok(()) => info!("Action log saved to {}", self.action_log_path),
                Err(e) => error!("Failed to save action log: {}", e),
            }
        }
    }
}

fn draw_board(board: &Board, ctx: &RenderContext) {
    clear_background(role_color(Role::Empty));

    let grid = board.grid();
    for cell in grid.cells().filter(|c| !c.is_empty()) {
        let CellPos { row, col } = cell.pos();
        draw_rectangle(
            col as f32 * ctx.cell_size,
            row as f32 * ctx.cell_size,
            ctx.cell_size,
            ctx.cell_size,
            role_color(cell.role()),
        );
    }

    if ctx.show_grid_lines {
        for i in 0..grid.rows {
            let offset = i as f32 * ctx.cell_size;
            draw_line(0.0, offset, ctx.width, offset, 1.0, GRID_LINE_COLOR);
            draw_line(offset, 0.0, offset, ctx.width, 1.0, GRID_LINE_COLOR);
        }
    }
}

fn window_conf() -> Conf {
    let config = Config::load();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.grid.width as i32,
        window_height: config.grid.width as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::load();
    info!(
        "Starting with a {0}x{0} grid, {1}px wide",
        config.grid.rows, config.grid.width
    );
    info!("Left: start/end/barrier  Right: erase  Space: search  C: clear  Y: copy layout  Esc: cancel/quit");

    let mut app = App::new(&config);

    // Closing the window cancels a running search before exit
    prevent_quit();

    loop {
        if is_quit_requested() {
            app.cancel_search();
            break;
        }

        if is_key_pressed(KeyCode::Escape) {
            if app.board.is_searching() {
                app.cancel_search();
            } else {
                break;
            }
        }

        app.handle_input();
        app.advance();
        app.draw();

        next_frame().await
    }

    app.shutdown();
}
