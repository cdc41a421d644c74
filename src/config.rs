use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Window side length in pixels; the grid is square
    #[serde(default = "default_width")]
    pub width: u32,
}

#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    /// Search steps performed per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: u32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_show_grid_lines")]
    pub show_grid_lines: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_rows() -> usize { 50 }
fn default_width() -> u32 { 800 }
fn default_steps_per_frame() -> u32 { 1 }
fn default_window_title() -> String { "A* Path finding Algorithm".to_string() }
fn default_show_grid_lines() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            width: default_width(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            show_grid_lines: default_show_grid_lines(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: false,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            animation: AnimationConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                info!("No {} found, using default configuration", path.display());
                return Config::default();
            }
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry that leaves no drawable cells
    pub fn validate(&self) -> Result<(), String> {
        if self.grid.rows == 0 {
            return Err("grid.rows must be at least 1".to_string());
        }
        if self.grid.width < self.grid.rows as u32 {
            return Err(format!(
                "grid.width ({}) must be at least grid.rows ({})",
                self.grid.width, self.grid.rows
            ));
        }
        if self.animation.steps_per_frame == 0 {
            return Err("animation.steps_per_frame must be at least 1".to_string());
        }
        Ok(())
    }
}
