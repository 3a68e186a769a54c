//! Tool configuration.
//!
//! Handles loading and validating `covergen.toml`. Configuration is a
//! single flat file: every option has a stock default, user files only
//! override the values they care about, and unknown keys are rejected to
//! catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! cache_dir = "covers"          # Rendered covers land here
//! templates_dir = "templates"   # blog-{category}.png backgrounds
//! font_path = "assets/title.ttf"
//!
//! canvas_width = 1920           # Output pixel dimensions
//! canvas_height = 1080
//!
//! font_size_px = 72             # Title font size
//! text_max_width_px = 1600      # Wrap budget for title lines
//! text_position_x = 160         # Anchor of the first line
//! text_position_y = 420
//! max_lines = 3                 # Line budget before truncation
//! line_spacing_px = 18          # Vertical gap between lines
//!
//! output_quality = 82           # Lossy WebP quality (1-100)
//!
//! # max_processes = 4           # Parallel batch workers (omit for auto)
//! ```

use crate::render::Geometry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `covergen.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverConfig {
    /// Base directory for persisted rendered covers.
    pub cache_dir: String,
    /// Base directory for category background assets.
    pub templates_dir: String,
    /// Path to the title font file.
    pub font_path: String,
    /// Output canvas width in pixels.
    pub canvas_width: u32,
    /// Output canvas height in pixels.
    pub canvas_height: u32,
    /// Title font pixel size (also the vertical advance base).
    pub font_size_px: u32,
    /// Wrap budget for title lines, in pixels.
    pub text_max_width_px: u32,
    /// Left edge of the first title line.
    pub text_position_x: u32,
    /// Top edge of the first title line.
    pub text_position_y: u32,
    /// Maximum wrapped lines before truncation.
    pub max_lines: usize,
    /// Vertical gap between wrapped lines, in pixels.
    pub line_spacing_px: u32,
    /// Lossy WebP encode quality (1-100).
    pub output_quality: u32,
    /// Maximum number of parallel batch workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            cache_dir: "covers".to_string(),
            templates_dir: "templates".to_string(),
            font_path: "assets/title.ttf".to_string(),
            canvas_width: 1920,
            canvas_height: 1080,
            font_size_px: 72,
            text_max_width_px: 1600,
            text_position_x: 160,
            text_position_y: 420,
            max_lines: 3,
            line_spacing_px: 18,
            output_quality: 82,
            max_processes: None,
        }
    }
}

impl CoverConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_quality == 0 || self.output_quality > 100 {
            return Err(ConfigError::Validation(
                "output_quality must be 1-100".into(),
            ));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Validation(
                "canvas dimensions must be non-zero".into(),
            ));
        }
        if self.max_lines == 0 {
            return Err(ConfigError::Validation("max_lines must be at least 1".into()));
        }
        if self.font_size_px == 0 {
            return Err(ConfigError::Validation("font_size_px must be non-zero".into()));
        }
        if self.text_position_x + self.text_max_width_px > self.canvas_width {
            return Err(ConfigError::Validation(
                "text box exceeds canvas width".into(),
            ));
        }
        Ok(())
    }

    /// Extract the compositor geometry from the flat options.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            text_max_width_px: self.text_max_width_px,
            text_position_x: self.text_position_x,
            text_position_y: self.text_position_y,
            max_lines: self.max_lines,
            line_spacing_px: self.line_spacing_px,
        }
    }
}

/// Resolve the effective batch thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &CoverConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load config from a `covergen.toml` path.
///
/// A missing file yields the stock defaults; a present file is parsed with
/// unknown keys rejected, then validated.
pub fn load_config(path: &Path) -> Result<CoverConfig, ConfigError> {
    let config: CoverConfig = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        CoverConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `covergen.toml` with all keys and
/// explanations. Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# covergen configuration
# ======================
# All options are optional; the values below are the stock defaults.

# Rendered covers are persisted here as {slug}-{hash}.webp files.
# The directory is the cache: a file that exists is never re-rendered.
cache_dir = "covers"

# Category backgrounds, one blog-{category}.png per category plus the
# mandatory blog-default.png fallback.
templates_dir = "templates"

# Title font (TrueType/OpenType). Missing font aborts startup.
font_path = "assets/title.ttf"

# Output canvas, in pixels. Templates with other dimensions are resized.
canvas_width = 1920
canvas_height = 1080

# Title text box. The first line is anchored at (text_position_x,
# text_position_y); each further line advances by font_size_px +
# line_spacing_px.
font_size_px = 72
text_max_width_px = 1600
text_position_x = 160
text_position_y = 420
max_lines = 3
line_spacing_px = 18

# Lossy WebP quality, 1-100.
output_quality = 82

# Parallel workers for the batch command. Omit to use all CPU cores;
# values above the core count are clamped down.
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        CoverConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("covergen.toml")).unwrap();
        assert_eq!(config.cache_dir, "covers");
        assert_eq!(config.canvas_width, 1920);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("covergen.toml");
        std::fs::write(&path, "output_quality = 60\nmax_lines = 4\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output_quality, 60);
        assert_eq!(config.max_lines, 4);
        assert_eq!(config.canvas_height, 1080);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("covergen.toml");
        std::fs::write(&path, "quality = 60\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn out_of_range_quality_fails_validation() {
        let mut config = CoverConfig::default();
        config.output_quality = 101;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_max_lines_fails_validation() {
        let mut config = CoverConfig::default();
        config.max_lines = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn text_box_wider_than_canvas_fails_validation() {
        let mut config = CoverConfig::default();
        config.text_position_x = 800;
        config.text_max_width_px = 1600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn geometry_mirrors_flat_options() {
        let config = CoverConfig::default();
        let g = config.geometry();
        assert_eq!(g.canvas_width, config.canvas_width);
        assert_eq!(g.max_lines, config.max_lines);
        assert_eq!(g.line_spacing_px, config.line_spacing_px);
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let mut config = CoverConfig::default();
        config.max_processes = Some(1);
        assert_eq!(effective_threads(&config), 1);

        config.max_processes = Some(usize::MAX);
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let parsed: CoverConfig = toml::from_str(stock_config_toml()).unwrap();
        let stock = CoverConfig::default();
        assert_eq!(parsed.cache_dir, stock.cache_dir);
        assert_eq!(parsed.output_quality, stock.output_quality);
        assert_eq!(parsed.font_size_px, stock.font_size_px);
    }
}
