use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest grid that still fits a freshly reset snake with room to turn
pub const MIN_GRID_SIZE: usize = 5;

/// Largest grid side the terminal renderer can lay out (two columns per cell
/// plus a border, in `u16` cells)
pub const MAX_GRID_SIZE: usize = (u16::MAX as usize - 2) / 2;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Seconds between movement ticks
    pub move_interval: f32,
    /// Number of apples kept on the grid
    pub apple_count: usize,
    /// Frames drawn per second
    pub frame_rate: u32,

    // Screen shake
    /// Shake strength applied when the snake dies
    pub shake_intensity: f32,
    /// How much shake wears off per second
    pub shake_decay: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            move_interval: 0.125,
            apple_count: 1,
            frame_rate: 60,
            shake_intensity: 3.0,
            shake_decay: 12.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults. The result is validated
    /// before it is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= MIN_GRID_SIZE && self.grid_height >= MIN_GRID_SIZE,
            "Grid must be at least {MIN_GRID_SIZE}x{MIN_GRID_SIZE}, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIZE && self.grid_height <= MAX_GRID_SIZE,
            "Grid must be at most {MAX_GRID_SIZE}x{MAX_GRID_SIZE}, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.move_interval > 0.0,
            "Move interval must be positive, got {}",
            self.move_interval
        );
        ensure!(self.frame_rate > 0, "Frame rate must be positive");
        ensure!(self.apple_count > 0, "At least one apple is required");
        ensure!(
            self.apple_count < self.grid_width * self.grid_height / 2,
            "Too many apples ({}) for a {}x{} grid",
            self.apple_count,
            self.grid_width,
            self.grid_height
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.apple_count, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.move_interval, GameConfig::default().move_interval);
    }

    #[test]
    fn test_validate_rejects_tiny_grid() {
        assert!(GameConfig::new(4, 10).validate().is_err());
        assert!(GameConfig::new(10, 2).validate().is_err());
        assert!(GameConfig::new(5, 5).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_huge_grid() {
        assert!(GameConfig::new(40000, 5).validate().is_err());
        assert!(GameConfig::new(5, MAX_GRID_SIZE + 1).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIZE, MIN_GRID_SIZE).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_timing() {
        let config = GameConfig {
            move_interval: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 12, "apple_count": 3 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.apple_count, 3);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 3 }}"#).unwrap();
        assert!(GameConfig::load(file.path()).is_err());

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
