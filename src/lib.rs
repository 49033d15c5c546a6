//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic: the player, the level trait and a bounded arena (game module)
//! - Keyboard input and sound effect abstractions (input, audio modules)
//! - TUI rendering with ratatui (render module)
//! - Per-session stats and the interactive game loop (metrics, modes modules)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
