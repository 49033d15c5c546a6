//! Core game logic module for Snake
//!
//! This module contains the player, the grid it moves on and the types they
//! share. Nothing here touches the terminal; input and audio come in through
//! traits so the logic runs headless in tests.

pub mod arena;
pub mod config;
pub mod direction;
pub mod level;
pub mod player;
pub mod state;

// Re-export commonly used types
pub use arena::Arena;
pub use config::GameConfig;
pub use direction::Direction;
pub use level::{Level, Occupant};
pub use player::{Outcome, Player, INITIAL_LENGTH};
pub use state::{CollisionType, Position, RunState, Segment};
