use std::ops::{Add, Neg, Sub};

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        *self + direction.offset()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        self.moved_by(rhs.x, rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        self.moved_by(-rhs.x, -rhs.y)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position::new(-self.x, -self.y)
    }
}

/// One cell of the snake's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pos: Position,
    /// Place in the body, 0 is the head
    pub index: usize,
}

impl Segment {
    pub fn new(pos: Position, index: usize) -> Self {
        Self { pos, index }
    }
}

/// Whether the player is moving or waiting for a restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Why a life ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}
