use super::state::{Position, Segment};

/// What currently sits on a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// Part of the snake
    Body,
    /// Something the snake can eat
    Edible,
    Empty,
}

/// The grid the player moves on
///
/// The player never stores its level; every call that needs one borrows it
/// for the duration of the call.
pub trait Level {
    /// Whether `pos` lies on the grid
    fn is_in_bounds(&self, pos: Position) -> bool;

    /// Cell in the middle of the grid
    fn center(&self) -> Position;

    /// What occupies `pos`. Cells off the grid are [`Occupant::Empty`].
    fn occupant_at(&self, pos: Position) -> Occupant;

    /// Mark the edible at `pos` as eaten
    fn consume(&mut self, pos: Position);

    /// Start a screen shake of the given strength
    fn shake(&mut self, intensity: f32);

    /// Mirror the player's body onto the grid so occupant queries see it
    fn place_body(&mut self, body: &[Segment]);
}
