use super::state::Position;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The direction pointing the exact other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Unit step as a grid offset
    pub fn offset(&self) -> Position {
        let (dx, dy) = self.delta();
        Position::new(dx, dy)
    }
}

impl From<Direction> for Position {
    fn from(direction: Direction) -> Self {
        direction.offset()
    }
}
