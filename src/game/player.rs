use rand::Rng;
use std::mem;

use super::{
    config::GameConfig,
    direction::Direction,
    level::{Level, Occupant},
    state::{CollisionType, Position, RunState, Segment},
};
use crate::audio::{Audio, Effect, Sound};
use crate::input::{Input, Key};

/// Body length right after a reset
pub const INITIAL_LENGTH: usize = 3;

/// What happened during one call to [`Player::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The movement timer has not expired yet, or the game is over
    Idle,
    /// The snake advanced one cell
    Moved,
    /// The snake advanced onto an edible and grew
    Ate,
    /// The snake died and the game stopped
    Died(CollisionType),
    /// A stopped game was restarted
    Restarted,
}

/// The player-controlled snake
///
/// Owns its body, its movement timer and its two sound effects. The level is
/// borrowed by every call that needs it.
pub struct Player {
    /// Body segments, with head at index 0
    body: Vec<Segment>,
    spawn: Position,
    /// Direction used by the next step
    move_dir: Direction,
    /// Direction of the last completed step
    last_move_dir: Direction,
    move_interval: f32,
    move_timer: f32,
    score: u32,
    state: RunState,
    shake_intensity: f32,
    grow_sound: Box<dyn Sound>,
    ouch_sound: Box<dyn Sound>,
    rng: rand::rngs::ThreadRng,
}

impl Player {
    /// Create a player at `start` and load its sounds
    pub fn new<L, A>(start: Position, config: &GameConfig, level: &mut L, audio: &mut A) -> Self
    where
        L: Level + ?Sized,
        A: Audio + ?Sized,
    {
        let mut player = Self {
            body: Vec::with_capacity(INITIAL_LENGTH),
            spawn: start,
            move_dir: Direction::Right,
            last_move_dir: Direction::Right,
            move_interval: config.move_interval,
            move_timer: config.move_interval,
            score: 0,
            state: RunState::Running,
            shake_intensity: config.shake_intensity,
            grow_sound: audio.load(Effect::Grow),
            ouch_sound: audio.load(Effect::Ouch),
            rng: rand::thread_rng(),
        };
        player.reset(level);
        player
    }

    /// Start a fresh life at the spawn cell
    pub fn reset<L: Level + ?Sized>(&mut self, level: &mut L) {
        self.body.clear();

        // movement
        self.move_timer = self.move_interval;
        self.move_dir = Direction::Right;
        self.last_move_dir = Direction::Right;

        // body
        self.add_segment(self.spawn);
        for _ in 1..INITIAL_LENGTH {
            self.increase_length();
        }
        level.place_body(&self.body);

        // game
        self.score = 0;
        self.state = RunState::Running;
    }

    /// Queue a direction for the next step
    ///
    /// Returns false, changing nothing, when `direction` would reverse the
    /// last step taken.
    pub fn try_set_move_dir(&mut self, direction: Direction) -> bool {
        if self.last_move_dir.is_opposite(direction) {
            return false;
        }

        self.move_dir = direction;
        true
    }

    /// Advance the player by one frame
    pub fn update<I, L>(&mut self, dt: f32, input: &I, level: &mut L) -> Outcome
    where
        I: Input + ?Sized,
        L: Level + ?Sized,
    {
        if self.state == RunState::Stopped {
            if input.is_pressed(Key::Restart) {
                self.reset(level);
                tracing::info!("game restarted");
                return Outcome::Restarted;
            }
            return Outcome::Idle;
        }

        // input
        let turns = [
            (Key::Up, Direction::Up),
            (Key::Down, Direction::Down),
            (Key::Left, Direction::Left),
            (Key::Right, Direction::Right),
        ];
        for (key, direction) in turns {
            if input.is_pressed(key) {
                self.try_set_move_dir(direction);
            }
        }

        // movement
        self.move_timer -= dt;
        if self.move_timer > 0.0 {
            return Outcome::Idle;
        }
        // Add instead of resetting so overshoot carries into the next step
        self.move_timer += self.move_interval;

        self.step(level)
    }

    fn step<L: Level + ?Sized>(&mut self, level: &mut L) -> Outcome {
        let next_pos = self.head().moved_in_direction(self.move_dir);

        if !level.is_in_bounds(next_pos) {
            return self.die(level, CollisionType::Wall);
        }

        let mut outcome = Outcome::Moved;
        match level.occupant_at(next_pos) {
            Occupant::Body => return self.die(level, CollisionType::SelfCollision),
            Occupant::Edible => {
                self.score += 1;
                level.consume(next_pos);
                self.increase_length();

                let pitch = 1.0 + self.rng.gen_range(0..=100) as f32 / 100.0 * 0.5;
                self.grow_sound.set_pitch(pitch);
                self.grow_sound.play();

                tracing::debug!(score = self.score, length = self.body.len(), "ate");
                outcome = Outcome::Ate;
            }
            Occupant::Empty => {}
        }

        // Follow the leader: each segment takes the cell of the one ahead
        let mut carry = next_pos;
        for segment in &mut self.body {
            carry = mem::replace(&mut segment.pos, carry);
        }
        level.place_body(&self.body);

        self.last_move_dir = self.move_dir;
        outcome
    }

    /// Append a segment one step behind the tail
    pub fn increase_length(&mut self) {
        let behind = self.tail() - Position::from(self.move_dir);
        self.add_segment(behind);
    }

    fn add_segment(&mut self, pos: Position) {
        let index = self.body.len();
        self.body.push(Segment::new(pos, index));
    }

    fn die<L: Level + ?Sized>(&mut self, level: &mut L, cause: CollisionType) -> Outcome {
        tracing::info!(?cause, score = self.score, length = self.body.len(), "dead");
        self.state = RunState::Stopped;

        level.shake(self.shake_intensity);

        self.ouch_sound.play();
        Outcome::Died(cause)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0].pos
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1].pos
    }

    pub fn body(&self) -> &[Segment] {
        &self.body
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false once constructed
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == RunState::Running
    }

    /// Direction the next step will take
    pub fn move_dir(&self) -> Direction {
        self.move_dir
    }

    /// Direction of the last completed step
    pub fn last_move_dir(&self) -> Direction {
        self.last_move_dir
    }

    /// Seconds left until the next step
    pub fn move_timer(&self) -> f32 {
        self.move_timer
    }
}
