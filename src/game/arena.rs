use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::config::GameConfig;
use super::level::{Level, Occupant};
use super::state::{Position, Segment};

/// Bounded rectangular level holding apples and the snake's footprint
pub struct Arena {
    width: usize,
    height: usize,
    apple_count: usize,
    apples: Vec<Position>,
    body: HashSet<Position>,
    shake: f32,
    shake_decay: f32,
    rng: rand::rngs::ThreadRng,
}

impl Arena {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            width: config.grid_width,
            height: config.grid_height,
            apple_count: config.apple_count,
            apples: Vec::with_capacity(config.apple_count),
            body: HashSet::new(),
            shake: 0.0,
            shake_decay: config.shake_decay,
            rng: rand::thread_rng(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn apples(&self) -> &[Position] {
        &self.apples
    }

    /// Put an apple on a specific cell, for tests that need a known layout
    #[cfg(test)]
    pub(crate) fn place_apple(&mut self, pos: Position) {
        if self.is_in_bounds(pos) && !self.apples.contains(&pos) {
            self.apples.push(pos);
        }
    }

    /// Remove every apple without respawning
    pub fn clear_apples(&mut self) {
        self.apples.clear();
    }

    /// Current shake strength, 0 when still
    pub fn shake_strength(&self) -> f32 {
        self.shake
    }

    /// Let the shake wear off
    pub fn update(&mut self, dt: f32) {
        self.shake = (self.shake - self.shake_decay * dt).max(0.0);
    }

    /// Random screen offset for the current shake, in cells
    pub fn jitter(&mut self) -> (i32, i32) {
        let reach = self.shake.round() as i32;
        if reach == 0 {
            return (0, 0);
        }
        (
            self.rng.gen_range(-reach..=reach),
            self.rng.gen_range(-reach..=reach) / 2,
        )
    }

    /// Top the apples back up to the configured count on free cells
    fn refill_apples(&mut self) {
        let missing = self.apple_count.saturating_sub(self.apples.len());
        if missing == 0 {
            return;
        }

        let free: Vec<Position> = (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.body.contains(pos) && !self.apples.contains(pos))
            .collect();

        let spawned: Vec<Position> = free
            .choose_multiple(&mut self.rng, missing)
            .copied()
            .collect();
        tracing::debug!(count = spawned.len(), "spawned apples");
        self.apples.extend(spawned);
    }
}

impl Level for Arena {
    fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    fn occupant_at(&self, pos: Position) -> Occupant {
        if self.body.contains(&pos) {
            Occupant::Body
        } else if self.apples.contains(&pos) {
            Occupant::Edible
        } else {
            Occupant::Empty
        }
    }

    fn consume(&mut self, pos: Position) {
        self.apples.retain(|apple| *apple != pos);
    }

    fn shake(&mut self, intensity: f32) {
        self.shake = self.shake.max(intensity);
    }

    fn place_body(&mut self, body: &[Segment]) {
        self.body.clear();
        self.body.extend(body.iter().map(|segment| segment.pos));
        // A respawned body can land on apples left from the previous life
        let body = &self.body;
        self.apples.retain(|apple| !body.contains(apple));
        self.refill_apples();
    }
}
