use std::time::{Duration, Instant};

use crate::game::Outcome;

/// Stats for one terminal session, across lives
pub struct GameMetrics {
    pub life_start: Instant,
    pub life_time: Duration,
    pub high_score: u32,
    pub deaths: u32,
    pub apples_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            life_start: Instant::now(),
            life_time: Duration::ZERO,
            high_score: 0,
            deaths: 0,
            apples_eaten: 0,
        }
    }

    /// Advance the life clock; frozen while the game is over
    pub fn update(&mut self, alive: bool) {
        if alive {
            self.life_time = self.life_start.elapsed();
        }
    }

    /// Fold a player update into the stats
    pub fn record(&mut self, outcome: Outcome, score: u32) {
        match outcome {
            Outcome::Ate => self.apples_eaten += 1,
            Outcome::Died(_) => {
                self.deaths += 1;
                self.high_score = self.high_score.max(score);
            }
            Outcome::Restarted => {
                self.life_start = Instant::now();
                self.life_time = Duration::ZERO;
            }
            Outcome::Idle | Outcome::Moved => {}
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.life_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.life_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.life_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.life_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();
        let died = Outcome::Died(CollisionType::Wall);

        metrics.record(died, 10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.deaths, 1);

        metrics.record(died, 5);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.deaths, 2);

        metrics.record(Outcome::Died(CollisionType::SelfCollision), 15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.deaths, 3);
    }

    #[test]
    fn test_apples_counted() {
        let mut metrics = GameMetrics::new();
        metrics.record(Outcome::Ate, 1);
        metrics.record(Outcome::Moved, 1);
        metrics.record(Outcome::Ate, 2);
        assert_eq!(metrics.apples_eaten, 2);
    }

    #[test]
    fn test_restart_resets_life_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update(true);
        assert!(metrics.life_time.as_millis() >= 50);

        metrics.record(Outcome::Restarted, 0);
        metrics.update(true);
        assert!(metrics.life_time.as_millis() < 50);
    }

    #[test]
    fn test_clock_frozen_when_dead() {
        let mut metrics = GameMetrics::new();
        metrics.life_time = Duration::from_secs(7);
        metrics.update(false);
        assert_eq!(metrics.life_time, Duration::from_secs(7));
    }
}
