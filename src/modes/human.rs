use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};

use crate::audio::Audio;
use crate::game::{Arena, GameConfig, Level, Outcome, Player};
use crate::input::{FrameInput, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game in the terminal
pub struct HumanMode {
    config: GameConfig,
    player: Player,
    arena: Arena,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    input: FrameInput,
    clock: Instant,
    should_quit: bool,
}

impl HumanMode {
    pub fn new<A: Audio + ?Sized>(config: GameConfig, audio: &mut A) -> Self {
        let mut arena = Arena::new(&config);
        let start = arena.center();
        let player = Player::new(start, &config, &mut arena, audio);

        Self {
            config,
            player,
            arena,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            input: FrameInput::new(),
            clock: Instant::now(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        tracing::info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            interval = self.config.move_interval,
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        tracing::info!(
            high_score = self.metrics.high_score,
            deaths = self.metrics.deaths,
            apples = self.metrics.apples_eaten,
            "game closed"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let frame_interval = Duration::from_secs_f64(1.0 / self.config.frame_rate as f64);
        let mut frame_timer = interval(frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Collect key presses until the next frame
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // One update and one draw per frame
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;

                    self.update_frame(dt);

                    let jitter = self.arena.jitter();
                    let time = self.clock.elapsed().as_secs_f64();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.player,
                            &self.arena,
                            jitter,
                            &self.metrics,
                            time,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Press(key) => self.input.press(key),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Run the game logic for one frame of `dt` seconds
    fn update_frame(&mut self, dt: f32) -> Outcome {
        let outcome = self.player.update(dt, &self.input, &mut self.arena);
        self.input.clear();

        self.metrics.record(outcome, self.player.score());
        self.metrics.update(self.player.is_alive());
        self.arena.update(dt);

        outcome
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::game::{Position, INITIAL_LENGTH};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), &mut Silent);
        assert!(mode.player.is_alive());
        assert_eq!(mode.player.score(), 0);
        assert_eq!(mode.player.head(), Position::new(10, 10));
        assert_eq!(mode.arena.apples().len(), 1);
    }

    #[test]
    fn test_keys_steer_next_frame() {
        let config = GameConfig::small();
        let mut mode = HumanMode::new(config.clone(), &mut Silent);
        mode.arena.clear_apples();

        mode.handle_event(key(KeyCode::Char('s')));
        let outcome = mode.update_frame(config.move_interval);

        assert!(matches!(outcome, Outcome::Moved | Outcome::Ate));
        assert_eq!(mode.player.head(), Position::new(5, 6));
        assert!(mode.input.is_empty());
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::small(), &mut Silent);
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_death_and_restart() {
        let config = GameConfig::small();
        let mut mode = HumanMode::new(config.clone(), &mut Silent);

        // Four steps reach the right edge, the fifth leaves the grid
        for _ in 0..5 {
            mode.update_frame(config.move_interval);
        }
        assert!(!mode.player.is_alive());
        assert_eq!(mode.metrics.deaths, 1);
        assert!(mode.arena.shake_strength() > 0.0);

        mode.handle_event(key(KeyCode::Char(' ')));
        let outcome = mode.update_frame(0.0);

        assert_eq!(outcome, Outcome::Restarted);
        assert!(mode.player.is_alive());
        assert_eq!(mode.player.score(), 0);
        assert_eq!(mode.player.len(), INITIAL_LENGTH);
    }
}
