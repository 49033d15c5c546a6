use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashSet;

use crate::game::{Arena, Player, Position};
use crate::metrics::GameMetrics;

const GAME_OVER_WIDTH: u16 = 36;
const GAME_OVER_HEIGHT: u16 = 7;

/// Score as shown in the HUD, always three digits
pub fn format_score(score: u32) -> String {
    format!("{:03}", score)
}

/// Brightness of the restart prompt at `time` seconds, 0..=255
pub fn pulse_alpha(time: f64) -> u8 {
    ((time * 4.0).sin().abs() * 255.0).round() as u8
}

/// A `width` x `height` rectangle in the middle of `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Terminal cells needed for a bordered grid, two columns per cell
fn grid_extent(width: usize, height: usize) -> (u16, u16) {
    let cells = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    (
        cells(width).saturating_mul(2).saturating_add(2),
        cells(height).saturating_add(2),
    )
}

/// Shift `rect` by a shake offset without leaving `bounds`
fn shaken(rect: Rect, (dx, dy): (i32, i32), bounds: Rect) -> Rect {
    let max_x = bounds.right().saturating_sub(rect.width).max(bounds.x);
    let max_y = bounds.bottom().saturating_sub(rect.height).max(bounds.y);
    Rect {
        x: (rect.x as i32 + dx).clamp(bounds.x as i32, max_x as i32) as u16,
        y: (rect.y as i32 + dy).clamp(bounds.y as i32, max_y as i32) as u16,
        ..rect
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. `jitter` is the level's shake offset and `time` the
    /// seconds since start, used to pulse the restart prompt.
    pub fn render(
        &self,
        frame: &mut Frame,
        player: &Player,
        arena: &Arena,
        jitter: (i32, i32),
        metrics: &GameMetrics,
        time: f64,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Score
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_score(player), chunks[0]);

        let grid_size = grid_extent(arena.width(), arena.height());
        let grid_area = shaken(
            centered_rect(grid_size.0, grid_size.1, chunks[1]),
            jitter,
            chunks[1],
        );
        frame.render_widget(self.render_grid(player, arena), grid_area);

        if !player.is_alive() {
            let popup = centered_rect(GAME_OVER_WIDTH, GAME_OVER_HEIGHT, frame.area());
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(time), popup);
        }

        frame.render_widget(self.render_footer(metrics), chunks[2]);
    }

    fn render_score(&self, player: &Player) -> Paragraph<'_> {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format_score(player.score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
    }

    fn render_grid(&self, player: &Player, arena: &Arena) -> Paragraph<'_> {
        let body: HashSet<Position> = player.body().iter().map(|segment| segment.pos).collect();
        let head_style = if player.is_alive() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::REVERSED)
        };

        let mut lines = Vec::with_capacity(arena.height());
        for y in 0..arena.height() as i32 {
            let mut spans = Vec::with_capacity(arena.width());

            for x in 0..arena.width() as i32 {
                let pos = Position::new(x, y);

                let cell = if pos == player.head() {
                    Span::styled("■ ", head_style)
                } else if body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if arena.apples().contains(&pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_game_over(&self, time: f64) -> Paragraph<'_> {
        let alpha = pulse_alpha(time);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press 'SPACE' to restart!",
                Style::default().fg(Color::Rgb(alpha, alpha, alpha)),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_footer(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format_score(metrics.high_score),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Deaths: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.deaths.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::game::{GameConfig, Level};
    use crate::input::FrameInput;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(player: &Player, arena: &Arena, time: f64) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, player, arena, (0, 0), &metrics, time))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn game(config: &GameConfig) -> (Player, Arena) {
        let mut arena = Arena::new(config);
        let start = arena.center();
        let player = Player::new(start, config, &mut arena, &mut Silent);
        (player, arena)
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "000");
        assert_eq!(format_score(7), "007");
        assert_eq!(format_score(42), "042");
        assert_eq!(format_score(1234), "1234");
    }

    #[test]
    fn test_pulse_alpha() {
        assert_eq!(pulse_alpha(0.0), 0);
        assert_eq!(pulse_alpha(std::f64::consts::PI / 8.0), 255);
        assert_eq!(pulse_alpha(-std::f64::consts::PI / 8.0), 255);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(centered_rect(10, 4, area), Rect::new(15, 8, 10, 4));
        assert_eq!(centered_rect(100, 100, area), area);
    }

    #[test]
    fn test_grid_extent() {
        assert_eq!(grid_extent(10, 10), (22, 12));
        assert_eq!(grid_extent(40000, 5), (u16::MAX, 7));
        assert_eq!(grid_extent(100_000, 100_000), (u16::MAX, u16::MAX));
    }

    #[test]
    fn test_oversized_grid_renders_clipped() {
        let config = GameConfig::new(40000, 5);
        let (player, arena) = game(&config);
        let text = screen(&player, &arena, 0.0);
        assert!(text.contains(" Snake "));
        assert!(text.contains("000"));
    }

    #[test]
    fn test_shake_stays_in_bounds() {
        let bounds = Rect::new(0, 3, 40, 20);
        let rect = Rect::new(10, 8, 20, 10);
        assert_eq!(shaken(rect, (2, -1), bounds), Rect::new(12, 7, 20, 10));
        assert_eq!(shaken(rect, (-50, -50), bounds), Rect::new(0, 3, 20, 10));
        assert_eq!(shaken(rect, (50, 50), bounds), Rect::new(20, 13, 20, 10));
    }

    #[test]
    fn test_running_screen() {
        let (player, arena) = game(&GameConfig::small());
        let text = screen(&player, &arena, 0.0);

        assert!(text.contains("000"));
        assert!(text.contains("■"));
        assert!(text.contains("●"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_screen() {
        let config = GameConfig::small();
        let (mut player, mut arena) = game(&config);
        let idle = FrameInput::new();
        for _ in 0..10 {
            player.update(config.move_interval, &idle, &mut arena);
        }
        assert!(!player.is_alive());
        assert!(arena.is_in_bounds(player.head()));

        let text = screen(&player, &arena, 1.0);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Press 'SPACE' to restart!"));
    }
}
