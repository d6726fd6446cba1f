use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Points},
    },
};

use crate::game::{FruitKind, GameState};
use crate::metrics::GameMetrics;

const HEAD_COLOR: Color = Color::Rgb(120, 255, 90);
const BODY_COLOR: Color = Color::Rgb(70, 210, 60);

/// Gap left around a filled cell so neighbouring segments stay distinct
const CELL_INSET: f64 = 0.12;
/// Spacing of the dots that fill a cell
const FILL_STEP: f64 = 0.19;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = board_rect(state, chunks[1]);
        self.render_board(frame, board_area, state);

        if !state.is_alive {
            let popup = centered_rect(40, 8, board_area);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(state), popup);
        } else if state.is_paused {
            let popup = centered_rect(26, 3, board_area);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_paused(), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// The board in grid units. Canvas y grows upward, grid rows grow
    /// downward, so rows are flipped when painting.
    fn render_board(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let width = state.grid_width as f64;
        let height = state.grid_height as f64;

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Smooth Snake "),
            )
            .background_color(Color::Black)
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                let food = cell_fill(state.food.x as f64, state.food.y as f64, height);
                ctx.draw(&Points {
                    coords: &food,
                    color: fruit_color(state.fruit),
                });

                // Tail first so the head is painted on top
                for (index, (x, y)) in segment_positions(state).into_iter().enumerate().rev() {
                    let color = if index == 0 { HEAD_COLOR } else { BODY_COLOR };
                    let coords = cell_fill(x, y, height);
                    ctx.draw(&Points {
                        coords: &coords,
                        color,
                    });
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}", state.speed), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("FPS: ", label),
            Span::styled(format!("{:.0}", metrics.fps), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(Span::styled(
            "PAUSED (P to resume)",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Esc",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn fruit_color(kind: FruitKind) -> Color {
    match kind {
        FruitKind::Apple => Color::Rgb(220, 40, 40),
        FruitKind::Cherry => Color::Rgb(210, 20, 50),
        FruitKind::Lemon => Color::Rgb(245, 210, 60),
        FruitKind::Grape => Color::Rgb(150, 50, 200),
    }
}

/// Where each segment is drawn this frame, head first. Progress only moves
/// while the round runs, so a paused or finished round stays where it froze.
pub fn segment_positions(state: &GameState) -> Vec<(f64, f64)> {
    (0..state.snake.len())
        .filter_map(|index| state.snake.interpolated_position(index, state.progress))
        .collect()
}

/// Canvas points filling the cell whose top-left grid corner is `(col, row)`.
/// `col` and `row` may be fractional while a segment is sliding.
pub fn cell_fill(col: f64, row: f64, grid_height: f64) -> Vec<(f64, f64)> {
    let left = col + CELL_INSET;
    let right = col + 1.0 - CELL_INSET;
    let bottom = grid_height - row - 1.0 + CELL_INSET;
    let top = grid_height - row - CELL_INSET;

    let mut points = Vec::new();
    let mut y = bottom;
    while y <= top {
        let mut x = left;
        while x <= right {
            points.push((x, y));
            x += FILL_STEP;
        }
        y += FILL_STEP;
    }
    points
}

/// Area for the board: two terminal columns per grid column keeps cells
/// roughly square, shrunk to fit and centered in `area`.
fn board_rect(state: &GameState, area: Rect) -> Rect {
    let grid_width = u16::try_from(state.grid_width).unwrap_or(u16::MAX);
    let grid_height = u16::try_from(state.grid_height).unwrap_or(u16::MAX);
    let want_width = grid_width.saturating_mul(2).saturating_add(2);
    let want_height = grid_height.saturating_add(2);
    centered_rect(want_width, want_height, area)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
