use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    frame_interval: Duration,
    max_frame_dt: Duration,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let frame_interval = Duration::from_secs_f64(1.0 / config.frame_rate_cap.max(1) as f64);
        let max_frame_dt =
            Duration::try_from_secs_f64(config.max_frame_dt).unwrap_or(Duration::from_millis(100));
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            frame_interval,
            max_frame_dt,
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Frames are capped; the simulation catches up through the progress accumulator
        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Update and render one frame
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.update_frame(now - last_frame);
                    last_frame = now;

                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(score = self.state.score, "quitting");
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

            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if !self.state.set_direction(direction) {
                    debug!(?direction, "reverse turn ignored");
                }
            }
            KeyAction::TogglePause => {
                if self.state.is_alive {
                    let paused = self.state.toggle_pause();
                    info!(paused, "pause toggled");
                }
            }
            KeyAction::Restart => {
                // Only a finished round can be restarted
                if !self.state.is_alive {
                    self.reset_game();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Advance the simulation by one frame's worth of wall-clock time
    fn update_frame(&mut self, elapsed: Duration) {
        let dt = elapsed.min(self.max_frame_dt);
        self.metrics.on_frame(elapsed, self.state.is_running());

        let speed = self.state.speed;
        let result = self
            .engine
            .advance_progress(&mut self.state, dt.as_secs_f64(), speed);

        if result.died() {
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        info!(games_played = self.metrics.games_played, "restarted");
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
    use crate::game::Direction;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig {
            seed: Some(5),
            ..GameConfig::small()
        })
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.state.is_alive);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.frame_interval, Duration::from_secs_f64(1.0 / 120.0));
    }

    #[test]
    fn test_turn_applies_immediately() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Press));
        assert_eq!(mode.state.snake.direction(), Direction::Up);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Release));
        assert_eq!(mode.state.snake.direction(), Direction::Right);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut mode = mode();
        mode.state.score = 10;
        mode.apply_action(KeyAction::Restart);
        assert_eq!(mode.state.score, 10);

        mode.state.is_alive = false;
        mode.apply_action(KeyAction::Restart);
        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_alive);
    }

    #[test]
    fn test_pause_freezes_frames() {
        let mut mode = mode();
        mode.apply_action(KeyAction::TogglePause);
        let before = mode.state.clone();

        mode.update_frame(Duration::from_millis(50));
        assert_eq!(mode.state, before);

        mode.apply_action(KeyAction::TogglePause);
        mode.update_frame(Duration::from_millis(50));
        assert!(mode.state.progress > 0.0);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut mode = mode();
        let head = mode.state.snake.head();

        // 0.1s at 6 cells/s is less than one step, however long the stall
        mode.update_frame(Duration::from_secs(5));

        assert_eq!(mode.state.snake.head(), head);
        assert!((mode.state.progress - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_crash_counts_a_game() {
        let mut mode = mode();
        // Small grid head starts at column 3 heading right; seven steps hit the wall
        for _ in 0..30 {
            mode.update_frame(Duration::from_millis(100));
        }
        assert!(!mode.state.is_alive);
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_quit_action() {
        let mut mode = mode();
        mode.apply_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
