use std::time::Duration;

/// Weight of the newest frame in the smoothed frame rate
const FPS_SMOOTHING: f64 = 0.1;

/// Session-wide counters shown in the header
pub struct GameMetrics {
    /// Time spent actually playing this round; pauses do not count
    pub round_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Exponentially smoothed frames per second
    pub fps: f64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            fps: 0.0,
        }
    }

    /// Record one rendered frame that took `dt`
    pub fn on_frame(&mut self, dt: Duration, running: bool) {
        if running {
            self.round_time += dt;
        }

        let secs = dt.as_secs_f64();
        if secs > 0.0 {
            let instant = 1.0 / secs;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps + FPS_SMOOTHING * (instant - self.fps)
            };
        }
    }

    pub fn on_game_start(&mut self) {
        self.round_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.round_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
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

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.round_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.round_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.round_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_round_clock_skips_paused_frames() {
        let mut metrics = GameMetrics::new();
        metrics.on_frame(Duration::from_millis(500), true);
        metrics.on_frame(Duration::from_millis(500), false);
        metrics.on_frame(Duration::from_millis(500), true);

        assert_eq!(metrics.round_time, Duration::from_secs(1));

        metrics.on_game_start();
        assert_eq!(metrics.round_time, Duration::ZERO);
    }

    #[test]
    fn test_fps_smoothing() {
        let mut metrics = GameMetrics::new();
        metrics.on_frame(Duration::from_millis(10), true);
        assert!((metrics.fps - 100.0).abs() < 1e-6);

        metrics.on_frame(Duration::from_millis(20), true);
        assert!(metrics.fps < 100.0 && metrics.fps > 50.0);

        metrics.on_frame(Duration::ZERO, true);
        assert!(metrics.fps < 100.0 && metrics.fps > 50.0);
    }
}
