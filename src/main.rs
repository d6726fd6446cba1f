use anyhow::{Result, anyhow};
use clap::Parser;
use smooth_snake::game::GameConfig;
use smooth_snake::logging;
use smooth_snake::modes::HumanMode;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "smooth_snake")]
#[command(version, about = "Snake with smooth, interpolated movement")]
struct Cli {
    /// JSON file holding a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Starting length of the snake
    #[arg(long)]
    initial_length: Option<usize>,

    /// Starting speed in cells per second
    #[arg(long)]
    speed: Option<f64>,

    /// Speed added per fruit eaten
    #[arg(long)]
    speed_gain: Option<f64>,

    /// Top speed in cells per second
    #[arg(long)]
    max_speed: Option<f64>,

    /// Frame rate cap
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(length) = self.initial_length {
            config.initial_length = length;
        }
        if let Some(speed) = self.speed {
            config.base_speed = speed;
        }
        if let Some(gain) = self.speed_gain {
            config.speed_gain = gain;
        }
        if let Some(max_speed) = self.max_speed {
            config.max_speed = max_speed;
        }
        if let Some(fps) = self.fps {
            config.frame_rate_cap = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config
            .validate()
            .map_err(|msg| anyhow!("Invalid configuration: {msg}"))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    info!(?config, "starting");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["smooth_snake"]);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "smooth_snake",
            "--width",
            "20",
            "--height",
            "12",
            "--speed",
            "4.5",
            "--seed",
            "11",
        ]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.base_speed, 4.5);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["smooth_snake", "--speed", "20", "--max-speed", "10"]);
        assert!(cli.game_config().is_err());
    }
}
