use anyhow::Result;
use clap::Parser;
use grid_snake::audio::{Audio, Bell};
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Seconds between steps (overrides the config file)
    #[arg(long)]
    interval: Option<f32>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(interval) = self.interval {
            config.move_interval = interval;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "synth")]
fn audio_backend() -> Box<dyn Audio> {
    match grid_snake::audio::Synth::new() {
        Ok(synth) => Box::new(synth),
        Err(err) => {
            tracing::warn!(%err, "synth unavailable, using terminal bell");
            Box::new(Bell)
        }
    }
}

#[cfg(not(feature = "synth"))]
fn audio_backend() -> Box<dyn Audio> {
    Box::new(Bell)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    grid_snake::logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;

    let mut audio = audio_backend();
    let mut game = HumanMode::new(config, audio.as_mut());
    game.run().await?;

    Ok(())
}
