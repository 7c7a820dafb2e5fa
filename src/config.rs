//! Command-line arguments and the settings derived from them.

use std::time::Duration;

use clap::Parser;

use crate::difficulty::DifficultyTier;
use crate::game::GameOptions;

/// Flap through the pipes, right in your terminal.
///
/// Space or Up flaps, Esc or q quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Difficulty: e/easy, m/med, h/hard (anything else plays Easy)
    #[arg(allow_hyphen_values = true)]
    pub difficulty: Option<String>,

    /// Target frame rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(10..=240))]
    pub fps: u32,

    /// Seed for the obstacle layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause after a crash before the next life starts
    #[arg(long, default_value_t = 1500)]
    pub restart_delay_ms: u64,

    /// Start falling immediately instead of waiting for the first flap
    #[arg(long)]
    pub no_hover: bool,

    /// Disable sound effects
    #[arg(long)]
    pub mute: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tier: DifficultyTier,
    pub fps: u32,
    pub seed: Option<u64>,
    pub restart_delay: Duration,
    pub hover: bool,
    pub sound: bool,
}

impl Settings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Restart delay expressed in whole frames, rounded to the nearest one.
    pub fn restart_frames(&self) -> u32 {
        let frames = self.restart_delay.as_secs_f64() * self.fps as f64;
        frames.round().min(u32::MAX as f64) as u32
    }

    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            restart_frames: self.restart_frames(),
            hover: self.hover,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tier: DifficultyTier::default(),
            fps: 60,
            seed: None,
            restart_delay: Duration::from_millis(1500),
            hover: true,
            sound: true,
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            tier: DifficultyTier::from_token(args.difficulty.as_deref()),
            fps: args.fps,
            seed: args.seed,
            restart_delay: Duration::from_millis(args.restart_delay_ms),
            hover: !args.no_hover,
            sound: !args.mute,
        }
    }
}
