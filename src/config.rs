/// Command-line configuration.

use clap::Parser;

use crate::entities::{SessionSettings, DEFAULT_SPEED};
use crate::error::GameError;

const MAX_FPS: u32 = 240;

#[derive(Parser, Debug, Clone)]
#[command(name = "dino_runner")]
#[command(about = "Jump over the cacti for as long as you can")]
pub struct Config {
    /// Target frame rate.  Physics is tuned for 60.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Scroll speed in world units per second.
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: f32,

    /// Seed for obstacle placement (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the terminal bell cues.
    #[arg(long)]
    pub mute: bool,

    /// Keep obstacles in memory after they scroll off the left edge.
    #[arg(long)]
    pub keep_offscreen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            speed: DEFAULT_SPEED,
            seed: None,
            mute: false,
            keep_offscreen: false,
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<Self, GameError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(GameError::InvalidConfig(format!(
                "fps must be between 1 and {}, got {}",
                MAX_FPS, self.fps
            )));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "speed must be a non-negative number, got {}",
                self.speed
            )));
        }
        Ok(self)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            speed: self.speed,
            evict_offscreen: !self.keep_offscreen,
        }
    }
}
