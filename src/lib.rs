//! Dino Runner - a terminal side-scrolling jump-the-cactus game
//!
//! Core modules:
//! - `entities`: plain game data and world constants
//! - `compute`: pure per-frame simulation and session transitions
//! - `clock`, `input`, `audio`, `display`: the terminal front end's collaborators
//! - `config`, `error`: command-line options and fatal errors

pub mod audio;
pub mod clock;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;

pub use config::Config;
pub use error::GameError;
