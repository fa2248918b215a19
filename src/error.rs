/// Fatal errors surfaced by the terminal front end.
///
/// The simulation itself never fails; everything here is a startup or I/O
/// problem that ends the process.

use thiserror::Error;

use crate::display::{MIN_COLS, MIN_ROWS};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal is {cols}x{rows}, need at least {}x{}", MIN_COLS, MIN_ROWS)]
    TerminalTooSmall { cols: u16, rows: u16 },
}
