use thiserror::Error;

/// Everything the engine can refuse to do.
///
/// Neither variant is ever produced once a game has reached a terminal
/// outcome; calls on a finished game return the state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Rejected while building a new game: bad dimensions, bad layout,
    /// non-positive target or lives, or an unreadable config file.
    #[error("invalid game configuration: {0}")]
    Config(String),

    /// The state handed to `handle_key`/`tick` breaks a grid invariant.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
