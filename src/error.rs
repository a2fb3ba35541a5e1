use std::io;

/// Failures that abort a game session.
///
/// Timeouts and rejected answers are handled inside a turn and never show
/// up here.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Reading input (or writing settings) failed; nothing can continue.
    #[error("I/O failure: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid players: {0}")]
    Players(String),
}

impl GameError {
    /// Platform error code behind an I/O failure, if there is one.
    pub fn code(&self) -> Option<i32> {
        match self {
            GameError::Io { source } => source.raw_os_error(),
            _ => None,
        }
    }
}
