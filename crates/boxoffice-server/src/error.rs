//! Server error types.

use thiserror::Error;

/// Errors from the server runtime.
///
/// Request-level problems never surface here; they become error replies on
/// the connection that sent them.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error (unusable bind address, zero workers, etc.).
    ///
    /// Fatal at startup. Fix configuration and restart.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport/network error outside a single session.
    #[error("transport error: {0}")]
    Transport(String),

    /// The worker pool has been shut down and accepts no more jobs.
    #[error("worker pool is closed")]
    PoolClosed,
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
