//! Error types shared across the crate.
//!
//! Only the outer surfaces fail: terminal lifecycle, backend writes and
//! theme/preference files. Markup parsing, diffing, layout resolution and
//! widget drawing are infallible.

use thiserror::Error;

/// Errors surfaced by the terminal backend and configuration layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal or file I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A theme or preference file could not be parsed.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// A theme name was requested that is not registered.
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
