// src/error.rs
use thiserror::Error;

/// Error hierarchy for the clock core.
///
/// Decode failures and coverage misses are not represented here: both are
/// recovered locally with placeholder glyphs and never propagate. Only
/// resource and configuration failures surface to the caller.
#[derive(Error, Debug)]
pub enum ClockError {
    // Font chain configuration
    #[error("the first font in the chain must be loaded from a named pattern")]
    PrimaryFontNotNamed,

    #[error("no fonts available in fallback chain")]
    NoFontsAvailable,

    #[error("font error: {message}")]
    FontError { message: String },

    #[error("failed to load font from {path}: {message}")]
    FontLoadFailed { path: String, message: String },

    // Configuration
    #[error("invalid configuration: {field} = {value}")]
    ConfigurationError { field: String, value: String },

    // Generic fallback for unexpected errors
    #[error("unexpected internal error: {message}")]
    InternalError { message: String },
}

pub type ClockResult<T> = Result<T, ClockError>;
