//! Error handling for tplot-rs
//!
//! This module defines the crate's error type and a Result alias for use
//! throughout the library.

use thiserror::Error;

/// Main error type for tplot-rs operations
#[derive(Error, Debug)]
pub enum TplotError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Native snapshot JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed legacy (IDL SAVE) content
    #[error("Legacy format error: {0}")]
    LegacyFormat(String),

    /// Legacy content that is well-formed but not decoded by this crate
    #[error("Unsupported legacy content: {0}")]
    UnsupportedLegacy(String),

    /// Native snapshot structure errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Array length/shape invariant violations
    #[error("Shape error: {0}")]
    Shape(String),

    /// Lookup of a variable that is not in the store
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Option payload that does not fit the option
    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TplotError>,
    },
}

impl TplotError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TplotError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a legacy format error at a byte offset
    pub fn legacy(offset: u64, message: impl Into<String>) -> Self {
        TplotError::LegacyFormat(format!("{} (at byte {})", message.into(), offset))
    }

    /// Shorthand for an invalid option payload
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        TplotError::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for tplot-rs operations
pub type Result<T> = std::result::Result<T, TplotError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| TplotError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TplotError::Io(e).with_context(f()))
    }
}
