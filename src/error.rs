//! Error types for htmlschema
//!
//! Validation itself never fails: every anomaly in a validated attribute bag
//! is reported as a [`Diagnostic`](crate::validators::Diagnostic). The errors
//! defined here cover the construction phase only (building a schema table,
//! loading settings).

use std::fmt;
use thiserror::Error;

/// Result type alias using htmlschema Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for htmlschema operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema table construction error
    #[error("schema error: {0}")]
    Schema(#[from] BuildError),

    /// Invalid settings
    #[error("settings error: {0}")]
    Settings(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Schema table construction error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    /// Error message
    pub message: String,
    /// Component that caused the error (e.g. `family 'hyperlink'`)
    pub location: Option<String>,
}

impl BuildError {
    /// Create a new build error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " (in {})", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for BuildError {}
