// src/error.rs

//! Unified error handling for fetching and extracting documentation.

use std::fmt;

use thiserror::Error;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocError>;

/// Unified documentation error type.
#[derive(Error, Debug)]
pub enum DocError {
    /// The searcher was configured without a site adapter
    #[error("parser not provided")]
    NoParser,

    /// The documentation site answered with something other than 200
    #[error("invalid response status: {0}")]
    InvalidStatus(u16),

    /// The page rendered fine but reports that the module does not exist
    #[error("package not found")]
    NotFound,

    /// A required element or attribute was missing from the page
    #[error("parse error at {context}: {message}")]
    Parse { context: String, message: String },

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DocError {
    /// Create a structural parse error.
    pub fn parse(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status carried by the error, if any.
    ///
    /// A not-found page is reported as 404 even though the transport saw 200.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::InvalidStatus(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the module does not exist on the documentation site.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
