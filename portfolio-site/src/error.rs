//! Error types for the portfolio site.
//!
//! None of these are fatal to the application. Systems log them at the
//! boundary and carry on with the next frame.

use thiserror::Error;

/// Errors raised by DOM, history, data and configuration operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SiteError {
    /// A renderer or initialiser targeted a container that is not in the page.
    #[error("element not found: {selector}")]
    MissingElement { selector: String },

    /// A browser DOM call rejected the operation.
    #[error("DOM operation '{operation}' failed: {message}")]
    Dom { operation: String, message: String },

    /// The history API refused a push.
    #[error("history push to '{path}' failed: {message}")]
    History { path: String, message: String },

    /// The project list could not be fetched or decoded.
    #[error("failed to load projects from {path}: {reason}")]
    CatalogLoad { path: String, reason: String },

    /// The project list decoded but does not describe a valid catalog.
    #[error("invalid project list: {0}")]
    Manifest(String),

    /// A configuration override could not be parsed.
    #[error("invalid site configuration: {0}")]
    Config(String),
}

impl SiteError {
    pub fn missing(selector: &str) -> Self {
        Self::MissingElement {
            selector: selector.to_string(),
        }
    }

    pub fn dom(operation: &str, message: impl Into<String>) -> Self {
        Self::Dom {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
