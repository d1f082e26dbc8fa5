//! Error types for qiita-mcp operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all qiita-mcp crates. Uses `thiserror` for derive macros.
//!
//! At the tool boundary every variant is flattened to its `Display` text, so
//! callers distinguish kinds only by message content. Keep messages stable.

use thiserror::Error;

/// Boxed source error carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while fetching and projecting items.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool parameters failed schema validation.
    ///
    /// The message lists every offending field, e.g.
    /// `"page: must be >= 1, per_page: must be <= 100"`.
    #[error("Invalid parameters: {0}")]
    Validation(String),

    /// The upstream API answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Request {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The HTTP call itself could not complete.
    #[error("{message}: {source}")]
    Transport {
        /// Context for the failure.
        message: String,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// The upstream body could not be decoded as an item list.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a validation error from an already-joined violation list.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a request error for a non-success status code.
    pub fn request(status: u16) -> Self {
        Self::Request { status }
    }

    /// Create a transport error wrapping the underlying cause.
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status carried by a request error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the caller supplied bad parameters.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias using qiita-mcp's Error type.
pub type Result<T> = std::result::Result<T, Error>;
