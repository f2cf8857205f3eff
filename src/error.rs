//! Error types for the polyglot search layer.
//!
//! All fallible operations return [`PolyglotError`] through the crate-wide
//! [`Result`] alias. Variants are grouped the way callers need to react to
//! them:
//!
//! - input errors ([`UnsupportedLocale`](PolyglotError::UnsupportedLocale),
//!   [`EmptyQuery`](PolyglotError::EmptyQuery),
//!   [`InvalidPagination`](PolyglotError::InvalidPagination)) are reported
//!   straight back to the caller and must not be retried;
//! - dependency errors ([`SearchUnavailable`](PolyglotError::SearchUnavailable))
//!   may be retried by the caller with backoff;
//! - configuration errors ([`Config`](PolyglotError::Config)) are fatal at
//!   startup.
//!
//! # Examples
//!
//! ```
//! use polyglot_search::error::{ErrorKind, PolyglotError, Result};
//!
//! fn lookup(code: &str) -> Result<()> {
//!     Err(PolyglotError::unsupported_locale(code))
//! }
//!
//! let err = lookup("xx").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnsupportedLocale);
//! assert!(!err.is_retryable());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for polyglot search operations.
#[derive(Error, Debug)]
pub enum PolyglotError {
    /// The requested locale has no registered analysis profile.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// The query normalized to nothing searchable; no search was performed.
    #[error("Empty query: {0}")]
    EmptyQuery(String),

    /// Offset or page size outside the accepted bounds.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// The underlying search engine timed out or failed.
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The caller abandoned the request.
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by external collaborators such as engine adapters.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PolyglotError.
pub type Result<T> = std::result::Result<T, PolyglotError>;

/// Payload-free discriminant of [`PolyglotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedLocale,
    EmptyQuery,
    InvalidPagination,
    SearchUnavailable,
    Config,
    Analysis,
    Cancelled,
    Io,
    Json,
    Other,
}

impl PolyglotError {
    /// Create a new unsupported locale error.
    pub fn unsupported_locale<S: Into<String>>(code: S) -> Self {
        PolyglotError::UnsupportedLocale(code.into())
    }

    /// Create a new empty query error.
    pub fn empty_query<S: Into<String>>(msg: S) -> Self {
        PolyglotError::EmptyQuery(msg.into())
    }

    /// Create a new invalid pagination error.
    pub fn invalid_pagination<S: Into<String>>(msg: S) -> Self {
        PolyglotError::InvalidPagination(msg.into())
    }

    /// Create a new search unavailable error.
    pub fn search_unavailable<S: Into<String>>(msg: S) -> Self {
        PolyglotError::SearchUnavailable(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PolyglotError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PolyglotError::Analysis(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        PolyglotError::Cancelled(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PolyglotError::Other(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        PolyglotError::SearchUnavailable(format!("Timeout: {}", msg.into()))
    }

    /// The kind of this error, without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolyglotError::UnsupportedLocale(_) => ErrorKind::UnsupportedLocale,
            PolyglotError::EmptyQuery(_) => ErrorKind::EmptyQuery,
            PolyglotError::InvalidPagination(_) => ErrorKind::InvalidPagination,
            PolyglotError::SearchUnavailable(_) => ErrorKind::SearchUnavailable,
            PolyglotError::Config(_) => ErrorKind::Config,
            PolyglotError::Analysis(_) => ErrorKind::Analysis,
            PolyglotError::Cancelled(_) => ErrorKind::Cancelled,
            PolyglotError::Io(_) => ErrorKind::Io,
            PolyglotError::Json(_) => ErrorKind::Json,
            PolyglotError::Anyhow(_) | PolyglotError::Other(_) => ErrorKind::Other,
        }
    }

    /// Whether the caller may retry the same request later.
    ///
    /// Only engine unavailability is transient; the orchestrator itself never
    /// retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PolyglotError::SearchUnavailable(_))
    }

    /// Whether the error was caused by the request itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PolyglotError::UnsupportedLocale(_)
                | PolyglotError::EmptyQuery(_)
                | PolyglotError::InvalidPagination(_)
        )
    }
}
