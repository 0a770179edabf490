//! Error types for Lemmata operations.
//!
//! This module defines the main error type [`LemmataError`] which represents
//! all possible errors that can occur while loading the common-word corpus,
//! annotating text, querying the knowledge base and reading feeds.
//!
//! # Example
//!
//! ```rust
//! use lemmata_core::{LemmataError, Result};
//!
//! fn feed_name(raw: &str) -> Result<&str> {
//!     if raw.trim().is_empty() {
//!         return Err(LemmataError::EmptyFeedName);
//!     }
//!     Ok(raw.trim())
//! }
//! # assert!(feed_name("").is_err());
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "feed")]
use sxd_xpath::ExecutionError;

/// A stage that can abort a summarization run.
///
/// Outlier filtering cannot fail, and a failed lookup only drops its own
/// term, so normalization is the only fatal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Stage {
    Normalizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Normalizing => "normalizing",
        };
        f.write_str(name)
    }
}

/// Main error type for keyword extraction operations.
///
/// # Example
///
/// ```rust
/// use lemmata_core::{LemmataError, Stage};
///
/// let err = LemmataError::Annotation("input too long".to_string()).in_stage(Stage::Normalizing);
/// assert!(err.to_string().starts_with("normalizing stage failed"));
/// ```
#[derive(Error, Debug)]
pub enum LemmataError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status code.
    #[error("Request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Feed name was empty or blank.
    #[error("Feed name can't be empty")]
    EmptyFeedName,

    /// The feed does not exist upstream.
    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    /// The feed body is not a well-formed RSS or Atom document.
    #[error("Failed to parse feed: {0}")]
    FeedParseError(String),

    /// XPath evaluation errors while reading a feed.
    #[cfg(feature = "feed")]
    #[error("XPath error: {0}")]
    XPathError(String),

    /// The common-word resource is missing.
    #[error("Common-word list not found: {0}")]
    CommonWordsNotFound(PathBuf),

    /// The common-word resource has the wrong number of entries.
    #[error("Common-word list has {found} entries, expected {expected}")]
    CommonWordsCount { found: usize, expected: usize },

    /// File read errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The annotator could not process the input text.
    #[error("Annotation failed: {0}")]
    Annotation(String),

    /// A single knowledge-base lookup failed.
    #[error("Lookup for '{term}' failed: {reason}")]
    Lookup { term: String, reason: String },

    /// The knowledge base answered with a body we could not decode.
    #[error("Malformed response: {0}")]
    ResponseFormat(#[from] serde_json::Error),

    /// A pipeline stage failed and aborted the run.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<LemmataError>,
    },
}

impl LemmataError {
    /// Wraps this error with the pipeline stage it aborted.
    pub fn in_stage(self, stage: Stage) -> Self {
        LemmataError::Stage { stage, source: Box::new(self) }
    }
}

#[cfg(feature = "feed")]
impl From<ExecutionError> for LemmataError {
    fn from(err: ExecutionError) -> Self {
        LemmataError::XPathError(err.to_string())
    }
}

/// Result type alias for LemmataError.
pub type Result<T> = std::result::Result<T, LemmataError>;
