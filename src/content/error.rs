//! Content pipeline errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the content pipeline
///
/// Per-file metadata problems are not errors: fields fall back to their
/// defaults and processing continues.
#[derive(Error, Debug)]
pub enum ContentError {
    /// No public post exists for the slug (missing file, draft, or invalid slug)
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ContentError {
    /// Whether the caller should answer with a plain "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}
