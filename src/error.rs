//! Domain error type shared by the memory pipeline.
//!
//! Every failure the services can produce maps to one variant here. The tool
//! layer renders variants into the user-facing report strings, so callers see
//! a message while the services keep a typed taxonomy.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemoryError>;

#[derive(Error, Debug)]
pub enum MemoryError {
    /// Transport error, non-success status, or malformed response from the
    /// embedding service.
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// Any error from the vector store during collection setup, add, or query.
    /// Carries the underlying error text verbatim.
    #[error("vector store error: {0}")]
    Store(String),

    #[error("file not found: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("not a PDF file: {}", .0.display())]
    NotAPdf(PathBuf),

    #[error("page {requested} is out of range: document has {page_count} pages")]
    PageOutOfRange { requested: usize, page_count: usize },

    /// The document exists and looks like a PDF but could not be opened or read.
    #[error("failed to read document: {0}")]
    Document(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = MemoryError::Embedding("connection refused".into());
        assert_eq!(err.to_string(), "embedding failed: connection refused");

        let err = MemoryError::Store("HTTP 503: service unavailable".into());
        assert_eq!(
            err.to_string(),
            "vector store error: HTTP 503: service unavailable"
        );

        let err = MemoryError::PageOutOfRange {
            requested: 12,
            page_count: 4,
        };
        assert_eq!(
            err.to_string(),
            "page 12 is out of range: document has 4 pages"
        );

        let err = MemoryError::FileMissing(PathBuf::from("/tmp/missing.pdf"));
        assert!(err.to_string().contains("/tmp/missing.pdf"));
    }
}
