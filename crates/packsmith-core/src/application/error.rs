//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.
//!
//! Unlike domain errors these are not `Clone`: the I/O variant preserves the
//! original `std::io::Error` as its source so diagnostics keep the real
//! filesystem failure.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Errors that occur during application orchestration.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// No pack matches the requested language — fatal to the resolution
    /// request (an absent packs directory, by contrast, just means "zero
    /// packs" and is not an error at all).
    #[error("no pack found for language '{language}'")]
    PackNotFound { language: String },

    /// A template inside a pack failed to render. Carries the offending
    /// source file so a broken pack can be diagnosed without source
    /// inspection.
    #[error("render failed for '{}': {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    /// Filesystem operation failed during walk/copy/write.
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Externally requested abort, observed at a file boundary.
    #[error("operation cancelled")]
    Cancelled,
}

impl ApplicationError {
    /// Wrap an I/O failure with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a render failure with its source file.
    pub fn render(path: impl Into<PathBuf>, source: DomainError) -> Self {
        Self::Render {
            path: path.into(),
            source,
        }
    }
}
