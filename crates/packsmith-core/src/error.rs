//! Unified error handling for Packsmith Core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with a category mapping used by the CLI for display
//! styling and exit codes.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Packsmith Core operations.
#[derive(Debug, Error)]
pub enum PacksmithError {
    /// Errors from the domain layer (pack defects, broken templates).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl PacksmithError {
    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Render => ErrorCategory::Render,
            },
            Self::Application(e) => match e {
                ApplicationError::PackNotFound { .. } => ErrorCategory::NotFound,
                ApplicationError::Render { .. } => ErrorCategory::Render,
                ApplicationError::Io { .. } => ErrorCategory::Io,
                ApplicationError::Cancelled => ErrorCategory::Cancelled,
            },
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A pack is structurally invalid.
    Validation,
    /// A template inside a pack is broken.
    Render,
    /// No pack matched the request.
    NotFound,
    /// Filesystem failure.
    Io,
    /// Externally requested abort.
    Cancelled,
}

/// Convenient result type alias.
pub type PacksmithResult<T> = Result<T, PacksmithError>;
