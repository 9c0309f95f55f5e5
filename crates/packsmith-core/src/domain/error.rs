//! Domain error types.
//!
//! All errors are:
//! - Cloneable (pure data, no I/O sources)
//! - Categorizable (for CLI display and exit codes)

use thiserror::Error;

/// Root domain error type.
///
/// Two families live here: pack validation defects (a pack is structurally
/// unusable) and render failures (a template inside a pack is broken). Both
/// indicate bad pack content rather than transient conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Pack validation defects
    // ========================================================================
    #[error("pack missing id")]
    MissingId,

    #[error("pack missing lang")]
    MissingLang,

    #[error("pack '{id}' missing templates/service")]
    MissingServiceGroup { id: String },

    // ========================================================================
    // Render failures
    // ========================================================================
    #[error("template syntax error: {reason}")]
    TemplateSyntax { reason: String },

    #[error("undefined template variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("unknown template helper '{name}'")]
    UnknownHelper { name: String },
}

impl DomainError {
    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingId | Self::MissingLang | Self::MissingServiceGroup { .. } => {
                ErrorCategory::Validation
            }
            Self::TemplateSyntax { .. }
            | Self::UndefinedVariable { .. }
            | Self::UnknownHelper { .. } => ErrorCategory::Render,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Render,
}
