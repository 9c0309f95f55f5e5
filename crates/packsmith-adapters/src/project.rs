//! Project-identity detection.
//!
//! The identity seeds import-path-shaped template variables
//! (`ServiceImportPath`, `CommonImportPath`). It comes from the repository's
//! `go.mod` module declaration when present, and degrades to the root
//! directory's base name otherwise.

use std::fs;
use std::path::Path;

use tracing::debug;

use packsmith_core::application::ports::ProjectDetector;

/// Fallback identity when the root directory has no usable base name.
const DEFAULT_IDENTITY: &str = "service";

/// Detector reading the `module` declaration from `go.mod`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoModDetector;

impl GoModDetector {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectDetector for GoModDetector {
    fn detect_identity(&self, root: &Path) -> String {
        if let Ok(raw) = fs::read_to_string(root.join("go.mod")) {
            for line in raw.lines() {
                let trimmed = line.trim();
                if let Some(rest) = trimmed.strip_prefix("module ") {
                    let module = rest.trim();
                    if !module.is_empty() {
                        debug!(%module, "project identity from go.mod");
                        return module.to_string();
                    }
                }
            }
        }

        fallback_identity(root)
    }
}

/// Base name of the root directory, or [`DEFAULT_IDENTITY`] when that name
/// is empty, `.`, or a bare path separator.
fn fallback_identity(root: &Path) -> String {
    match root.file_name().and_then(|n| n.to_str()) {
        Some(base) if !base.is_empty() && base != "." => base.to_string(),
        _ => DEFAULT_IDENTITY.to_string(),
    }
}
