//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `packsmith-adapters` crate provides implementations.

use std::path::Path;

use crate::application::cancel::CancelFlag;
use crate::domain::{Pack, RenderContext, WritePolicy};
use crate::error::PacksmithResult;

/// Port for pack discovery and resolution.
///
/// Implemented by:
/// - `packsmith_adapters::FilesystemPackStore` (production)
pub trait PackStore: Send + Sync {
    /// Enumerate all valid packs in a stable order.
    ///
    /// An absent packs directory yields an empty collection ("no packs
    /// installed"); any other I/O failure propagates. Individually broken
    /// packs are skipped so one corrupt pack never hides the others.
    fn discover(&self) -> PacksmithResult<Vec<Pack>>;

    /// Resolve a pack for a language (case-insensitive).
    ///
    /// Registered packs win; a local convention pack directory is the
    /// fallback. `Ok(None)` means nothing matched anywhere.
    fn find_by_language(&self, language: &str) -> PacksmithResult<Option<Pack>>;

    /// Strict per-directory validation report, including entries that
    /// discovery would silently skip.
    fn audit(&self) -> PacksmithResult<Vec<PackAudit>>;
}

/// One row of the `audit` report.
#[derive(Debug, Clone)]
pub struct PackAudit {
    /// Pack directory name under the packs root.
    pub directory: String,
    /// Declared pack id, when the descriptor was at least parsable.
    pub id: Option<String>,
    /// Why the pack is invalid; `None` means it passed validation.
    pub problem: Option<String>,
}

impl PackAudit {
    pub fn is_valid(&self) -> bool {
        self.problem.is_none()
    }
}

/// Port for template-tree materialization.
///
/// Implemented by:
/// - `packsmith_adapters::FilesystemMaterializer` (production)
pub trait TreeMaterializer: Send + Sync {
    /// Apply all template groups of a pack for one service.
    ///
    /// Group order, destinations and write policies follow
    /// [`crate::domain::TemplateGroup`]. The first render or I/O failure
    /// aborts the operation — a half-written service tree is worse than
    /// none, so there is no partial recovery.
    fn apply_pack(
        &self,
        pack: &Pack,
        root: &Path,
        service_name: &str,
        ctx: &RenderContext,
        cancel: &CancelFlag,
    ) -> PacksmithResult<MaterializeStats>;

    /// Apply a single template source tree to a destination.
    fn apply_group(
        &self,
        source: &Path,
        dest: &Path,
        ctx: &RenderContext,
        policy: WritePolicy,
        cancel: &CancelFlag,
    ) -> PacksmithResult<MaterializeStats>;
}

/// Counters reported by a materialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub files_written: usize,
    /// Files left untouched under the `Preserve` policy.
    pub files_skipped: usize,
}

impl MaterializeStats {
    pub fn absorb(&mut self, other: MaterializeStats) {
        self.files_written += other.files_written;
        self.files_skipped += other.files_skipped;
    }
}

/// Port for project-identity detection.
///
/// Implemented by:
/// - `packsmith_adapters::GoModDetector` (production)
pub trait ProjectDetector: Send + Sync {
    /// Determine the project identity string used to seed import-path-shaped
    /// template variables. Infallible: implementations fall back to a
    /// directory-derived default.
    fn detect_identity(&self, root: &Path) -> String;
}
