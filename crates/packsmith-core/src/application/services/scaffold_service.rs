//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the scaffolding workflow:
//! 1. Resolve a pack for the requested language
//! 2. Detect the project identity and build the render context
//! 3. Materialize the pack's template groups
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        cancel::CancelFlag,
        ports::{MaterializeStats, PackAudit, PackStore, ProjectDetector, TreeMaterializer},
    },
    domain::{Pack, RenderContext},
    error::PacksmithResult,
};

/// Information about a pack for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackInfo {
    pub id: String,
    pub name: String,
    pub lang: String,
    pub version: String,
    pub description: Option<String>,
}

impl From<&Pack> for PackInfo {
    fn from(pack: &Pack) -> Self {
        Self {
            id: pack.descriptor.id.clone(),
            name: pack.descriptor.name.clone(),
            lang: pack.descriptor.lang.clone(),
            version: pack.descriptor.version.clone(),
            description: pack.descriptor.description.clone(),
        }
    }
}

/// Result of a successful scaffolding operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    /// Identity of the pack that was applied.
    pub pack_id: String,
    pub stats: MaterializeStats,
}

/// Main scaffolding service.
///
/// Orchestrates pack resolution, context construction, and materialization.
pub struct ScaffoldService {
    store: Box<dyn PackStore>,
    materializer: Box<dyn TreeMaterializer>,
    detector: Box<dyn ProjectDetector>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        store: Box<dyn PackStore>,
        materializer: Box<dyn TreeMaterializer>,
        detector: Box<dyn ProjectDetector>,
    ) -> Self {
        Self {
            store,
            materializer,
            detector,
        }
    }

    /// Scaffold a new service from the pack matching `language`.
    ///
    /// This is the main use case. Returns `ApplicationError::PackNotFound`
    /// when neither a registered nor a local pack matches.
    #[instrument(skip_all, fields(service = %service_name, language = %language))]
    pub fn create_service(
        &self,
        root: &Path,
        service_name: &str,
        language: &str,
        cancel: &CancelFlag,
    ) -> PacksmithResult<ScaffoldOutcome> {
        let pack = self
            .store
            .find_by_language(language)?
            .ok_or_else(|| ApplicationError::PackNotFound {
                language: language.to_string(),
            })?;

        info!(pack = %pack.id(), version = %pack.descriptor.version, "pack resolved");
        self.apply_pack(root, &pack, service_name, cancel)
    }

    /// Apply an already-resolved pack for one service.
    #[instrument(skip_all, fields(pack = %pack.id(), service = %service_name))]
    pub fn apply_pack(
        &self,
        root: &Path,
        pack: &Pack,
        service_name: &str,
        cancel: &CancelFlag,
    ) -> PacksmithResult<ScaffoldOutcome> {
        // Identity is detected once and held constant for the whole
        // operation, even if the marker file changes underneath us.
        let identity = self.detector.detect_identity(root);
        let ctx = RenderContext::for_service(identity, service_name);

        let stats = self
            .materializer
            .apply_pack(pack, root, service_name, &ctx, cancel)?;

        info!(
            files_written = stats.files_written,
            files_skipped = stats.files_skipped,
            "materialization complete"
        );

        Ok(ScaffoldOutcome {
            pack_id: pack.id().to_string(),
            stats,
        })
    }

    /// List all valid packs.
    pub fn list_packs(&self) -> PacksmithResult<Vec<PackInfo>> {
        Ok(self.store.discover()?.iter().map(PackInfo::from).collect())
    }

    /// Per-directory validation report, including invalid entries.
    pub fn audit_packs(&self) -> PacksmithResult<Vec<PackAudit>> {
        self.store.audit()
    }
}
