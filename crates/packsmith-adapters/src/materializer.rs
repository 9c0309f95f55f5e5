//! Filesystem tree materializer.
//!
//! Walks a pack's template source subtree(s), replicates the directory
//! structure at a destination, and for each file either renders it (text) or
//! copies it verbatim (binary), applying the group's write policy and the
//! `.tmpl` suffix-stripping rule.
//!
//! Text classification is deliberate and conservative: an explicit extension
//! allow-list plus the `Dockerfile` basename; anything else defaults to
//! binary unless it carries the template suffix (which always renders).
//!
//! A single file failure aborts the whole group operation — the materializer
//! does not attempt partial recovery, since a half-written service tree is
//! worse than none.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use packsmith_core::{
    application::{
        ApplicationError, CancelFlag,
        ports::{MaterializeStats, TreeMaterializer},
    },
    domain::{DomainError, Pack, RenderContext, TEMPLATE_SUFFIX, TemplateGroup, WritePolicy, template},
    error::PacksmithResult,
};

/// Extensions treated as renderable text. Everything else is byte-copied
/// unless it carries the template suffix.
const TEXT_EXTENSIONS: [&str; 12] = [
    "md", "txt", "go", "js", "ts", "tsx", "json", "yaml", "yml", "toml", "css", "html",
];

/// Production materializer writing through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemMaterializer;

impl FilesystemMaterializer {
    pub fn new() -> Self {
        Self
    }
}

impl TreeMaterializer for FilesystemMaterializer {
    #[instrument(skip_all, fields(pack = %pack.id(), service = %service_name))]
    fn apply_pack(
        &self,
        pack: &Pack,
        root: &Path,
        service_name: &str,
        ctx: &RenderContext,
        cancel: &CancelFlag,
    ) -> PacksmithResult<MaterializeStats> {
        let mut stats = MaterializeStats::default();

        for group in TemplateGroup::ALL {
            let source = pack.group_source(group);
            if !source.is_dir() {
                if group.is_required() {
                    return Err(DomainError::MissingServiceGroup {
                        id: pack.id().to_string(),
                    }
                    .into());
                }
                continue;
            }

            let dest = group.destination(root, service_name);
            debug!(%group, dest = %dest.display(), "applying template group");
            stats.absorb(self.apply_group(&source, &dest, ctx, group.policy(), cancel)?);
        }

        Ok(stats)
    }

    #[instrument(skip_all, fields(source = %source.display(), dest = %dest.display()))]
    fn apply_group(
        &self,
        source: &Path,
        dest: &Path,
        ctx: &RenderContext,
        policy: WritePolicy,
        cancel: &CancelFlag,
    ) -> PacksmithResult<MaterializeStats> {
        // Destructive replace: stale files from a previous pack version must
        // not linger at the destination.
        if policy == WritePolicy::Replace && dest.exists() {
            fs::remove_dir_all(dest).map_err(|e| io_err(dest, e))?;
        }

        let mut stats = MaterializeStats::default();

        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| source.to_path_buf());
                ApplicationError::io(path, e.into())
            })?;

            if cancel.is_cancelled() {
                return Err(ApplicationError::Cancelled.into());
            }

            let rel = entry.path().strip_prefix(source).map_err(|_| {
                ApplicationError::io(
                    entry.path().to_path_buf(),
                    io::Error::other("walked path escaped the source tree"),
                )
            })?;

            if entry.file_type().is_dir() {
                let mirrored = dest.join(rel);
                fs::create_dir_all(&mirrored).map_err(|e| io_err(&mirrored, e))?;
                continue;
            }
            if !entry.file_type().is_file() {
                continue; // Skip symlinks and other special types.
            }

            let mut out_path = dest.join(rel);
            let is_template = entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.ends_with(TEMPLATE_SUFFIX));
            if is_template {
                // "hello.txt.tmpl" materializes as "hello.txt".
                if let Some(name) = out_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.trim_end_matches(TEMPLATE_SUFFIX).to_string())
                {
                    out_path.set_file_name(name);
                }
            }

            if policy == WritePolicy::Preserve && out_path.exists() {
                stats.files_skipped += 1;
                continue;
            }
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }

            if is_template || is_likely_text(entry.path()) {
                let raw = fs::read_to_string(entry.path()).map_err(|e| io_err(entry.path(), e))?;
                let rendered = template::render(&raw, ctx)
                    .map_err(|e| ApplicationError::render(entry.path().to_path_buf(), e))?;
                fs::write(&out_path, rendered).map_err(|e| io_err(&out_path, e))?;
            } else {
                fs::copy(entry.path(), &out_path).map_err(|e| io_err(&out_path, e))?;
            }
            stats.files_written += 1;
        }

        debug!(
            files_written = stats.files_written,
            files_skipped = stats.files_skipped,
            "template group applied"
        );
        Ok(stats)
    }
}

/// Text classification by extension allow-list, with `Dockerfile` as the
/// lone extensionless special case.
fn is_likely_text(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let lower = ext.to_lowercase();
        if TEXT_EXTENSIONS.contains(&lower.as_str()) {
            return true;
        }
    }
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some("Dockerfile" | "dockerfile")
    )
}

fn io_err(path: &Path, e: io::Error) -> ApplicationError {
    ApplicationError::io(path.to_path_buf(), e)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
