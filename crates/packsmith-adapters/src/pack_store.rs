//! Filesystem-based pack store.
//!
//! Discovers language packs under the repository's packs root, validates
//! them, and resolves a pack for a requested language — falling back to a
//! local convention directory when nothing is registered.
//!
//! # Directory layout expected
//!
//! ```text
//! .packsmith/packs/
//! ├── go-std/
//! │   ├── language.toml        ← descriptor (required)
//! │   └── templates/
//! │       ├── service/         ← required group
//! │       ├── common/          ← optional
//! │       └── root/            ← optional
//! └── python-std/
//!     ├── language.toml
//!     └── templates/service/
//! ```
//!
//! # `language.toml` format
//!
//! ```toml
//! id          = "go-std"        # unique identifier, required
//! name        = "Go (standard)" # display name
//! lang        = "go"            # matched case-insensitively, required
//! version     = "1.0.0"
//! description = "HTTP service skeleton"   # optional
//! ```
//!
//! A repository can also vendor a single unregistered pack at
//! `pack/lang/<language>/` (with the same `templates/` layout); resolution
//! searches the repository root and up to [`MAX_PACK_SEARCH_ASCENTS`] parent
//! directories for it, preferring registered packs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use packsmith_core::{
    application::{
        ApplicationError,
        ports::{PackAudit, PackStore},
    },
    domain::{DESCRIPTOR_FILE, DomainError, Pack, PackDescriptor, TemplateGroup, pack},
    error::PacksmithResult,
};

/// Upper bound on the ancestor-directory walk performed while searching for
/// a local convention pack. Keeps the fallback useful inside nested checkouts
/// without ever scanning an unbounded portion of the filesystem.
pub const MAX_PACK_SEARCH_ASCENTS: usize = 5;

/// Production pack store reading from the repository filesystem.
pub struct FilesystemPackStore {
    packs_root: PathBuf,
    search_root: PathBuf,
}

impl FilesystemPackStore {
    /// Create a store rooted at a repository.
    ///
    /// Registered packs are expected under `.packsmith/packs`; the local
    /// fallback search starts at the repository root itself.
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        Self {
            packs_root: pack::packs_dir(&repo_root),
            search_root: repo_root,
        }
    }

    /// Enumerate candidate pack directories in a stable (name-sorted) order.
    ///
    /// `Ok(None)` means the packs root does not exist — "no packs installed",
    /// which is distinct from a permissions or I/O failure.
    fn candidate_dirs(&self) -> PacksmithResult<Option<Vec<PathBuf>>> {
        let entries = match fs::read_dir(&self.packs_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApplicationError::io(&self.packs_root, e).into()),
        };

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ApplicationError::io(&self.packs_root, e))?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        // Stable enumeration order makes "first match wins" deterministic.
        dirs.sort();
        Ok(Some(dirs))
    }

    /// Read and parse one pack descriptor. The error is a human-readable
    /// reason suitable for the audit report.
    fn read_descriptor(dir: &Path) -> Result<PackDescriptor, String> {
        let descriptor_path = dir.join(DESCRIPTOR_FILE);
        let raw = fs::read_to_string(&descriptor_path)
            .map_err(|e| format!("cannot read {DESCRIPTOR_FILE}: {e}"))?;
        toml::from_str(&raw).map_err(|e| format!("cannot parse {DESCRIPTOR_FILE}: {e}"))
    }

    /// Search ancestor directories for a local convention pack
    /// (`pack/lang/<language>`).
    ///
    /// A candidate is accepted only if it exposes the required `service`
    /// template group; acceptance synthesizes a minimal descriptor.
    fn find_local_pack(&self, language: &str) -> Option<Pack> {
        let lower = language.to_lowercase();
        let mut current = self.search_root.clone();

        for _ in 0..=MAX_PACK_SEARCH_ASCENTS {
            let candidate = current.join("pack").join("lang").join(&lower);
            if candidate.is_dir() {
                let local = Pack::local(language, &candidate);
                if local.group_source(TemplateGroup::Service).is_dir() {
                    debug!(dir = %candidate.display(), "local pack accepted");
                    return Some(local);
                }
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break, // reached filesystem root
            }
        }
        None
    }
}

/// Shared validation predicate.
///
/// Used leniently by discovery (invalid packs are skipped without noise) and
/// loudly by [`PackStore::audit`] (the reason is reported verbatim).
pub fn validate_pack(pack: &Pack) -> Result<(), DomainError> {
    pack.descriptor.validate()?;
    if !pack.group_source(TemplateGroup::Service).is_dir() {
        return Err(DomainError::MissingServiceGroup {
            id: pack.id().to_string(),
        });
    }
    Ok(())
}

impl PackStore for FilesystemPackStore {
    #[instrument(skip(self), fields(dir = %self.packs_root.display()))]
    fn discover(&self) -> PacksmithResult<Vec<Pack>> {
        let Some(dirs) = self.candidate_dirs()? else {
            debug!("packs root absent, treating as zero packs");
            return Ok(Vec::new());
        };

        let mut packs = Vec::new();
        for dir in dirs {
            // One corrupt pack must not abort discovery of the others.
            let descriptor = match Self::read_descriptor(&dir) {
                Ok(d) => d,
                Err(reason) => {
                    warn!(dir = %dir.display(), %reason, "skipping pack directory");
                    continue;
                }
            };
            let candidate = Pack::new(descriptor, &dir);
            if let Err(defect) = validate_pack(&candidate) {
                warn!(dir = %dir.display(), %defect, "skipping invalid pack");
                continue;
            }
            debug!(id = %candidate.id(), lang = %candidate.lang(), "loaded pack");
            packs.push(candidate);
        }

        debug!(count = packs.len(), "finished pack discovery");
        Ok(packs)
    }

    fn find_by_language(&self, language: &str) -> PacksmithResult<Option<Pack>> {
        for pack in self.discover()? {
            if pack.descriptor.matches_language(language) {
                return Ok(Some(pack));
            }
        }
        // Nothing registered matched; try the repository-local convention
        // directory so a vendored pack works without formal registration.
        Ok(self.find_local_pack(language))
    }

    fn audit(&self) -> PacksmithResult<Vec<PackAudit>> {
        let Some(dirs) = self.candidate_dirs()? else {
            return Ok(Vec::new());
        };

        let mut report = Vec::new();
        for dir in dirs {
            let directory = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match Self::read_descriptor(&dir) {
                Err(reason) => report.push(PackAudit {
                    directory,
                    id: None,
                    problem: Some(reason),
                }),
                Ok(descriptor) => {
                    let id = Some(descriptor.id.clone()).filter(|id| !id.is_empty());
                    let candidate = Pack::new(descriptor, &dir);
                    report.push(PackAudit {
                        directory,
                        id,
                        problem: validate_pack(&candidate).err().map(|d| d.to_string()),
                    });
                }
            }
        }
        Ok(report)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create a registered pack directory under `.packsmith/packs`.
    fn write_pack(root: &Path, dir_name: &str, descriptor: &str, with_service: bool) {
        let dir = pack::packs_dir(root).join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DESCRIPTOR_FILE), descriptor).unwrap();
        if with_service {
            fs::create_dir_all(dir.join("templates").join("service")).unwrap();
        }
    }

    fn descriptor(id: &str, lang: &str) -> String {
        format!("id = \"{id}\"\nname = \"{id}\"\nlang = \"{lang}\"\nversion = \"1.0.0\"\n")
    }

    #[test]
    fn missing_packs_root_is_zero_packs() {
        let temp = TempDir::new().unwrap();
        let store = FilesystemPackStore::new(temp.path());
        assert!(store.discover().unwrap().is_empty());
        assert!(store.audit().unwrap().is_empty());
    }

    #[test]
    fn discovers_valid_pack() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "go-std", &descriptor("go-std", "go"), true);

        let packs = FilesystemPackStore::new(temp.path()).discover().unwrap();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].id(), "go-std");
        assert_eq!(packs[0].lang(), "go");
    }

    #[test]
    fn corrupt_descriptor_does_not_abort_discovery() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "broken", "id = [not toml", true);
        write_pack(temp.path(), "go-std", &descriptor("go-std", "go"), true);

        let packs = FilesystemPackStore::new(temp.path()).discover().unwrap();
        assert_eq!(packs.len(), 1, "broken pack should be skipped");
        assert_eq!(packs[0].id(), "go-std");
    }

    #[test]
    fn missing_id_is_excluded() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "anon", "lang = \"go\"\n", true);

        assert!(FilesystemPackStore::new(temp.path()).discover().unwrap().is_empty());
    }

    #[test]
    fn missing_lang_is_excluded() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "nolang", "id = \"nolang\"\n", true);

        assert!(FilesystemPackStore::new(temp.path()).discover().unwrap().is_empty());
    }

    #[test]
    fn missing_service_group_is_excluded() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "hollow", &descriptor("hollow", "go"), false);

        assert!(FilesystemPackStore::new(temp.path()).discover().unwrap().is_empty());
    }

    #[test]
    fn discovery_order_is_name_sorted() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "zeta", &descriptor("zeta", "go"), true);
        write_pack(temp.path(), "alpha", &descriptor("alpha", "python"), true);

        let packs = FilesystemPackStore::new(temp.path()).discover().unwrap();
        assert_eq!(packs[0].id(), "alpha");
        assert_eq!(packs[1].id(), "zeta");
    }

    #[test]
    fn find_by_language_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "go-std", &descriptor("go-std", "Go"), true);

        let store = FilesystemPackStore::new(temp.path());
        let found = store.find_by_language("GO").unwrap().unwrap();
        assert_eq!(found.id(), "go-std");
    }

    #[test]
    fn duplicate_languages_resolve_to_first_in_order() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "a-go", &descriptor("a-go", "go"), true);
        write_pack(temp.path(), "b-go", &descriptor("b-go", "Go"), true);

        let store = FilesystemPackStore::new(temp.path());
        let found = store.find_by_language("GO").unwrap().unwrap();
        assert_eq!(found.id(), "a-go");
    }

    #[test]
    fn unmatched_language_is_none() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "go-std", &descriptor("go-std", "go"), true);

        let store = FilesystemPackStore::new(temp.path());
        assert!(store.find_by_language("erlang").unwrap().is_none());
    }

    // ── local fallback ────────────────────────────────────────────────────

    fn write_local_pack(base: &Path, lang: &str) {
        fs::create_dir_all(
            base.join("pack")
                .join("lang")
                .join(lang)
                .join("templates")
                .join("service"),
        )
        .unwrap();
    }

    #[test]
    fn local_pack_at_root_synthesizes_descriptor() {
        let temp = TempDir::new().unwrap();
        write_local_pack(temp.path(), "python");

        let store = FilesystemPackStore::new(temp.path());
        let found = store.find_by_language("python").unwrap().unwrap();
        assert_eq!(found.id(), "local-python");
        assert_eq!(found.descriptor.name, "Python pack");
        assert_eq!(found.descriptor.version, "0.0.0");
    }

    #[test]
    fn local_pack_found_by_ancestor_walk() {
        let temp = TempDir::new().unwrap();
        write_local_pack(temp.path(), "python");
        let nested = temp.path().join("tools").join("repo");
        fs::create_dir_all(&nested).unwrap();

        let store = FilesystemPackStore::new(&nested);
        let found = store.find_by_language("Python").unwrap().unwrap();
        assert_eq!(found.id(), "local-python");
    }

    #[test]
    fn local_pack_without_service_group_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pack").join("lang").join("python")).unwrap();

        let store = FilesystemPackStore::new(temp.path());
        assert!(store.find_by_language("python").unwrap().is_none());
    }

    #[test]
    fn registered_pack_wins_over_local() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "py-std", &descriptor("py-std", "python"), true);
        write_local_pack(temp.path(), "python");

        let store = FilesystemPackStore::new(temp.path());
        assert_eq!(store.find_by_language("python").unwrap().unwrap().id(), "py-std");
    }

    // ── audit ─────────────────────────────────────────────────────────────

    #[test]
    fn audit_reports_reasons_per_directory() {
        let temp = TempDir::new().unwrap();
        write_pack(temp.path(), "good", &descriptor("good", "go"), true);
        write_pack(temp.path(), "hollow", &descriptor("hollow", "go"), false);
        write_pack(temp.path(), "mangled", "id = [not toml", true);

        let report = FilesystemPackStore::new(temp.path()).audit().unwrap();
        assert_eq!(report.len(), 3);

        let by_dir = |name: &str| report.iter().find(|a| a.directory == name).unwrap();
        assert!(by_dir("good").is_valid());
        assert_eq!(by_dir("good").id.as_deref(), Some("good"));

        let hollow = by_dir("hollow");
        assert!(!hollow.is_valid());
        assert!(hollow.problem.as_deref().unwrap().contains("templates/service"));

        let mangled = by_dir("mangled");
        assert!(!mangled.is_valid());
        assert!(mangled.id.is_none());
    }
}
