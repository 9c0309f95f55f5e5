//! Template groups and their write policies.
//!
//! A pack's `templates/` subtree is divided into named groups, each mapped to
//! a different destination root and a different overwrite behavior:
//!
//! | Group     | Destination          | Policy                          |
//! |-----------|----------------------|---------------------------------|
//! | `service` | `services/<name>/`   | overwrite (destination is new)  |
//! | `common`  | `services/common/`   | destructive replace             |
//! | `root`    | repository root      | overwrite (pack files win)      |
//!
//! `common` is fully replaced — the destination is removed and recreated — so
//! stale generated files from an earlier pack version cannot linger.

use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix stripped from destination filenames during materialization.
/// A file carrying it is always treated as text and rendered.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Named source subtree within a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateGroup {
    Service,
    Common,
    Root,
}

impl TemplateGroup {
    /// Application order. Parent trees first so that `root`-level manifests
    /// land after the service files they reference exist.
    pub const ALL: [TemplateGroup; 3] = [Self::Service, Self::Common, Self::Root];

    /// Directory name under the pack's `templates/` root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Common => "common",
            Self::Root => "root",
        }
    }

    /// Write policy applied when materializing this group.
    pub fn policy(self) -> WritePolicy {
        match self {
            Self::Service => WritePolicy::Overwrite,
            Self::Common => WritePolicy::Replace,
            Self::Root => WritePolicy::Overwrite,
        }
    }

    /// Only the `service` group must exist for a pack to be applicable.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Service)
    }

    /// Destination root for this group's files.
    pub fn destination(self, root: &Path, service_name: &str) -> PathBuf {
        match self {
            Self::Service => root.join("services").join(service_name),
            Self::Common => root.join("services").join("common"),
            Self::Root => root.to_path_buf(),
        }
    }
}

impl fmt::Display for TemplateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// How the materializer treats pre-existing destination files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Skip files whose destination already exists — never clobber user
    /// edits in non-authoritative trees.
    Preserve,
    /// Replace individual files; untracked destination files survive.
    Overwrite,
    /// Remove the whole destination tree before writing.
    Replace,
}
