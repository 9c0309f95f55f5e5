//! Pack descriptors and the on-disk pack handle.
//!
//! A *pack* is a named, versioned bundle of template files plus metadata
//! describing what language it scaffolds. Packs live as subdirectories of the
//! packs root, each carrying a [`DESCRIPTOR_FILE`] and a `templates/` subtree
//! with conventional group names (see [`super::group::TemplateGroup`]).
//!
//! Packs are read-only views: discovery reconstructs them fresh on every
//! call, nothing is cached or mutated.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{error::DomainError, group::TemplateGroup, naming};

/// Name of the descriptor file inside each pack directory.
pub const DESCRIPTOR_FILE: &str = "language.toml";

/// Version declared for packs synthesized from a local convention directory.
pub const LOCAL_PACK_VERSION: &str = "0.0.0";

/// Pack metadata as declared in the descriptor file.
///
/// All fields default to empty so that a descriptor with missing keys still
/// parses; [`PackDescriptor::validate`] is where required fields are
/// enforced. This keeps "unparsable" and "structurally invalid" as distinct,
/// individually reportable failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PackDescriptor {
    /// Unique identifier within the packs directory.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Target language this pack scaffolds, matched case-insensitively.
    pub lang: String,
    /// Declared pack version.
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PackDescriptor {
    /// Enforce required descriptor fields.
    ///
    /// `id` and `lang` must be non-blank. Whether the pack also exposes the
    /// required `templates/service` group is a filesystem concern checked by
    /// the pack store's validation pass.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::MissingId);
        }
        if self.lang.trim().is_empty() {
            return Err(DomainError::MissingLang);
        }
        Ok(())
    }

    /// Case-insensitive language match.
    pub fn matches_language(&self, language: &str) -> bool {
        self.lang.trim().to_lowercase() == language.trim().to_lowercase()
    }
}

/// A loaded pack: descriptor plus the directory containing it.
#[derive(Debug, Clone)]
pub struct Pack {
    pub descriptor: PackDescriptor,
    /// Directory containing the descriptor file and the `templates/` subtree.
    pub base_dir: PathBuf,
}

impl Pack {
    pub fn new(descriptor: PackDescriptor, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            descriptor,
            base_dir: base_dir.into(),
        }
    }

    /// Synthesize a pack for a local convention directory
    /// (`pack/lang/<language>`), used when no registered pack matches.
    ///
    /// The descriptor is minimal: `id = "local-<language>"`, a title-cased
    /// display name, and version [`LOCAL_PACK_VERSION`].
    pub fn local(language: &str, base_dir: impl Into<PathBuf>) -> Self {
        let lower = language.to_lowercase();
        let descriptor = PackDescriptor {
            id: format!("local-{lower}"),
            name: format!("{} pack", naming::to_title(&lower)),
            lang: language.to_string(),
            version: LOCAL_PACK_VERSION.to_string(),
            description: None,
        };
        Self::new(descriptor, base_dir)
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn lang(&self) -> &str {
        &self.descriptor.lang
    }

    /// Root of all template groups in this pack.
    pub fn templates_dir(&self) -> PathBuf {
        self.base_dir.join("templates")
    }

    /// Source directory of one template group.
    pub fn group_source(&self, group: TemplateGroup) -> PathBuf {
        self.templates_dir().join(group.dir_name())
    }
}

/// Path of the packs root relative to a repository root.
pub fn packs_dir(root: &Path) -> PathBuf {
    root.join(".packsmith").join("packs")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str, lang: &str) -> PackDescriptor {
        PackDescriptor {
            id: id.into(),
            name: "Test".into(),
            lang: lang.into(),
            version: "1.0.0".into(),
            description: None,
        }
    }

    #[test]
    fn valid_descriptor_passes() {
        assert!(descriptor("go-pack", "go").validate().is_ok());
    }

    #[test]
    fn blank_id_is_rejected() {
        assert_eq!(descriptor("  ", "go").validate(), Err(DomainError::MissingId));
    }

    #[test]
    fn blank_lang_is_rejected() {
        assert_eq!(descriptor("go-pack", "").validate(), Err(DomainError::MissingLang));
    }

    #[test]
    fn language_match_is_case_insensitive() {
        let d = descriptor("go-pack", "Go");
        assert!(d.matches_language("GO"));
        assert!(d.matches_language("go"));
        assert!(!d.matches_language("python"));
    }

    #[test]
    fn local_pack_descriptor_shape() {
        let pack = Pack::local("Python", "/repo/pack/lang/python");
        assert_eq!(pack.id(), "local-python");
        assert_eq!(pack.descriptor.name, "Python pack");
        assert_eq!(pack.descriptor.version, LOCAL_PACK_VERSION);
        assert_eq!(pack.lang(), "Python");
    }

    #[test]
    fn group_source_layout() {
        let pack = Pack::new(descriptor("p", "go"), "/packs/p");
        assert_eq!(
            pack.group_source(TemplateGroup::Service),
            PathBuf::from("/packs/p/templates/service")
        );
    }

    #[test]
    fn descriptor_with_missing_keys_still_parses() {
        // Missing keys default to empty; validation is what rejects them.
        let d: PackDescriptor = toml::from_str("name = \"Half\"").unwrap();
        assert!(d.id.is_empty());
        assert!(d.validate().is_err());
    }
}
