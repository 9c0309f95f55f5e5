//! Repository and service configuration.
//!
//! Two TOML documents, both owned by the CLI layer (the core crate never
//! sees them):
//!
//! - `.packsmith/defaults.toml` — repository-wide defaults written by
//!   `packsmith init` and read by `packsmith new`.
//! - `services/<name>/service.toml` — per-service configuration persisted
//!   *before* any files are scaffolded, so downstream tooling can read it
//!   even when scaffolding fails halfway.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

// ── Repository defaults ───────────────────────────────────────────────────────

/// Repository-wide defaults stored in `.packsmith/defaults.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RepoDefaults {
    pub backend: BackendDefaults,
    pub frontend: FrontendDefaults,
    pub database: DatabaseDefaults,
}

/// Backend language defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendDefaults {
    pub lang: String,
}

/// Frontend defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendDefaults {
    pub lang: String,
    pub server: String,
    pub client: String,
    #[serde(rename = "packageManager")]
    pub package_manager: String,
}

/// Database defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseDefaults {
    pub engine: String,
}

impl Default for BackendDefaults {
    fn default() -> Self {
        Self { lang: "go".into() }
    }
}

impl Default for FrontendDefaults {
    fn default() -> Self {
        Self {
            lang: "ts".into(),
            server: "next.js".into(),
            client: "react".into(),
            package_manager: "pnpm".into(),
        }
    }
}

impl Default for DatabaseDefaults {
    fn default() -> Self {
        Self {
            engine: "postgres".into(),
        }
    }
}

/// Path of the defaults file under a repository root.
pub fn defaults_path(root: &Path) -> PathBuf {
    root.join(".packsmith").join("defaults.toml")
}

impl RepoDefaults {
    /// Read `.packsmith/defaults.toml`.
    ///
    /// A missing file is a configuration error pointing the user at
    /// `packsmith init`, distinct from unreadable/corrupt files.
    pub fn load(root: &Path) -> CliResult<Self> {
        let path = defaults_path(root);
        let raw = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CliError::ConfigError {
                    message: format!("defaults not found at {}, run packsmith init", path.display()),
                    source: None,
                }
            } else {
                CliError::ConfigError {
                    message: format!("cannot read {}", path.display()),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        toml::from_str(&raw).map_err(|e| CliError::ConfigError {
            message: format!("cannot parse {}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Write `.packsmith/defaults.toml`, creating parent directories.
    pub fn save(&self, root: &Path) -> CliResult<()> {
        let path = defaults_path(root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialised = toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: "cannot serialise repository defaults".into(),
            source: Some(Box::new(e)),
        })?;
        fs::write(&path, serialised)?;
        Ok(())
    }
}

// ── Per-service configuration ─────────────────────────────────────────────────

/// Per-service configuration stored in `services/<name>/service.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    pub general: GeneralConfig,
    #[serde(skip_serializing_if = "DependenciesConfig::is_empty")]
    pub dependencies: DependenciesConfig,
    /// Per-variable, per-mode environment values
    /// (`[environment.DATABASE_URL] local = "…"`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, BTreeMap<String, String>>,
}

/// Basic service metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    pub lang: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub database: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

/// Service dependencies by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DependenciesConfig {
    pub services: Vec<String>,
}

impl DependenciesConfig {
    fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Path of one service's config file.
pub fn service_config_path(root: &Path, service_name: &str) -> PathBuf {
    root.join("services").join(service_name).join("service.toml")
}

impl ServiceConfig {
    /// Reports whether the service declares a database.
    pub fn has_database(&self) -> bool {
        !self.general.database.is_empty()
    }

    /// Reports whether the service declares dependent services.
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.services.is_empty()
    }

    /// Read `services/<name>/service.toml`.
    pub fn load(root: &Path, service_name: &str) -> CliResult<Self> {
        let path = service_config_path(root, service_name);
        let raw = fs::read_to_string(&path).map_err(|e| CliError::ConfigError {
            message: format!("cannot read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        toml::from_str(&raw).map_err(|e| CliError::ConfigError {
            message: format!("cannot parse {}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Write `services/<name>/service.toml`, creating parent directories.
    pub fn save(&self, root: &Path, service_name: &str) -> CliResult<()> {
        let path = service_config_path(root, service_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialised = toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("cannot serialise config for service '{service_name}'"),
            source: Some(Box::new(e)),
        })?;
        fs::write(&path, serialised)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn opinionated_defaults() {
        let d = RepoDefaults::default();
        assert_eq!(d.backend.lang, "go");
        assert_eq!(d.frontend.package_manager, "pnpm");
        assert_eq!(d.database.engine, "postgres");
    }

    #[test]
    fn defaults_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut defaults = RepoDefaults::default();
        defaults.backend.lang = "rust".into();
        defaults.save(temp.path()).unwrap();

        let loaded = RepoDefaults::load(temp.path()).unwrap();
        assert_eq!(loaded, defaults);
    }

    #[test]
    fn missing_defaults_points_at_init() {
        let temp = TempDir::new().unwrap();
        let err = RepoDefaults::load(temp.path()).unwrap_err();
        match err {
            CliError::ConfigError { message, .. } => {
                assert!(message.contains("packsmith init"), "message = {message}");
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn service_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut cfg = ServiceConfig::default();
        cfg.general.lang = "go".into();
        cfg.general.database = "postgres".into();
        cfg.dependencies.services = vec!["billing".into()];
        cfg.environment.insert(
            "DATABASE_URL".into(),
            BTreeMap::from([("local".into(), "postgres://localhost".into())]),
        );

        cfg.save(temp.path(), "orders").unwrap();
        let loaded = ServiceConfig::load(temp.path(), "orders").unwrap();
        assert_eq!(loaded, cfg);
        assert!(loaded.has_database());
        assert!(loaded.has_dependencies());
    }

    #[test]
    fn empty_sections_are_omitted() {
        let cfg = ServiceConfig {
            general: GeneralConfig {
                lang: "go".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let serialised = toml::to_string_pretty(&cfg).unwrap();
        assert!(!serialised.contains("dependencies"));
        assert!(!serialised.contains("environment"));
        assert!(!serialised.contains("external"));
    }

    #[test]
    fn package_manager_uses_original_key() {
        let serialised = toml::to_string_pretty(&RepoDefaults::default()).unwrap();
        assert!(serialised.contains("packageManager"));
    }
}
