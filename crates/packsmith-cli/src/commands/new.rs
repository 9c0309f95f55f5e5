//! Implementation of the `packsmith new` command.
//!
//! Responsibility: translate CLI arguments into a service plan, drive the
//! core scaffold service (packs first, built-in skeleton as fallback), and
//! display results. No scaffolding logic lives here.

use std::env;

use tracing::{debug, info, instrument};

use packsmith_adapters::{FilesystemMaterializer, FilesystemPackStore, GoModDetector};
use packsmith_core::{
    application::{ApplicationError, CancelFlag, ScaffoldService},
    error::PacksmithError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::RepoDefaults,
    error::{CliError, CliResult},
    output::OutputManager,
    scaffold::{self, ServiceShape},
};

/// Execute the `packsmith new` command.
///
/// Dispatch sequence:
/// 1. Validate the service name
/// 2. Load repository defaults and plan the service configuration
/// 3. Persist `service.toml` (before any files, so downstream tooling can
///    read it even on partial failure)
/// 4. Apply a matching language pack, or the built-in skeleton when none
///    matches
/// 5. Ensure dependency stubs, drop the doc instruction, reconcile the
///    lockfile
#[instrument(skip_all, fields(service = %args.name))]
pub fn execute(args: NewArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let name = args.name.trim().to_string();
    validate_service_name(&name)?;

    let root = env::current_dir()?;
    let defaults = RepoDefaults::load(&root)?;

    let shape = if args.empty {
        ServiceShape::Empty
    } else if args.frontend {
        ServiceShape::Frontend
    } else {
        ServiceShape::Backend
    };

    let cfg = scaffold::plan_service_config(
        &defaults,
        shape,
        args.language.as_deref(),
        &args.dependencies,
    );
    cfg.save(&root, &name)?;

    // Packs take precedence; the built-in skeleton only covers the gap when
    // no pack matches the service language.
    let mut applied_pack = None;
    if shape == ServiceShape::Empty {
        scaffold::scaffold_fallback(&root, &name, shape, &cfg, &defaults)?;
    } else {
        let service = ScaffoldService::new(
            Box::new(FilesystemPackStore::new(&root)),
            Box::new(FilesystemMaterializer::new()),
            Box::new(GoModDetector::new()),
        );

        match service.create_service(&root, &name, &cfg.general.lang, &CancelFlag::new()) {
            Ok(outcome) => {
                info!(pack = %outcome.pack_id, files = outcome.stats.files_written, "pack applied");
                applied_pack = Some(outcome);
            }
            Err(PacksmithError::Application(ApplicationError::PackNotFound { .. })) => {
                debug!(lang = %cfg.general.lang, "no pack matched, using built-in skeleton");
                scaffold::scaffold_fallback(&root, &name, shape, &cfg, &defaults)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if cfg.has_dependencies() {
        for dep in &cfg.dependencies.services {
            scaffold::ensure_dependency_stubs(&root, dep)?;
        }
    }

    scaffold::add_doc_instruction(&root, &name)?;

    // Lockfile reconciliation is best-effort: a failure is reported but the
    // already-written files stay in place.
    if applied_pack.is_some() && cfg.general.lang.eq_ignore_ascii_case("go") {
        if let Err(e) = scaffold::reconcile_lockfile(&root) {
            output.warning(&format!("go mod tidy failed: {e}"))?;
        }
    }

    match &applied_pack {
        Some(outcome) => output.success(&format!(
            "Service '{name}' created from pack '{}' in services/{name}",
            outcome.pack_id
        ))?,
        None => output.success(&format!("Service '{name}' created in services/{name}"))?,
    }

    Ok(())
}

fn validate_service_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidServiceName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidServiceName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CliError::InvalidServiceName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    Ok(())
}
