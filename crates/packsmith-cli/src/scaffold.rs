//! Repository initialization and built-in fallback scaffolding.
//!
//! Language packs are the preferred way to scaffold a service; this module
//! covers everything around them: creating the repository structure
//! (`packsmith init`), the built-in skeletons used when no pack matches the
//! service language, dependency stubs, and the post-scaffold bookkeeping
//! (doc instructions, `.gitignore` maintenance, lockfile reconciliation).

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use crate::config::{RepoDefaults, ServiceConfig};
use crate::error::CliResult;

/// Overrides applied to the opinionated defaults during `packsmith init`.
#[derive(Debug, Default)]
pub struct InitOptions {
    pub backend_lang: Option<String>,
    pub frontend_lang: Option<String>,
    pub frontend_server: Option<String>,
    pub frontend_client: Option<String>,
    pub database_engine: Option<String>,
    pub package_manager: Option<String>,
}

/// What kind of skeleton `packsmith new` should produce when no pack applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceShape {
    Backend,
    Frontend,
    /// External/empty service: Dockerfile + README only.
    Empty,
}

// ── Repository initialization ─────────────────────────────────────────────────

/// Create the repository structure and persist defaults.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn init_repo(root: &Path, opts: InitOptions) -> CliResult<RepoDefaults> {
    let mut defaults = RepoDefaults::default();
    if let Some(lang) = opts.backend_lang {
        defaults.backend.lang = lang;
    }
    if let Some(lang) = opts.frontend_lang {
        defaults.frontend.lang = lang;
    }
    if let Some(server) = opts.frontend_server {
        defaults.frontend.server = server;
    }
    if let Some(client) = opts.frontend_client {
        defaults.frontend.client = client;
    }
    if let Some(engine) = opts.database_engine {
        defaults.database.engine = engine;
    }
    if let Some(manager) = opts.package_manager {
        defaults.frontend.package_manager = manager;
    }

    for dir in [
        root.join(".packsmith"),
        root.join(".packsmith").join("instructions"),
        root.join("services"),
        root.join("build"),
    ] {
        fs::create_dir_all(&dir)?;
    }

    defaults.save(root)?;
    ensure_build_ignored(root)?;
    Ok(defaults)
}

/// Append `build/` to `.gitignore` unless it is already listed.
pub fn ensure_build_ignored(root: &Path) -> CliResult<()> {
    let path = root.join(".gitignore");
    let existing = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    if existing.contains("build/") {
        return Ok(());
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str("build/\n");
    fs::write(&path, updated)?;
    Ok(())
}

// ── Service configuration planning ────────────────────────────────────────────

/// Build the persisted configuration for a new service from the repository
/// defaults and the requested shape.
pub fn plan_service_config(
    defaults: &RepoDefaults,
    shape: ServiceShape,
    lang_override: Option<&str>,
    dependencies: &[String],
) -> ServiceConfig {
    let mut cfg = ServiceConfig::default();

    match shape {
        ServiceShape::Empty => {
            cfg.general.lang = defaults.backend.lang.clone();
            cfg.general.external = true;
        }
        ServiceShape::Frontend => {
            cfg.general.lang = defaults.frontend.lang.clone();
        }
        ServiceShape::Backend => {
            cfg.general.lang = defaults.backend.lang.clone();
            if !defaults.database.engine.is_empty() {
                cfg.general.database = defaults.database.engine.clone();
            }
        }
    }

    if let Some(lang) = lang_override {
        cfg.general.lang = lang.to_string();
    }
    if !dependencies.is_empty() {
        cfg.dependencies.services = dependencies.to_vec();
    }

    cfg
}

// ── Built-in skeletons (no pack matched) ──────────────────────────────────────

/// Produce the built-in skeleton for a service.
#[instrument(skip_all, fields(service = %name, shape = ?shape))]
pub fn scaffold_fallback(
    root: &Path,
    name: &str,
    shape: ServiceShape,
    cfg: &ServiceConfig,
    defaults: &RepoDefaults,
) -> CliResult<()> {
    let service_path = root.join("services").join(name);
    fs::create_dir_all(&service_path)?;

    match shape {
        ServiceShape::Empty => scaffold_empty(&service_path, cfg),
        ServiceShape::Frontend => scaffold_frontend(&service_path, name, defaults),
        ServiceShape::Backend => scaffold_backend(&service_path, name, cfg),
    }
}

fn scaffold_empty(service_path: &Path, cfg: &ServiceConfig) -> CliResult<()> {
    write_file(&service_path.join("Dockerfile"), &default_dockerfile(&cfg.general.lang))?;
    write_file(
        &service_path.join("README.md"),
        &service_readme(&base_name(service_path)),
    )?;
    Ok(())
}

fn scaffold_backend(service_path: &Path, name: &str, cfg: &ServiceConfig) -> CliResult<()> {
    let mut required_dirs = vec![
        service_path.join("api"),
        service_path.join("core"),
        service_path.join("server"),
    ];
    if cfg.has_database() {
        required_dirs.push(service_path.join("database"));
    }
    // Stub and client directories only make sense for internal services.
    if !cfg.general.external {
        required_dirs.push(service_path.join("stub"));
        required_dirs.push(service_path.join("client"));
    }
    for dir in &required_dirs {
        fs::create_dir_all(dir)?;
    }

    write_file(&service_path.join("Dockerfile"), &default_dockerfile(&cfg.general.lang))?;
    write_file(&service_path.join("README.md"), &service_readme(name))?;

    let api_content = if cfg.general.lang.eq_ignore_ascii_case("go") {
        go_api_template(name)
    } else {
        generic_api_comment()
    };
    write_file(&service_path.join("api").join("types.go"), &api_content)?;

    // Mock directory for testing this service itself.
    fs::create_dir_all(service_path.join("mock"))?;
    Ok(())
}

fn scaffold_frontend(service_path: &Path, name: &str, defaults: &RepoDefaults) -> CliResult<()> {
    for dir in ["app", "components", "public"] {
        fs::create_dir_all(service_path.join(dir))?;
    }

    write_file(&service_path.join("Dockerfile"), frontend_dockerfile())?;
    write_file(&service_path.join("README.md"), &service_readme(name))?;
    write_file(&service_path.join("package.json"), &frontend_package_json(name))?;
    write_file(
        &service_path.join(package_lock_name(&defaults.frontend.package_manager)),
        "{}",
    )?;
    // Minimal Next.js app directory content.
    write_file(
        &service_path.join("app").join("page.tsx"),
        "export default function Page() { return <main>hello</main> }\n",
    )?;
    write_file(
        &service_path.join("app").join("layout.tsx"),
        "export default function RootLayout({ children }: { children: React.ReactNode }) { return <html><body>{children}</body></html> }\n",
    )?;
    Ok(())
}

// ── Dependency stubs & bookkeeping ────────────────────────────────────────────

/// Ensure an already-existing dependency service has `stub/`, `mock/` and
/// `client/` directories. A dependency that does not exist yet is skipped.
pub fn ensure_dependency_stubs(root: &Path, dep_name: &str) -> CliResult<()> {
    let dep_path = root.join("services").join(dep_name);
    if !dep_path.is_dir() {
        debug!(dependency = %dep_name, "dependency service absent, skipping stubs");
        return Ok(());
    }

    for dir in ["stub", "mock", "client"] {
        fs::create_dir_all(dep_path.join(dir))?;
    }
    Ok(())
}

/// Drop a timestamped documentation-update instruction for the new service.
pub fn add_doc_instruction(root: &Path, service_name: &str) -> CliResult<()> {
    let instructions_dir = root.join(".packsmith").join("instructions");
    fs::create_dir_all(&instructions_dir)?;

    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    let body = format!(
        "# Update Instructions - {stamp}\n\n## Service: {service_name}\n\n\
         Please update README.md and related docs for the new service. \
         After completing, delete this file.\n"
    );
    fs::write(instructions_dir.join(format!("{stamp}.md")), body)?;
    Ok(())
}

/// Reconcile the Go dependency lockfile after a pack was applied.
///
/// Failure here must not roll back already-written files; callers downgrade
/// the error to a warning.
pub fn reconcile_lockfile(root: &Path) -> io::Result<()> {
    let status = Command::new("go")
        .args(["mod", "tidy"])
        .current_dir(root)
        .status()?;
    if !status.success() {
        return Err(io::Error::other(format!("go mod tidy exited with {status}")));
    }
    Ok(())
}

// ── Content builders ──────────────────────────────────────────────────────────

fn write_file(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn service_readme(name: &str) -> String {
    format!("# {name}\n\nService scaffold generated by packsmith.\n")
}

fn default_dockerfile(lang: &str) -> String {
    format!("# Dockerfile for {lang} service\nFROM alpine\nCMD [\"echo\", \"stub\"]\n")
}

fn frontend_dockerfile() -> &'static str {
    "# Dockerfile for frontend service\nFROM node:18-alpine\nCMD [\"node\", \"server.js\"]\n"
}

fn frontend_package_json(name: &str) -> String {
    format!(
        r#"{{
  "name": "{name}",
  "private": true,
  "scripts": {{
    "dev": "next dev",
    "build": "next build",
    "start": "next start"
  }},
  "dependencies": {{
    "next": "latest",
    "react": "latest",
    "react-dom": "latest"
  }}
}}
"#
    )
}

fn package_lock_name(manager: &str) -> &'static str {
    match manager.to_lowercase().as_str() {
        "pnpm" => "pnpm-lock.yaml",
        "yarn" => "yarn.lock",
        _ => "package-lock.json",
    }
}

fn go_api_template(service_name: &str) -> String {
    format!(
        "package api\n\n\
         // Service defines the interface for {service_name}.\n\
         type Service interface {{\n\
         \t// Add your service methods here\n\
         }}\n\n\
         // Request and response types for your service\n\
         type Request struct {{\n\
         }}\n\n\
         type Response struct {{\n\
         }}\n"
    )
}

fn generic_api_comment() -> String {
    "// api package contains service interfaces and data structures.\n\
     // Implement these in core/, consume in client/, serve in server/,\n\
     // and stub/mock for testing.\n"
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
