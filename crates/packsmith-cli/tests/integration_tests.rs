//! Integration tests for packsmith-cli.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn packsmith() -> Command {
    Command::cargo_bin("packsmith").unwrap()
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    packsmith()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("packs"));
}

#[test]
fn version_flag() {
    packsmith()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_args_shows_help_and_fails() {
    packsmith().assert().failure();
}

// ── init ──────────────────────────────────────────────────────────────────────

#[test]
fn init_creates_structure_and_defaults() {
    let temp = TempDir::new().unwrap();

    packsmith()
        .current_dir(temp.path())
        .args(["init", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Defaults written to"));

    assert!(temp.path().join(".packsmith/defaults.toml").is_file());
    assert!(temp.path().join(".packsmith/instructions").is_dir());
    assert!(temp.path().join("services").is_dir());
    assert!(temp.path().join("build").is_dir());

    let gitignore = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
    assert!(gitignore.contains("build/"));
}

#[test]
fn init_honours_overrides() {
    let temp = TempDir::new().unwrap();

    packsmith()
        .current_dir(temp.path())
        .args(["init", ".", "--backend-lang", "rust", "--database", "sqlite"])
        .assert()
        .success();

    let defaults = fs::read_to_string(temp.path().join(".packsmith/defaults.toml")).unwrap();
    assert!(defaults.contains("rust"));
    assert!(defaults.contains("sqlite"));
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn new_without_init_fails_with_configuration_error() {
    let temp = TempDir::new().unwrap();

    packsmith()
        .current_dir(temp.path())
        .args(["new", "orders"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("packsmith init"));
}

#[test]
fn new_rejects_invalid_names() {
    let temp = TempDir::new().unwrap();

    packsmith()
        .current_dir(temp.path())
        .args(["new", ".hidden"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid service name"));
}

#[test]
fn new_empty_service_writes_minimal_files() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    packsmith()
        .current_dir(temp.path())
        .args(["new", "vendor-db", "--empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let service = temp.path().join("services/vendor-db");
    assert!(service.join("Dockerfile").is_file());
    assert!(service.join("README.md").is_file());
    assert!(service.join("service.toml").is_file());
    assert!(!service.join("api").exists());

    let cfg = fs::read_to_string(service.join("service.toml")).unwrap();
    assert!(cfg.contains("external = true"));
}

#[test]
fn new_backend_service_uses_builtin_skeleton_without_packs() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    packsmith()
        .current_dir(temp.path())
        .args(["new", "orders"])
        .assert()
        .success();

    let service = temp.path().join("services/orders");
    for dir in ["api", "core", "server", "database", "stub", "client", "mock"] {
        assert!(service.join(dir).is_dir(), "missing {dir}/");
    }
    let api = fs::read_to_string(service.join("api/types.go")).unwrap();
    assert!(api.contains("interface for orders"));

    // An instruction file is dropped for the documentation follow-up.
    let instructions: Vec<_> = fs::read_dir(temp.path().join(".packsmith/instructions"))
        .unwrap()
        .collect();
    assert_eq!(instructions.len(), 1);
}

#[test]
fn new_applies_local_convention_pack() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    // Vendored, unregistered pack for the default backend language.
    let service_templates = temp.path().join("pack/lang/go/templates/service");
    fs::create_dir_all(&service_templates).unwrap();
    fs::write(
        service_templates.join("hello.txt.tmpl"),
        "Hello {{ServiceName}}",
    )
    .unwrap();

    packsmith()
        .current_dir(temp.path())
        .args(["new", "orders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local-go"));

    let service = temp.path().join("services/orders");
    assert_eq!(
        fs::read_to_string(service.join("hello.txt")).unwrap(),
        "Hello orders"
    );
    assert!(!service.join("hello.txt.tmpl").exists());
    // The pack replaced the skeleton, not the persisted config.
    assert!(service.join("service.toml").is_file());
}

#[test]
fn new_with_dependencies_stubs_existing_services() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    packsmith()
        .current_dir(temp.path())
        .args(["new", "billing", "--empty"])
        .assert()
        .success();

    packsmith()
        .current_dir(temp.path())
        .args(["new", "gateway", "--dep", "billing", "--dep", "ghost"])
        .assert()
        .success();

    let billing = temp.path().join("services/billing");
    for dir in ["stub", "mock", "client"] {
        assert!(billing.join(dir).is_dir(), "billing missing {dir}/");
    }
    // Unknown dependency services are skipped, not created.
    assert!(!temp.path().join("services/ghost").exists());
}

// ── packs ─────────────────────────────────────────────────────────────────────

#[test]
fn packs_list_reports_empty_repository() {
    let temp = TempDir::new().unwrap();

    packsmith()
        .current_dir(temp.path())
        .args(["packs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No packs found"));
}

#[test]
fn packs_list_shows_registered_packs() {
    let temp = TempDir::new().unwrap();
    write_pack(temp.path(), "go-std", "go", true);

    packsmith()
        .current_dir(temp.path())
        .args(["packs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("go-std"))
        .stdout(predicate::str::contains("lang=go"));
}

#[test]
fn packs_validate_reports_reasons() {
    let temp = TempDir::new().unwrap();
    write_pack(temp.path(), "go-std", "go", true);
    write_pack(temp.path(), "hollow", "python", false);

    packsmith()
        .current_dir(temp.path())
        .args(["packs", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("go-std: OK"))
        .stdout(predicate::str::contains("INVALID"))
        .stdout(predicate::str::contains("templates/service"));
}

// ── run / test stubs ──────────────────────────────────────────────────────────

#[test]
fn run_reports_endpoint_and_places_build_dir() {
    let temp = TempDir::new().unwrap();

    packsmith()
        .current_dir(temp.path())
        .args(["run", "orders", "--docker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docker"))
        .stdout(predicate::str::contains("http://localhost:10000"));

    assert!(temp.path().join("build/orders").is_dir());
}

#[test]
fn test_command_is_a_dry_run() {
    let temp = TempDir::new().unwrap();

    packsmith()
        .current_dir(temp.path())
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run]"));
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn init_repo(root: &Path) {
    packsmith()
        .current_dir(root)
        .args(["init", "."])
        .assert()
        .success();
}

fn write_pack(root: &Path, dir_name: &str, lang: &str, with_service: bool) {
    let dir = root.join(".packsmith/packs").join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("language.toml"),
        format!("id = \"{dir_name}\"\nname = \"{dir_name}\"\nlang = \"{lang}\"\nversion = \"1.0.0\"\n"),
    )
    .unwrap();
    if with_service {
        fs::create_dir_all(dir.join("templates/service")).unwrap();
    }
}
