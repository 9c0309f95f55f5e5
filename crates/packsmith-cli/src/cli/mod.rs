//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "packsmith",
    bin_name = "packsmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f528} Language-pack service scaffolding",
    long_about = "Packsmith materializes service skeletons in a monorepo from \
                  reusable language packs and repository-wide defaults.",
    after_help = "EXAMPLES:\n\
        \x20 packsmith init .\n\
        \x20 packsmith new orders\n\
        \x20 packsmith new web --frontend\n\
        \x20 packsmith packs list\n\
        \x20 packsmith completions bash > /usr/share/bash-completion/completions/packsmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize repository defaults and structure.
    #[command(
        about = "Initialize repository defaults and structure",
        after_help = "EXAMPLES:\n\
            \x20 packsmith init .\n\
            \x20 packsmith init my-repo --backend-lang go --database postgres"
    )]
    Init(InitArgs),

    /// Create a new service skeleton.
    #[command(
        visible_alias = "n",
        about = "Create a new service skeleton",
        after_help = "EXAMPLES:\n\
            \x20 packsmith new orders\n\
            \x20 packsmith new web --frontend\n\
            \x20 packsmith new gateway --dep orders --dep billing\n\
            \x20 packsmith new external-db --empty"
    )]
    New(NewArgs),

    /// Run services (stub orchestration).
    #[command(
        about = "Run services",
        after_help = "EXAMPLES:\n\
            \x20 packsmith run\n\
            \x20 packsmith run orders --docker"
    )]
    Run(RunArgs),

    /// Run tests (stub orchestration).
    #[command(about = "Run tests")]
    Test(TestArgs),

    /// Manage language packs.
    #[command(
        about = "Manage language packs",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 packsmith packs list\n\
            \x20 packsmith packs validate"
    )]
    Packs(PacksCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 packsmith completions bash > ~/.local/share/bash-completion/completions/packsmith\n\
            \x20 packsmith completions zsh  > ~/.zfunc/_packsmith"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `packsmith init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Repository path to initialize (created if missing).
    #[arg(value_name = "PATH", help = "Repository path")]
    pub path: PathBuf,

    /// Default backend service language.
    #[arg(long = "backend-lang", value_name = "LANG", help = "Default backend language")]
    pub backend_lang: Option<String>,

    /// Default frontend language.
    #[arg(long = "frontend-lang", value_name = "LANG", help = "Default frontend language")]
    pub frontend_lang: Option<String>,

    /// Default frontend server framework.
    #[arg(long = "frontend-server", value_name = "NAME", help = "Default frontend server")]
    pub frontend_server: Option<String>,

    /// Default frontend client library.
    #[arg(long = "frontend-client", value_name = "NAME", help = "Default frontend client")]
    pub frontend_client: Option<String>,

    /// Default database engine.
    #[arg(long = "database", value_name = "ENGINE", help = "Default database engine")]
    pub database: Option<String>,

    /// Default frontend package manager.
    #[arg(
        long = "package-manager",
        value_name = "NAME",
        help = "Default package manager (pnpm, yarn, npm)"
    )]
    pub package_manager: Option<String>,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `packsmith new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Service name.
    #[arg(value_name = "NAME", help = "Service name")]
    pub name: String,

    /// Service language, overriding the repository default.
    #[arg(short = 'l', long = "lang", value_name = "LANGUAGE", help = "Service language")]
    pub language: Option<String>,

    /// Generate an external/empty service (Dockerfile + service.toml only).
    #[arg(long = "empty", help = "Generate an external/empty service")]
    pub empty: bool,

    /// Scaffold a frontend service using the frontend defaults.
    #[arg(long = "frontend", conflicts_with = "empty", help = "Scaffold a frontend service")]
    pub frontend: bool,

    /// Declare a dependency on another service (repeatable).
    #[arg(long = "dep", value_name = "SERVICE", help = "Depend on another service")]
    pub dependencies: Vec<String>,
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `packsmith run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Service to run; all services when omitted.
    #[arg(value_name = "SERVICE", help = "Service to run (default: all)")]
    pub target: Option<String>,

    /// Run services in docker compose.
    #[arg(short = 'd', long = "docker", help = "Run services in docker compose")]
    pub docker: bool,

    /// Run services in minikube.
    #[arg(
        short = 'm',
        long = "minikube",
        conflicts_with = "docker",
        help = "Run services in minikube"
    )]
    pub minikube: bool,
}

// ── test ──────────────────────────────────────────────────────────────────────

/// Arguments for `packsmith test`.
#[derive(Debug, Args)]
pub struct TestArgs {
    /// Service path to test; all services when omitted.
    #[arg(value_name = "PATH", help = "Service path to test (default: all)")]
    pub target: Option<String>,
}

// ── packs subcommands ─────────────────────────────────────────────────────────

/// Subcommands for `packsmith packs`.
#[derive(Debug, Subcommand)]
pub enum PacksCommands {
    /// List available language packs.
    List,
    /// Validate all language packs, reporting why invalid ones fail.
    Validate,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `packsmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from(["packsmith", "new", "orders", "--lang", "go"]);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.name, "orders");
                assert_eq!(args.language.as_deref(), Some("go"));
            }
            other => panic!("expected New, got {other:?}"),
        }
    }

    #[test]
    fn new_collects_repeated_deps() {
        let cli = Cli::parse_from(["packsmith", "new", "gateway", "--dep", "orders", "--dep", "billing"]);
        if let Commands::New(args) = cli.command {
            assert_eq!(args.dependencies, vec!["orders", "billing"]);
        } else {
            panic!("expected New command");
        }
    }

    #[test]
    fn empty_and_frontend_conflict() {
        let result = Cli::try_parse_from(["packsmith", "new", "x", "--empty", "--frontend"]);
        assert!(result.is_err());
    }

    #[test]
    fn docker_and_minikube_conflict() {
        let result = Cli::try_parse_from(["packsmith", "run", "--docker", "--minikube"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["packsmith", "--quiet", "--verbose", "test"]);
        assert!(result.is_err());
    }

    #[test]
    fn packs_subcommands_parse() {
        assert!(matches!(
            Cli::parse_from(["packsmith", "packs", "list"]).command,
            Commands::Packs(PacksCommands::List)
        ));
        assert!(matches!(
            Cli::parse_from(["packsmith", "packs", "validate"]).command,
            Commands::Packs(PacksCommands::Validate)
        ));
    }
}
