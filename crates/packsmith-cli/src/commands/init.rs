//! Implementation of the `packsmith init` command.

use std::fs;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::defaults_path,
    error::CliResult,
    output::OutputManager,
    scaffold::{self, InitOptions},
};

/// Create the repository structure and write defaults.
pub fn execute(args: InitArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    fs::create_dir_all(&args.path)?;
    let root = args.path.canonicalize()?;

    let defaults = scaffold::init_repo(
        &root,
        InitOptions {
            backend_lang: args.backend_lang,
            frontend_lang: args.frontend_lang,
            frontend_server: args.frontend_server,
            frontend_client: args.frontend_client,
            database_engine: args.database,
            package_manager: args.package_manager,
        },
    )?;

    output.success(&format!("Defaults written to {}", defaults_path(&root).display()))?;
    output.print(&format!("Backend language: {}", defaults.backend.lang))?;
    output.print(&format!(
        "Frontend: {} ({} + {})",
        defaults.frontend.lang, defaults.frontend.server, defaults.frontend.client
    ))?;
    output.print(&format!("Database: {}", defaults.database.engine))?;

    Ok(())
}
