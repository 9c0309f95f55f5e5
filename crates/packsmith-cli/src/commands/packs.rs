//! Implementation of the `packsmith packs` subcommands.
//!
//! `list` enumerates the valid packs (invalid directories are silently
//! excluded, same as resolution sees them). `validate` is the loud variant:
//! every pack directory gets a verdict with the reason it fails.

use std::env;

use packsmith_core::application::ports::PackStore;

use packsmith_adapters::FilesystemPackStore;

use crate::{
    cli::{GlobalArgs, PacksCommands},
    error::{CliError, CliResult},
    output::OutputManager,
};

const NO_PACKS_MESSAGE: &str = "No packs found in .packsmith/packs";

pub fn execute(cmd: PacksCommands, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let root = env::current_dir()?;
    let store = FilesystemPackStore::new(&root);

    match cmd {
        PacksCommands::List => {
            let packs = store.discover().map_err(CliError::Core)?;
            if packs.is_empty() {
                output.print(NO_PACKS_MESSAGE)?;
                return Ok(());
            }

            output.header("Registered language packs:")?;
            for pack in packs {
                output.print(&format!(
                    "  {}\t{}\t(lang={}, v={})",
                    pack.id(),
                    pack.descriptor.name,
                    pack.lang(),
                    pack.descriptor.version
                ))?;
            }
        }

        PacksCommands::Validate => {
            let report = store.audit().map_err(CliError::Core)?;
            if report.is_empty() {
                output.print(NO_PACKS_MESSAGE)?;
                return Ok(());
            }

            for entry in report {
                let label = entry.id.clone().unwrap_or_else(|| entry.directory.clone());
                match &entry.problem {
                    None => output.print(&format!("{label}: OK"))?,
                    Some(reason) => output.print(&format!("{label}: INVALID ({reason})"))?,
                }
            }
        }
    }

    Ok(())
}
