//! Implementation of the `packsmith run` command.

use std::env;

use crate::{
    cli::{GlobalArgs, RunArgs},
    error::CliResult,
    output::OutputManager,
    runtime::{self, Mode},
};

pub fn execute(args: RunArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let mode = if args.minikube {
        Mode::Minikube
    } else if args.docker {
        Mode::Docker
    } else {
        Mode::Local
    };

    let root = env::current_dir()?;
    let target = args.target.unwrap_or_else(|| "all".to_string());

    let endpoint = runtime::run(&root, &target, mode)?;
    output.print(&format!("Service '{target}' running in {mode} mode at {endpoint}"))?;

    Ok(())
}
