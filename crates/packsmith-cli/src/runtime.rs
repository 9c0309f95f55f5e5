//! Run-mode orchestration stub.
//!
//! Starting services for real (docker compose, minikube) is out of scope;
//! this module simulates build output placement and reports the endpoint a
//! started stack would listen on.

use std::fs;
use std::path::Path;

use crate::error::CliResult;

/// Execution mode for `packsmith run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Local,
    Docker,
    Minikube,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Docker => write!(f, "docker"),
            Self::Minikube => write!(f, "minikube"),
        }
    }
}

/// Default listen port per mode. Pure — no shared state.
pub fn default_port(mode: Mode) -> u16 {
    match mode {
        Mode::Local => 8000,
        Mode::Docker => 10000,
        Mode::Minikube => 2000,
    }
}

/// Simulate a run: ensure the build directory exists and report the
/// endpoint the target would be reachable at.
pub fn run(root: &Path, target: &str, mode: Mode) -> CliResult<String> {
    let target = if target.is_empty() { "all" } else { target };

    let build_path = root.join("build").join(target);
    fs::create_dir_all(&build_path)?;

    Ok(format!("http://localhost:{}", default_port(mode)))
}
