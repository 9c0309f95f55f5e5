//! Infrastructure adapters for Packsmith.
//!
//! This crate implements the ports defined in
//! `packsmith_core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod materializer;
pub mod pack_store;
pub mod project;

// Re-export commonly used adapters
pub use materializer::FilesystemMaterializer;
pub use pack_store::FilesystemPackStore;
pub use project::GoModDetector;
