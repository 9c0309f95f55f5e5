//! Packsmith Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Packsmith
//! service scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          packsmith-cli (CLI)            │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (ScaffoldService)             │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (PackStore, TreeMaterializer, Detector) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   packsmith-adapters (Infrastructure)   │
//! │ (FilesystemPackStore, Materializer, …)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Pack, TemplateGroup, RenderContext, …) │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancelFlag, PackInfo, ScaffoldOutcome, ScaffoldService,
        ports::{MaterializeStats, PackAudit, PackStore, ProjectDetector, TreeMaterializer},
    };
    pub use crate::domain::{
        DESCRIPTOR_FILE, Pack, PackDescriptor, RenderContext, TEMPLATE_SUFFIX, TemplateGroup,
        WritePolicy,
    };
    pub use crate::error::{PacksmithError, PacksmithResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
