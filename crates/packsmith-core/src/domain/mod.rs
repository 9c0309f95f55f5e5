//! Core domain layer for Packsmith.
//!
//! This module contains pure business logic: pack descriptors and their
//! validation rules, template groups with their write policies, the render
//! context, and the placeholder template engine. All I/O lives behind ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: Packs are read-only views, reconstructed fresh
//!   on every discovery

pub mod context;
pub mod error;
pub mod group;
pub mod naming;
pub mod pack;
pub mod template;

// Re-exports for convenience
pub use context::RenderContext;
pub use error::{DomainError, ErrorCategory};
pub use group::{TEMPLATE_SUFFIX, TemplateGroup, WritePolicy};
pub use pack::{DESCRIPTOR_FILE, LOCAL_PACK_VERSION, Pack, PackDescriptor};
