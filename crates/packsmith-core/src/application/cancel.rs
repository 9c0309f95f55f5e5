//! Cooperative cancellation.
//!
//! Materialization is synchronous, but callers may hold a [`CancelFlag`]
//! clone on another thread (e.g. a Ctrl-C handler). The materializer checks
//! the flag at each file boundary and aborts the walk with
//! `ApplicationError::Cancelled` instead of silently truncating output.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared, thread-safe cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
