//! Warning diagnostics emitted while the guard waits on an unhealthy cluster.
//!
//! The sink is optional wiring: a guard built without one drops warnings
//! silently via [`NoOpSink`]. Production setups usually want [`TracingSink`].

use std::sync::Arc;

/// Sink for warning-level diagnostics.
///
/// The evaluator calls [`warn`](WarningSink::warn) exactly once per unhealthy
/// determination, with a message naming the node, metric, measured value, and
/// threshold.
pub trait WarningSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Drops every warning. The default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl WarningSink for NoOpSink {
    fn warn(&self, _message: &str) {}
}

/// Forwards warnings to `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

impl<T: WarningSink + ?Sized> WarningSink for Arc<T> {
    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
}
