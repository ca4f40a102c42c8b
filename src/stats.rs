//! Operation counters — constructor-injected diagnostics.
//!
//! The manager reports each operation and its outcome to a [`StatsSink`].
//! Sinks are diagnostic only: they must not fail and never influence
//! control flow. The default is [`NoopStats`]; [`TracingStats`] emits
//! counter events through the active subscriber for deployments that
//! scrape structured logs.

use std::sync::Arc;

use tracing::debug;

/// Receiver for operation counters.
pub trait StatsSink: Send + Sync {
    /// Record one occurrence of `metric` (e.g. `delete_user.error`).
    fn incr(&self, metric: &str);
}

/// Sink that discards everything. The default collaborator.
pub struct NoopStats;

impl StatsSink for NoopStats {
    fn incr(&self, _metric: &str) {}
}

/// Sink that emits each counter as a `tracing` event.
pub struct TracingStats;

impl StatsSink for TracingStats {
    fn incr(&self, metric: &str) {
        debug!(metric, "incr");
    }
}

/// Shared handle to the default sink.
pub fn noop() -> Arc<dyn StatsSink> {
    Arc::new(NoopStats)
}
