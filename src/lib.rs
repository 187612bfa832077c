//! # es-guard-rust
//!
//! A resource-aware retry guard for search clusters: before a protected
//! operation runs, the guard polls the cluster's per-node health metrics
//! (OS CPU, OS memory, JVM heap) and delays execution with exponential
//! backoff plus jitter until the cluster is healthy or a retry budget is
//! exhausted. It keeps client workloads from hammering a cluster that is
//! already overloaded.
//!
//! ## Overview
//!
//! Three pieces compose the guard:
//!
//! - [`StatsEvaluator`] checks one poll's per-node statistics against the
//!   configured thresholds and reports the first violation it finds.
//! - [`RetryScheduler`] repeatedly fetches and evaluates, sleeping
//!   `backoff * 2^attempt` plus up to a second of jitter between polls.
//! - [`EsGuard`] wires both around an arbitrary operation: the operation runs
//!   exactly once, only after the scheduler confirms a healthy cluster.
//!
//! The guard does no circuit breaking, caches nothing across calls, and
//! never retries the wrapped operation itself; retries apply only to the
//! health-polling phase. Concurrent guarded invocations are fully
//! independent.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use es_guard_rust::{EsGuard, GuardConfig, HttpStatsProvider, TracingSink};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> es_guard_rust::Result<()> {
//!     let provider = HttpStatsProvider::new("http://localhost:9200")?;
//!
//!     let guard = EsGuard::builder()
//!         .with_config(
//!             GuardConfig::new()
//!                 .with_cpu_percent(90.0)
//!                 .with_jvm_heap_used_percent(85.0)
//!                 .with_max_retries(5),
//!         )
//!         .with_provider(Arc::new(provider))
//!         .with_warning_sink(Arc::new(TracingSink))
//!         .build()?;
//!
//!     let indexed = guard
//!         .execute(|| async {
//!             // issue the expensive bulk request here
//!             1024_u64
//!         })
//!         .await?;
//!
//!     println!("indexed {indexed} documents");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`guard`] | [`EsGuard`] and its builder, the public entry point |
//! | [`scheduler`] | Poll/backoff loop with exponential delay and jitter |
//! | [`evaluator`] | Threshold evaluation and violation reporting |
//! | [`config`] | Threshold and retry configuration |
//! | [`stats`] | Per-node and per-cluster statistics value types |
//! | [`provider`] | Stats provider trait and the bundled HTTP implementation |
//! | [`diagnostics`] | Optional warning sink for unhealthy determinations |
//! | [`error`] | Unified error taxonomy |

pub mod config;
pub mod diagnostics;
pub mod evaluator;
pub mod guard;
pub mod provider;
pub mod scheduler;
pub mod stats;

// Re-export main types for convenience
pub use config::GuardConfig;
pub use diagnostics::{NoOpSink, TracingSink, WarningSink};
pub use evaluator::{EvaluationResult, Metric, StatsEvaluator, Violation};
pub use guard::{EsGuard, EsGuardBuilder};
pub use provider::{HttpStatsProvider, StatsProvider, TransportError};
pub use scheduler::RetryScheduler;
pub use stats::{ClusterStats, NodeStats};

/// Crate version, as baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
