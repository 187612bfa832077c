//! Stats provider seam.
//!
//! The guard never talks to the cluster directly: it consumes a
//! [`StatsProvider`] supplied at construction time. [`HttpStatsProvider`] is
//! the bundled implementation for clusters exposing the nodes-stats REST
//! endpoint; tests and embedders can inject anything that implements the
//! trait.

mod http;

pub use http::HttpStatsProvider;

use crate::stats::ClusterStats;
use async_trait::async_trait;

/// Source of per-node OS and JVM statistics for the cluster.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch a fresh per-node snapshot. Called once per poll attempt; results
    /// are never cached across polls.
    async fn cluster_stats(&self) -> crate::Result<ClusterStats>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed stats payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
