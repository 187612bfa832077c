use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time resource usage for a single cluster node.
///
/// All fields are percentages in 0–100, reported by the stats provider.
/// Snapshots are created fresh on each poll and discarded after evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    pub cpu_percent: f64,
    pub mem_used_percent: f64,
    pub jvm_heap_used_percent: f64,
}

/// One poll's worth of per-node statistics, keyed by node id.
///
/// Backed by a `BTreeMap` so iteration order is stable for a given snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub nodes: BTreeMap<String, NodeStats>,
}

impl ClusterStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_id: impl Into<String>, stats: NodeStats) {
        self.nodes.insert(node_id.into(), stats);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<(String, NodeStats)> for ClusterStats {
    fn from_iter<I: IntoIterator<Item = (String, NodeStats)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
