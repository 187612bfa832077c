//! Threshold evaluation of per-node cluster statistics.

use crate::config::GuardConfig;
use crate::diagnostics::{NoOpSink, WarningSink};
use crate::stats::ClusterStats;
use std::fmt;
use std::sync::Arc;

/// Metrics checked against their configured ceilings, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    OsCpu,
    OsMem,
    JvmHeap,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::OsCpu => "OS CPU",
            Metric::OsMem => "OS MEM",
            Metric::JvmHeap => "JVM heap",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single threshold breach: which node, which metric, measured vs. ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub node: String,
    pub metric: Metric,
    pub measured: f64,
    pub threshold: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node({}) {} usage {}% over {}%",
            self.node, self.metric, self.measured, self.threshold
        )
    }
}

/// Outcome of evaluating one poll of cluster statistics.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    Healthy,
    Unhealthy(Violation),
}

impl EvaluationResult {
    pub fn is_healthy(&self) -> bool {
        matches!(self, EvaluationResult::Healthy)
    }
}

/// Checks cluster statistics against configured thresholds.
pub struct StatsEvaluator {
    sink: Arc<dyn WarningSink>,
}

impl StatsEvaluator {
    pub fn new(sink: Arc<dyn WarningSink>) -> Self {
        Self { sink }
    }

    /// Evaluate one snapshot against the active thresholds.
    ///
    /// Nodes are visited in map order; per node the checks run OS CPU, then
    /// OS memory, then JVM heap. The first breach wins: one warning goes to
    /// the sink and evaluation stops. A threshold `<= 0` is never checked,
    /// and an empty cluster is healthy.
    pub fn evaluate(&self, stats: &ClusterStats, config: &GuardConfig) -> EvaluationResult {
        for (node, node_stats) in &stats.nodes {
            let checks = [
                (Metric::OsCpu, node_stats.cpu_percent, config.cpu_percent),
                (
                    Metric::OsMem,
                    node_stats.mem_used_percent,
                    config.mem_used_percent,
                ),
                (
                    Metric::JvmHeap,
                    node_stats.jvm_heap_used_percent,
                    config.jvm_heap_used_percent,
                ),
            ];

            for (metric, measured, threshold) in checks {
                if threshold > 0.0 && measured >= threshold {
                    let violation = Violation {
                        node: node.clone(),
                        metric,
                        measured,
                        threshold,
                    };
                    self.sink.warn(&violation.to_string());
                    return EvaluationResult::Unhealthy(violation);
                }
            }
        }

        EvaluationResult::Healthy
    }
}

impl Default for StatsEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(NoOpSink))
    }
}
