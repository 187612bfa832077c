use super::{StatsProvider, TransportError};
use crate::stats::{ClusterStats, NodeStats};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

/// Path polled on every attempt, filtered to the two metric groups the guard
/// reads.
const NODES_STATS_PATH: &str = "/_nodes/stats/os,jvm";

/// Stats provider backed by the cluster's nodes-stats REST endpoint.
pub struct HttpStatsProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    basic_auth: Option<(String, String)>,
}

impl HttpStatsProvider {
    /// Build a provider for the cluster at `base_url`.
    ///
    /// Request timeout defaults to 30 seconds (env-overridable via
    /// `ES_GUARD_HTTP_TIMEOUT_SECS`). The provider imposes no timeout of its
    /// own beyond the HTTP client's.
    pub fn new(base_url: impl Into<String>) -> crate::Result<Self> {
        let timeout_secs = env::var("ES_GUARD_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            basic_auth: None,
        })
    }

    /// Authenticate with a bearer token
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Authenticate with HTTP basic auth
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }
}

#[async_trait]
impl StatsProvider for HttpStatsProvider {
    async fn cluster_stats(&self) -> crate::Result<ClusterStats> {
        let url = format!("{}{}", self.base_url, NODES_STATS_PATH);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some((user, pass)) = &self.basic_auth {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request.send().await.map_err(TransportError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
            }
            .into());
        }

        let body = response.bytes().await.map_err(TransportError::Http)?;
        let parsed: NodesStatsResponse =
            serde_json::from_slice(&body).map_err(TransportError::Malformed)?;
        Ok(parsed.into())
    }
}

/// Wire shape of the nodes-stats response, reduced to the fields the guard
/// reads. Unknown fields are ignored; a missing metric field is a malformed
/// payload.
#[derive(Debug, Deserialize)]
struct NodesStatsResponse {
    nodes: BTreeMap<String, NodeEnvelope>,
}

#[derive(Debug, Deserialize)]
struct NodeEnvelope {
    os: OsSection,
    jvm: JvmSection,
}

#[derive(Debug, Deserialize)]
struct OsSection {
    cpu: CpuSection,
    mem: MemSection,
}

#[derive(Debug, Deserialize)]
struct CpuSection {
    percent: f64,
}

#[derive(Debug, Deserialize)]
struct MemSection {
    used_percent: f64,
}

#[derive(Debug, Deserialize)]
struct JvmSection {
    mem: JvmMemSection,
}

#[derive(Debug, Deserialize)]
struct JvmMemSection {
    heap_used_percent: f64,
}

impl From<NodesStatsResponse> for ClusterStats {
    fn from(response: NodesStatsResponse) -> Self {
        response
            .nodes
            .into_iter()
            .map(|(id, node)| {
                (
                    id,
                    NodeStats {
                        cpu_percent: node.os.cpu.percent,
                        mem_used_percent: node.os.mem.used_percent,
                        jvm_heap_used_percent: node.jvm.mem.heap_used_percent,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_payload_converts_to_cluster_stats() {
        let body = r#"{
            "cluster_name": "docs",
            "nodes": {
                "n1": {
                    "name": "node-a",
                    "os": {"cpu": {"percent": 12.0}, "mem": {"used_percent": 34.5}},
                    "jvm": {"mem": {"heap_used_percent": 56.0}}
                }
            }
        }"#;

        let parsed: NodesStatsResponse = serde_json::from_str(body).unwrap();
        let stats: ClusterStats = parsed.into();

        assert_eq!(stats.len(), 1);
        let node = &stats.nodes["n1"];
        assert_eq!(node.cpu_percent, 12.0);
        assert_eq!(node.mem_used_percent, 34.5);
        assert_eq!(node.jvm_heap_used_percent, 56.0);
    }

    #[test]
    fn test_missing_metric_field_is_rejected() {
        let body = r#"{"nodes": {"n1": {"os": {"cpu": {}, "mem": {"used_percent": 1.0}}, "jvm": {"mem": {"heap_used_percent": 1.0}}}}}"#;
        assert!(serde_json::from_str::<NodesStatsResponse>(body).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider = HttpStatsProvider::new("http://localhost:9200/").unwrap();
        assert_eq!(provider.base_url, "http://localhost:9200");
    }
}
