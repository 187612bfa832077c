//! Public guard entry point composing the scheduler and evaluator.

use crate::config::GuardConfig;
use crate::diagnostics::{NoOpSink, WarningSink};
use crate::error::Error;
use crate::evaluator::StatsEvaluator;
use crate::provider::StatsProvider;
use crate::scheduler::RetryScheduler;
use std::future::Future;
use std::sync::Arc;

/// Gates execution of arbitrary operations on cluster health.
///
/// Each [`execute`](EsGuard::execute) call polls the stats provider, backing
/// off exponentially while the cluster is unhealthy, and only then runs the
/// wrapped operation. The guard holds no mutable state: concurrent
/// invocations poll independently and never coordinate.
///
/// ```rust,no_run
/// use es_guard_rust::{EsGuard, GuardConfig, HttpStatsProvider};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> es_guard_rust::Result<()> {
///     let provider = HttpStatsProvider::new("http://localhost:9200")?;
///     let guard = EsGuard::builder()
///         .with_config(GuardConfig::new().with_cpu_percent(85.0))
///         .with_provider(Arc::new(provider))
///         .build()?;
///
///     let answer = guard.execute(|| async { 2 + 2 }).await?;
///     assert_eq!(answer, 4);
///     Ok(())
/// }
/// ```
pub struct EsGuard {
    config: GuardConfig,
    provider: Arc<dyn StatsProvider>,
    evaluator: StatsEvaluator,
}

impl std::fmt::Debug for EsGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsGuard")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EsGuard {
    pub fn builder() -> EsGuardBuilder {
        EsGuardBuilder::new()
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Wait for a healthy cluster, then run `op` exactly once.
    ///
    /// The operation's output is returned untouched inside `Ok`: an operation
    /// that itself returns `Result` reaches the caller unchanged, and the
    /// guard never retries it. When the retry budget is exhausted
    /// ([`Error::MaxRetriesExceeded`]) or the stats provider fails
    /// ([`Error::Transport`]), `op` is never invoked.
    pub async fn execute<F, Fut, T>(&self, op: F) -> crate::Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        RetryScheduler::new(&self.config, self.provider.as_ref(), &self.evaluator)
            .await_healthy()
            .await?;
        Ok(op().await)
    }
}

/// Builder for [`EsGuard`].
///
/// The stats provider is required and must be supplied explicitly; there is
/// no implicit default client. The warning sink defaults to [`NoOpSink`].
pub struct EsGuardBuilder {
    config: GuardConfig,
    provider: Option<Arc<dyn StatsProvider>>,
    sink: Arc<dyn WarningSink>,
}

impl EsGuardBuilder {
    pub fn new() -> Self {
        Self {
            config: GuardConfig::default(),
            provider: None,
            sink: Arc::new(NoOpSink),
        }
    }

    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn StatsProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> crate::Result<EsGuard> {
        let provider = self
            .provider
            .ok_or_else(|| Error::configuration("stats provider is required"))?;

        Ok(EsGuard {
            config: self.config,
            provider,
            evaluator: StatsEvaluator::new(self.sink),
        })
    }
}

impl Default for EsGuardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
