use crate::{
    engine::AggregationEngine,
    entry::MetricEntry,
    error::QueryError,
    fetcher::MetricsFetcher,
    filter::{filter_by_level, FilterLevel},
    registry::ServiceRegistry,
    report::AggregateReport,
    service::ServiceTarget,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves read queries against the registry, fetcher and engine.
///
/// Holds no per-request state; one instance serves every request.
pub struct QueryDispatcher {
    registry: Arc<ServiceRegistry>,
    fetcher: Arc<dyn MetricsFetcher>,
    engine: AggregationEngine,
}

impl QueryDispatcher {
    pub fn new(registry: Arc<ServiceRegistry>, fetcher: Arc<dyn MetricsFetcher>) -> Self {
        let engine = AggregationEngine::new(Arc::clone(&registry), Arc::clone(&fetcher));
        Self {
            registry,
            fetcher,
            engine,
        }
    }

    pub fn services(&self) -> &[ServiceTarget] {
        self.registry.list()
    }

    /// Raw entries of one service, optionally narrowed to one level.
    ///
    /// The name is resolved first, then the level is validated, and only then
    /// is the upstream contacted.
    pub async fn service_metrics(
        &self,
        name: &str,
        status: Option<&str>,
    ) -> Result<Vec<MetricEntry>, QueryError> {
        let target = self.registry.find(name).ok_or_else(|| {
            debug!("Unknown service requested: {}", name);
            QueryError::NotFound
        })?;

        let level = status
            .map(|s| {
                s.parse::<FilterLevel>().map_err(|e| {
                    debug!("Rejected status parameter '{}' for {}", s, name);
                    e
                })
            })
            .transpose()?;

        let entries = self.fetcher.fetch(target).await.map_err(|e| {
            let reason = e.service_reason(&target.name);
            warn!("{}", reason);
            QueryError::Upstream(reason)
        })?;

        Ok(match level {
            Some(level) => filter_by_level(entries, level.as_str()),
            None => entries,
        })
    }

    pub async fn all_metrics(&self) -> Result<Vec<AggregateReport>, QueryError> {
        self.engine.aggregate_all().await
    }
}
