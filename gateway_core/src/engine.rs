use crate::{
    error::QueryError,
    fetcher::MetricsFetcher,
    registry::ServiceRegistry,
    report::{AggregateReport, ServiceOutcome},
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

/// Fans out one fetch per registered service and reduces the outcomes.
pub struct AggregationEngine {
    registry: Arc<ServiceRegistry>,
    fetcher: Arc<dyn MetricsFetcher>,
}

impl AggregationEngine {
    pub fn new(registry: Arc<ServiceRegistry>, fetcher: Arc<dyn MetricsFetcher>) -> Self {
        Self { registry, fetcher }
    }

    /// One report per registered service, in registry order.
    ///
    /// Each fetch runs on its own task. Dropping the returned future detaches
    /// those tasks rather than cancelling them. A task that fails to join
    /// (panic or runtime cancellation) fails the whole pass with
    /// [`QueryError::AggregationFailed`].
    pub async fn aggregate_all(&self) -> Result<Vec<AggregateReport>, QueryError> {
        info!("Aggregating metrics from {} services", self.registry.len());

        let handles: Vec<_> = self
            .registry
            .iter()
            .cloned()
            .map(|target| {
                let fetcher = Arc::clone(&self.fetcher);
                tokio::spawn(async move {
                    let outcome = ServiceOutcome::from(fetcher.fetch(&target).await);
                    AggregateReport::from_outcome(target.name, outcome)
                })
            })
            .collect();

        // join_all yields results by position, not completion order
        let mut reports = Vec::with_capacity(handles.len());
        for (position, joined) in join_all(handles).await.into_iter().enumerate() {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!(
                        "Aggregation task for service {} failed to join: {}",
                        position, e
                    );
                    return Err(QueryError::AggregationFailed);
                }
            }
        }

        let failed = reports.iter().filter(|r| !r.is_success()).count();
        info!(
            "Aggregation complete: {} reachable, {} unreachable",
            reports.len() - failed,
            failed
        );

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entry::MetricEntry,
        error::FetchError,
        fetcher::MockMetricsFetcher,
        report::LevelStats,
        service::ServiceTarget,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    fn entries(levels: &[&str]) -> Vec<MetricEntry> {
        levels.iter().map(|l| MetricEntry::with_level(*l)).collect()
    }

    fn registry(names: &[&str]) -> Arc<ServiceRegistry> {
        let targets = names
            .iter()
            .map(|n| ServiceTarget::new(*n, format!("http://{}/api/metrics", n)))
            .collect();
        Arc::new(ServiceRegistry::new(targets).unwrap())
    }

    /// Answers per service name after an optional delay.
    struct ScriptedFetcher {
        responses: HashMap<String, (Duration, Result<Vec<MetricEntry>, FetchError>)>,
    }

    #[async_trait]
    impl MetricsFetcher for ScriptedFetcher {
        async fn fetch(&self, target: &ServiceTarget) -> Result<Vec<MetricEntry>, FetchError> {
            let (delay, response) = self
                .responses
                .get(&target.name)
                .cloned()
                .unwrap_or((Duration::ZERO, Err(FetchError::Transport("Unknown URL".into()))));
            tokio::time::sleep(delay).await;
            response
        }
    }

    struct PanickingFetcher;

    #[async_trait]
    impl MetricsFetcher for PanickingFetcher {
        async fn fetch(&self, target: &ServiceTarget) -> Result<Vec<MetricEntry>, FetchError> {
            if target.name == "service2" {
                panic!("fetcher bug");
            }
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_aggregate_two_services() {
        let mut fetcher = MockMetricsFetcher::new();
        fetcher.expect_fetch().times(2).returning(|target| {
            match target.url.as_str() {
                "http://service1/api/metrics" => Ok(entries(&["info", "warn", "error", "info"])),
                "http://service2/api/metrics" => Ok(entries(&["info", "error", "error"])),
                _ => Err(FetchError::Transport("Unknown URL".to_string())),
            }
        });

        let engine = AggregationEngine::new(registry(&["service1", "service2"]), Arc::new(fetcher));
        let reports = engine.aggregate_all().await.unwrap();

        assert_eq!(
            reports,
            vec![
                AggregateReport::Stats {
                    name: "service1".to_string(),
                    stats: LevelStats { success: 2, warn: 1, error: 1 },
                },
                AggregateReport::Stats {
                    name: "service2".to_string(),
                    stats: LevelStats { success: 1, warn: 0, error: 2 },
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let mut fetcher = MockMetricsFetcher::new();
        fetcher.expect_fetch().returning(|target| {
            if target.name == "service1" {
                Err(FetchError::Transport("Network fail".to_string()))
            } else {
                Ok(entries(&["info"]))
            }
        });

        let engine = AggregationEngine::new(registry(&["service1", "service2"]), Arc::new(fetcher));
        let reports = engine.aggregate_all().await.unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name(), "service1");
        assert!(reports[0].error().unwrap().contains("Error fetching metrics"));
        assert_eq!(
            reports[1].stats(),
            Some(&LevelStats { success: 1, warn: 0, error: 0 })
        );
    }

    #[tokio::test]
    async fn test_reports_follow_registry_order_not_completion_order() {
        let mut responses = HashMap::new();
        responses.insert("slow".to_string(), (Duration::from_millis(80), Ok(entries(&["info"]))));
        responses.insert(
            "medium".to_string(),
            (Duration::from_millis(40), Err(FetchError::Status(502))),
        );
        responses.insert("fast".to_string(), (Duration::ZERO, Ok(entries(&["error"]))));

        let engine = AggregationEngine::new(
            registry(&["slow", "medium", "fast"]),
            Arc::new(ScriptedFetcher { responses }),
        );
        let reports = engine.aggregate_all().await.unwrap();

        let names: Vec<&str> = reports.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["slow", "medium", "fast"]);
        assert_eq!(
            reports[1].error(),
            Some("Error fetching metrics: Request failed with status code 502")
        );
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        let mut responses = HashMap::new();
        for name in ["a", "b", "c", "d"] {
            let delayed = (Duration::from_millis(150), Ok(entries(&["info"])));
            responses.insert(name.to_string(), delayed);
        }

        let engine = AggregationEngine::new(
            registry(&["a", "b", "c", "d"]),
            Arc::new(ScriptedFetcher { responses }),
        );

        let started = tokio::time::Instant::now();
        let reports = engine.aggregate_all().await.unwrap();
        assert_eq!(reports.len(), 4);
        assert!(started.elapsed() < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_repeated_passes_are_identical() {
        let mut responses = HashMap::new();
        responses.insert("one".to_string(), (Duration::ZERO, Ok(entries(&["info", "warn"]))));
        responses.insert(
            "two".to_string(),
            (Duration::ZERO, Err(FetchError::Decode("expected value".into()))),
        );

        let engine = AggregationEngine::new(
            registry(&["one", "two"]),
            Arc::new(ScriptedFetcher { responses }),
        );

        let first = engine.aggregate_all().await.unwrap();
        let second = engine.aggregate_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_registry_yields_empty_report() {
        let mut fetcher = MockMetricsFetcher::new();
        fetcher.expect_fetch().never();

        let engine = AggregationEngine::new(registry(&[]), Arc::new(fetcher));
        assert!(engine.aggregate_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_join_failure_is_aggregation_failure() {
        let engine = AggregationEngine::new(
            registry(&["service1", "service2"]),
            Arc::new(PanickingFetcher),
        );
        assert_eq!(
            engine.aggregate_all().await,
            Err(QueryError::AggregationFailed)
        );
    }
}
