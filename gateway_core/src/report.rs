use crate::{entry::MetricEntry, error::FetchError};
use serde::{Deserialize, Serialize};

/// Per-level counters for one service.
///
/// The reduction counts `info`, `warn` and `error`. It does not count `warning`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub success: u64,
    pub warn: u64,
    pub error: u64,
}

impl LevelStats {
    pub fn from_entries(entries: &[MetricEntry]) -> Self {
        entries
            .iter()
            .fold(Self::default(), |mut stats, entry| {
                match entry.level() {
                    Some("info") => stats.success += 1,
                    Some("warn") => stats.warn += 1,
                    Some("error") => stats.error += 1,
                    _ => {}
                }
                stats
            })
    }

    pub fn total(&self) -> u64 {
        self.success + self.warn + self.error
    }
}

/// Result of querying one service inside an aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome {
    Success(Vec<MetricEntry>),
    Failure(String),
}

impl From<Result<Vec<MetricEntry>, FetchError>> for ServiceOutcome {
    fn from(result: Result<Vec<MetricEntry>, FetchError>) -> Self {
        match result {
            Ok(entries) => ServiceOutcome::Success(entries),
            Err(e) => ServiceOutcome::Failure(e.aggregate_reason()),
        }
    }
}

/// One entry of the "all services" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregateReport {
    Stats { name: String, stats: LevelStats },
    Failed { name: String, error: String },
}

impl AggregateReport {
    pub fn from_outcome(name: impl Into<String>, outcome: ServiceOutcome) -> Self {
        let name = name.into();
        match outcome {
            ServiceOutcome::Success(entries) => AggregateReport::Stats {
                name,
                stats: LevelStats::from_entries(&entries),
            },
            ServiceOutcome::Failure(error) => AggregateReport::Failed { name, error },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AggregateReport::Stats { name, .. } | AggregateReport::Failed { name, .. } => name,
        }
    }

    pub fn stats(&self) -> Option<&LevelStats> {
        match self {
            AggregateReport::Stats { stats, .. } => Some(stats),
            AggregateReport::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AggregateReport::Stats { .. } => None,
            AggregateReport::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AggregateReport::Stats { .. })
    }
}
