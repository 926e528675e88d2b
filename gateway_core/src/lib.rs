pub mod dispatcher;
pub mod engine;
pub mod entry;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod registry;
pub mod report;
pub mod service;
pub mod telemetry;

pub use dispatcher::QueryDispatcher;
pub use engine::AggregationEngine;
pub use entry::MetricEntry;
pub use error::{FetchError, GatewayError, QueryError, Result};
pub use fetcher::{HttpFetcher, MetricsFetcher};
pub use filter::{filter_by_level, FilterLevel};
pub use registry::ServiceRegistry;
pub use report::{AggregateReport, LevelStats, ServiceOutcome};
pub use service::ServiceTarget;

// Re-export commonly used types
pub use async_trait::async_trait;
