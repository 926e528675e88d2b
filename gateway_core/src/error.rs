use thiserror::Error;

/// Startup and configuration failures.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate service name: {0}")]
    DuplicateService(String),

    #[error("Invalid url for service '{name}': {reason}")]
    InvalidServiceUrl { name: String, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// A single upstream retrieval failed. Never escapes the fetch boundary as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("timeout of {0}ms exceeded")]
    Timeout(u128),

    #[error("Request failed with status code {0}")]
    Status(u16),

    #[error("{0}")]
    Decode(String),
}

impl FetchError {
    /// Label used for the `outcome` dimension of upstream telemetry.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Timeout(_) => "timeout",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }

    /// Reason reported by single-service queries.
    pub fn service_reason(&self, service: &str) -> String {
        format!("Could not fetch metrics from {}, {}", service, self)
    }

    /// Reason embedded in an aggregate report entry.
    pub fn aggregate_reason(&self) -> String {
        format!("Error fetching metrics: {}", self)
    }
}

/// Outcome of a dispatched query that did not produce a 200 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Service not found")]
    NotFound,

    #[error("Invalid status parameter. Must be one of: info, warning, error")]
    InvalidParameter,

    /// Carries the full `Could not fetch metrics from ...` reason.
    #[error("{0}")]
    Upstream(String),

    #[error("Failed to fetch metrics from services")]
    AggregationFailed,
}

impl QueryError {
    pub fn status_code(&self) -> u16 {
        match self {
            QueryError::NotFound => 404,
            QueryError::InvalidParameter => 400,
            QueryError::Upstream(_) | QueryError::AggregationFailed => 500,
        }
    }
}
