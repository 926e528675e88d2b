use crate::{
    entry::MetricEntry,
    error::{FetchError, Result},
    service::ServiceTarget,
    telemetry,
};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Retrieves the raw metric entries of one upstream.
///
/// Implementations make exactly one attempt and report every failure as a
/// [`FetchError`] value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsFetcher: Send + Sync {
    async fn fetch(
        &self,
        target: &ServiceTarget,
    ) -> std::result::Result<Vec<MetricEntry>, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    default_timeout: Option<Duration>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// `default_timeout` applies to targets that do not set their own.
    pub fn with_timeout(default_timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("metrics-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::from_client(client, default_timeout))
    }

    pub fn from_client(client: reqwest::Client, default_timeout: Option<Duration>) -> Self {
        Self {
            client,
            default_timeout,
        }
    }

    pub fn timeout_for(&self, target: &ServiceTarget) -> Option<Duration> {
        target.timeout.or(self.default_timeout)
    }

    async fn fetch_once(
        &self,
        target: &ServiceTarget,
    ) -> std::result::Result<Vec<MetricEntry>, FetchError> {
        let timeout = self.timeout_for(target);

        let mut request = self.client.get(target.url.as_str());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| classify(e, timeout))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MetricsFetcher for HttpFetcher {
    async fn fetch(
        &self,
        target: &ServiceTarget,
    ) -> std::result::Result<Vec<MetricEntry>, FetchError> {
        let started = Instant::now();
        let result = self.fetch_once(target).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(entries) => {
                debug!(
                    "Fetched {} entries from {} in {:?}",
                    entries.len(),
                    target.name,
                    elapsed
                );
                telemetry::record_fetch(&target.name, "success", elapsed);
            }
            Err(e) => {
                warn!("Fetch from {} failed: {}", target.description(), e);
                telemetry::record_fetch(&target.name, e.kind(), elapsed);
            }
        }

        result
    }
}

fn classify(err: reqwest::Error, timeout: Option<Duration>) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout.map(|t| t.as_millis()).unwrap_or_default())
    } else {
        FetchError::Transport(error_chain(&err))
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_timeout_overrides_default() {
        let fetcher = HttpFetcher::with_timeout(Some(Duration::from_secs(5))).unwrap();

        let plain = ServiceTarget::new("a", "http://a/metrics");
        assert_eq!(fetcher.timeout_for(&plain), Some(Duration::from_secs(5)));

        let tuned = plain.clone().with_timeout(Duration::from_millis(200));
        assert_eq!(fetcher.timeout_for(&tuned), Some(Duration::from_millis(200)));

        let unbounded = HttpFetcher::new().unwrap();
        assert_eq!(unbounded.timeout_for(&plain), None);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct SendError(#[source] std::io::Error);

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(error_chain(&SendError(inner)), "error sending request: refused");
    }
}
