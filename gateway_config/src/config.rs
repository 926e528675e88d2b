use gateway_core::{GatewayError, ServiceRegistry, ServiceTarget};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_MOUNT_PREFIX: &str = "/api/metrics";
/// Gateway-owned routes that a mount prefix may not shadow.
pub const RESERVED_PATHS: [&str; 2] = ["/health", "/metrics"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    #[serde(default = "default_mount_prefix")]
    pub mount_prefix: String,
    #[serde(with = "humantime_serde_option", default)]
    pub request_timeout: Option<Duration>,
    #[serde(default)]
    pub services: Vec<ServiceTarget>,
}

/// TOML layout: everything lives under a `[gateway]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfigFile {
    pub gateway: GatewayConfig,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_mount_prefix() -> String {
    DEFAULT_MOUNT_PREFIX.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            mount_prefix: default_mount_prefix(),
            request_timeout: None,
            services: Vec::new(),
        }
    }
}

impl GatewayConfig {
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        let prefix = self.mount_prefix.as_str();
        if !prefix.starts_with('/') {
            return Err(format!("Mount prefix '{}' must start with '/'", prefix));
        }
        if prefix.len() == 1 || prefix.ends_with('/') {
            return Err(format!(
                "Mount prefix '{}' must name a path below the root without a trailing '/'",
                prefix
            ));
        }
        if prefix[1..]
            .split('/')
            .any(|segment| segment.is_empty() || segment.contains([':', '*', '{', '}']))
        {
            return Err(format!(
                "Mount prefix '{}' must be made of literal, non-empty path segments",
                prefix
            ));
        }
        if let Some(reserved) = RESERVED_PATHS.iter().find(|reserved| {
            prefix == **reserved || prefix.starts_with(&format!("{}/", reserved))
        }) {
            return Err(format!(
                "Mount prefix '{}' collides with the reserved route '{}'",
                prefix, reserved
            ));
        }

        if let Some(timeout) = self.request_timeout {
            if timeout.is_zero() {
                return Err("Request timeout must be > 0".to_string());
            }
        }

        for service in &self.services {
            if service.timeout.is_some_and(|t| t.is_zero()) {
                return Err(format!("Service '{}' timeout must be > 0", service.name));
            }
        }

        // name and url rules are owned by the registry
        self.registry().map(|_| ()).map_err(|e| e.to_string())
    }

    pub fn registry(&self) -> Result<ServiceRegistry, GatewayError> {
        ServiceRegistry::new(self.services.clone())
    }
}

#[derive(Default)]
pub struct GatewayConfigBuilder {
    listen: Option<SocketAddr>,
    mount_prefix: Option<String>,
    request_timeout: Option<Duration>,
    services: Vec<ServiceTarget>,
}

impl GatewayConfigBuilder {
    pub fn listen(mut self, listen: SocketAddr) -> Self {
        self.listen = Some(listen);
        self
    }

    pub fn mount_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.mount_prefix = Some(prefix.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn add_service(mut self, service: ServiceTarget) -> Self {
        self.services.push(service);
        self
    }

    pub fn build(self) -> GatewayConfig {
        GatewayConfig {
            listen: self.listen.unwrap_or_else(default_listen),
            mount_prefix: self.mount_prefix.unwrap_or_else(default_mount_prefix),
            request_timeout: self.request_timeout,
            services: self.services,
        }
    }
}

mod humantime_serde_option {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&humantime::format_duration(*d).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        opt.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = GatewayConfig::builder()
            .listen("127.0.0.1:8088".parse().unwrap())
            .request_timeout(Duration::from_secs(3))
            .add_service(ServiceTarget::new("service1", "http://service1/api/metrics"))
            .build();

        assert_eq!(config.mount_prefix, DEFAULT_MOUNT_PREFIX);
        assert_eq!(config.services.len(), 1);
        assert!(config.validate().is_ok());
        assert_eq!(config.registry().unwrap().list()[0].name, "service1");
    }

    #[test]
    fn test_default_listen_matches_constant() {
        assert_eq!(GatewayConfig::default().listen.to_string(), DEFAULT_LISTEN);
    }

    #[test]
    fn test_mount_prefix_validation() {
        for bad in ["", "/", "api", "/api/", "/api//logs", "/:name", "/api/*rest", "/{x}"] {
            let config = GatewayConfig::builder().mount_prefix(bad).build();
            assert!(config.validate().is_err(), "prefix {:?} should be rejected", bad);
        }
        for good in ["/logs", "/v2/logs", "/api/metrics", "/metricsx", "/healthz"] {
            let config = GatewayConfig::builder().mount_prefix(good).build();
            assert!(config.validate().is_ok(), "prefix {:?} should be accepted", good);
        }
    }

    #[test]
    fn test_reserved_prefixes_rejected() {
        for bad in ["/health", "/metrics", "/health/api", "/metrics/services"] {
            let err = GatewayConfig::builder()
                .mount_prefix(bad)
                .build()
                .validate()
                .unwrap_err();
            assert!(err.contains("reserved route"), "{}", err);
        }
    }

    #[test]
    fn test_service_validation_delegates_to_registry() {
        let config = GatewayConfig::builder()
            .add_service(ServiceTarget::new("a", "http://a/metrics"))
            .add_service(ServiceTarget::new("a", "http://b/metrics"))
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Duplicate service name: a"));
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let config = GatewayConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(config.validate().is_err());

        let config = GatewayConfig::builder()
            .add_service(ServiceTarget::new("a", "http://a/metrics").with_timeout(Duration::ZERO))
            .build();
        assert!(config.validate().is_err());
    }
}
