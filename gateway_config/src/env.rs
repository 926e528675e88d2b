use crate::config::GatewayConfig;
use anyhow::{Context, Result};
use gateway_core::ServiceTarget;
use std::net::SocketAddr;
use tracing::debug;

pub const SERVICES_VAR: &str = "SERVICESLIST";
pub const PORT_VARS: [&str; 2] = ["PORT", "port"];
pub const MOUNT_PREFIX_VAR: &str = "GATEWAY_MOUNT_PREFIX";
pub const REQUEST_TIMEOUT_VAR: &str = "GATEWAY_REQUEST_TIMEOUT";

/// Reads the gateway configuration from process environment variables.
///
/// `SERVICESLIST` holds a JSON array such as
/// `[{"name": "service1", "url": "http://service1/metrics"}]`.
pub fn config_from_env() -> Result<GatewayConfig> {
    config_from_lookup(|key| std::env::var(key).ok())
}

pub fn config_from_lookup<F>(lookup: F) -> Result<GatewayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(SERVICES_VAR)
        .with_context(|| format!("{} is not set", SERVICES_VAR))?;
    let services: Vec<ServiceTarget> = serde_json::from_str(&raw)
        .with_context(|| format!("{} must be a JSON array of {{name, url}}", SERVICES_VAR))?;

    let mut config = GatewayConfig {
        services,
        ..GatewayConfig::default()
    };

    if let Some(port) = PORT_VARS.iter().find_map(|key| lookup(*key)) {
        let port: u16 = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid port '{}'", port))?;
        config.listen = SocketAddr::new(config.listen.ip(), port);
    }

    if let Some(prefix) = lookup(MOUNT_PREFIX_VAR) {
        config.mount_prefix = prefix;
    }

    if let Some(timeout) = lookup(REQUEST_TIMEOUT_VAR) {
        let timeout = humantime::parse_duration(timeout.trim())
            .with_context(|| format!("Invalid {} '{}'", REQUEST_TIMEOUT_VAR, timeout))?;
        config.request_timeout = Some(timeout);
    }

    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    debug!(
        "Loaded {} services from environment",
        config.services.len()
    );

    Ok(config)
}
