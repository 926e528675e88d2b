use crate::config::{GatewayConfig, GatewayConfigFile};
use anyhow::Result;
use std::path::Path;

pub async fn parse_config_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(anyhow::anyhow!(
            "Unsupported file format. Use .yaml, .yml, .toml, or .json"
        )),
    }
}

pub fn parse_config_from_str(content: &str, format: &str) -> Result<GatewayConfig> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => parse_yaml(content),
        "toml" => parse_toml(content),
        "json" => parse_json(content),
        _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
    }
}

fn parse_yaml(content: &str) -> Result<GatewayConfig> {
    let config: GatewayConfig = serde_yaml::from_str(content)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

fn parse_toml(content: &str) -> Result<GatewayConfig> {
    let file: GatewayConfigFile = toml::from_str(content)?;
    file.gateway.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(file.gateway)
}

fn parse_json(content: &str) -> Result<GatewayConfig> {
    let config: GatewayConfig = serde_json::from_str(content)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}
