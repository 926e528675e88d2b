pub mod serve;
pub mod services;
pub mod summary;
pub mod validate;

use anyhow::Result;
use gateway_config::{config_from_env, parse_config_from_file, GatewayConfig};
use std::path::PathBuf;
use tracing::info;

/// Loads from `path` when given, otherwise from the environment.
pub async fn load_config(path: Option<PathBuf>) -> Result<GatewayConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            parse_config_from_file(&path).await
        }
        None => {
            info!("Loading configuration from environment");
            config_from_env()
        }
    }
}
