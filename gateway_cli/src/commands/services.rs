use super::load_config;
use crate::ui;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub async fn execute(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config).await?;
    let registry = config.registry()?;

    ui::print_header("Configured Services");
    println!("\nTotal services: {}\n", registry.len());

    for target in registry.iter() {
        let timeout = target
            .timeout
            .or(config.request_timeout)
            .map(|t| humantime::format_duration(t).to_string())
            .unwrap_or_else(|| "none".to_string());

        println!(
            "  {} {} {} (timeout: {})",
            "•".green(),
            target.name.bold(),
            target.url,
            timeout
        );
    }

    if registry.is_empty() {
        ui::print_warning("No services configured");
    }

    Ok(())
}
