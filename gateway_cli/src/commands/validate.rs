use crate::ui;
use anyhow::Result;
use gateway_config::{parse_config_from_file, parse_config_from_str, GatewayConfig};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

pub async fn execute(config_file: PathBuf, format: String) -> Result<()> {
    ui::print_header("Validating Configuration");

    let parsed = if config_file == Path::new("-") {
        println!("Input: stdin ({})", format);
        read_stdin(&format).await
    } else {
        println!("File: {}", config_file.display());
        parse_config_from_file(&config_file).await
    };

    match parsed {
        Ok(config) => {
            println!();
            ui::print_success("Configuration is valid!");
            println!("\nGateway Details:");
            println!("  Listen: {}", config.listen);
            println!("  Mount prefix: {}", config.mount_prefix);
            match config.request_timeout {
                Some(timeout) => {
                    println!("  Request timeout: {}", humantime::format_duration(timeout))
                }
                None => println!("  Request timeout: none"),
            }
            println!("  Services: {}", config.services.len());

            if config.services.is_empty() {
                println!();
                ui::print_warning("Warning: configuration has no services");
            }

            for (i, service) in config.services.iter().enumerate() {
                println!("    {}: {} -> {}", i + 1, service.name, service.url);
            }

            Ok(())
        }
        Err(e) => {
            println!();
            ui::print_error("Configuration is invalid!");
            println!("\nError: {}", e);
            Err(e)
        }
    }
}

async fn read_stdin(format: &str) -> Result<GatewayConfig> {
    let mut contents = String::new();
    tokio::io::stdin().read_to_string(&mut contents).await?;
    parse_config_from_str(&contents, format)
}
