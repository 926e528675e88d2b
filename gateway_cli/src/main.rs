mod commands;
mod ui;

use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser)]
#[command(name = "metrics-gateway")]
#[command(about = "Aggregates log-level metrics from a fleet of HTTP services", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Configuration file (YAML, TOML, or JSON); defaults to SERVICESLIST and PORT
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the listen address
        #[arg(short, long)]
        listen: Option<SocketAddr>,

        /// Default upstream request timeout, e.g. "5s"
        #[arg(short, long, value_parser = humantime::parse_duration)]
        timeout: Option<Duration>,
    },

    /// List configured services
    Services {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Query every service once and print a summary
    Summary {
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (cli, json, markdown)
        #[arg(short, long, default_value = "cli")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file, or "-" to read stdin
        config: PathBuf,

        /// Format of stdin input (yaml, toml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    match cli.command {
        Commands::Serve {
            config,
            listen,
            timeout,
        } => {
            commands::serve::execute(config, listen, timeout).await?;
        }

        Commands::Services { config } => {
            commands::services::execute(config).await?;
        }

        Commands::Summary {
            config,
            format,
            output,
        } => {
            commands::summary::execute(config, format, output).await?;
        }

        Commands::Validate { config, format } => {
            commands::validate::execute(config, format).await?;
        }
    }

    Ok(())
}
