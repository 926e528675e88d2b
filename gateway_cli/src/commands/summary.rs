use super::load_config;
use crate::ui;
use anyhow::Result;
use gateway_core::{HttpFetcher, QueryDispatcher};
use gateway_metrics::{
    exporters::{JsonExporter, MarkdownExporter, TableExporter},
    SummaryReport,
};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn execute(
    config: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config).await?;

    let registry = Arc::new(config.registry()?);
    let fetcher = Arc::new(HttpFetcher::with_timeout(config.request_timeout)?);
    let dispatcher = QueryDispatcher::new(registry, fetcher);

    let reports = dispatcher.all_metrics().await?;
    let summary = SummaryReport::new(reports);

    match format.as_str() {
        "cli" => {
            ui::print_header("Service Metrics Summary");
            TableExporter::print(&summary);
        }
        "json" => {
            if let Some(output_path) = output {
                JsonExporter::export(&summary, &output_path).await?;
                ui::print_success(&format!("Summary written to {}", output_path.display()));
            } else {
                println!("{}", JsonExporter::to_string(&summary)?);
            }
        }
        "markdown" => {
            if let Some(output_path) = output {
                MarkdownExporter::export(&summary, &output_path).await?;
                ui::print_success(&format!("Summary written to {}", output_path.display()));
            } else {
                println!("{}", MarkdownExporter::format(&summary));
            }
        }
        _ => {
            anyhow::bail!("Unknown format: {}", format);
        }
    }

    Ok(())
}
