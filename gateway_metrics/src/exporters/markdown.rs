use crate::summary::SummaryReport;
use anyhow::Result;
use gateway_core::AggregateReport;
use std::path::Path;

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub async fn export(summary: &SummaryReport, path: impl AsRef<Path>) -> Result<()> {
        let markdown = Self::format(summary);
        tokio::fs::write(path, markdown).await?;
        Ok(())
    }

    pub fn format(summary: &SummaryReport) -> String {
        let rows = summary
            .reports
            .iter()
            .map(Self::row)
            .collect::<Vec<_>>()
            .join("\n");

        let totals = &summary.totals;
        format!(
            r#"# Service Metrics Summary

Generated at {}

## Services

| Service | Info | Warn | Error | Status |
|---------|------|------|-------|--------|
{}

## Fleet Totals

| Metric | Value |
|--------|-------|
| Services | {} |
| Reachable | {} |
| Unreachable | {} |
| Availability | {:.2}% |
| Info | {} |
| Warn | {} |
| Error | {} |
| Error Rate | {:.2}% |
"#,
            summary.generated_at.to_rfc3339(),
            rows,
            totals.services,
            totals.reachable,
            totals.unreachable,
            totals.availability() * 100.0,
            totals.stats.success,
            totals.stats.warn,
            totals.stats.error,
            totals.error_rate() * 100.0,
        )
    }

    fn row(report: &AggregateReport) -> String {
        match report {
            AggregateReport::Stats { name, stats } => format!(
                "| {} | {} | {} | {} | ok |",
                name, stats.success, stats.warn, stats.error
            ),
            AggregateReport::Failed { name, error } => {
                format!("| {} | - | - | - | {} |", name, error.replace('|', "\\|"))
            }
        }
    }
}
