use crate::summary::SummaryReport;
use colored::Colorize;
use gateway_core::AggregateReport;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Info")]
    success: String,
    #[tabled(rename = "Warn")]
    warn: String,
    #[tabled(rename = "Error")]
    error: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&AggregateReport> for ReportRow {
    fn from(report: &AggregateReport) -> Self {
        match report {
            AggregateReport::Stats { name, stats } => Self {
                name: name.clone(),
                success: stats.success.to_string(),
                warn: stats.warn.to_string(),
                error: stats.error.to_string(),
                status: "ok".to_string(),
            },
            AggregateReport::Failed { name, error } => Self {
                name: name.clone(),
                success: "-".to_string(),
                warn: "-".to_string(),
                error: "-".to_string(),
                status: error.clone(),
            },
        }
    }
}

/// Plain-text rendering for terminals.
pub struct TableExporter;

impl TableExporter {
    pub fn format(summary: &SummaryReport) -> String {
        let rows: Vec<ReportRow> = summary.reports.iter().map(ReportRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        table.to_string()
    }

    pub fn print(summary: &SummaryReport) {
        let totals = &summary.totals;

        println!("{}", Self::format(summary));
        println!(
            "\n{} {}/{} services reachable",
            "Availability:".bold(),
            totals.reachable,
            totals.services
        );
        println!(
            "{} info {}, warn {}, error {}",
            "Totals:".bold(),
            totals.stats.success.to_string().green(),
            totals.stats.warn.to_string().yellow(),
            totals.stats.error.to_string().red()
        );

        for report in summary.reports.iter().filter(|r| !r.is_success()) {
            println!(
                "{} {}: {}",
                "✗".red().bold(),
                report.name(),
                report.error().unwrap_or_default()
            );
        }
    }
}
