use chrono::{DateTime, Utc};
use gateway_core::{AggregateReport, LevelStats};
use serde::{Deserialize, Serialize};

/// Counters summed over every reachable service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetTotals {
    pub services: usize,
    pub reachable: usize,
    pub unreachable: usize,
    pub stats: LevelStats,
}

impl FleetTotals {
    pub fn from_reports(reports: &[AggregateReport]) -> Self {
        let mut totals = Self {
            services: reports.len(),
            ..Self::default()
        };

        for report in reports {
            match report.stats() {
                Some(stats) => {
                    totals.reachable += 1;
                    totals.stats.success += stats.success;
                    totals.stats.warn += stats.warn;
                    totals.stats.error += stats.error;
                }
                None => totals.unreachable += 1,
            }
        }

        totals
    }

    pub fn availability(&self) -> f64 {
        if self.services == 0 {
            return 0.0;
        }
        self.reachable as f64 / self.services as f64
    }

    pub fn error_rate(&self) -> f64 {
        let total = self.stats.total();
        if total == 0 {
            return 0.0;
        }
        self.stats.error as f64 / total as f64
    }
}

/// One aggregation pass, as rendered by the exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub reports: Vec<AggregateReport>,
    pub totals: FleetTotals,
}

impl SummaryReport {
    pub fn new(reports: Vec<AggregateReport>) -> Self {
        let totals = FleetTotals::from_reports(&reports);
        Self {
            generated_at: Utc::now(),
            reports,
            totals,
        }
    }
}
