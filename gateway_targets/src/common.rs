use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: u64,
}

impl HealthStatus {
    pub fn healthy(uptime_seconds: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
            uptime_seconds,
        }
    }
}

/// A log record in the shape the gateway consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub service: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

const MESSAGES: &[(&str, &str)] = &[
    ("info", "request handled"),
    ("info", "cache refreshed"),
    ("info", "user session started"),
    ("warn", "slow query detected"),
    ("warn", "retrying upstream call"),
    ("error", "database connection lost"),
    ("error", "payment provider timeout"),
];

/// Generates `count` entries, weighted towards `info`.
pub struct LogGenerator {
    service: String,
    rng: StdRng,
}

impl LogGenerator {
    pub fn new(service: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            service: service.into(),
            rng,
        }
    }

    pub fn generate(&mut self, count: usize) -> Vec<LogEntry> {
        (0..count)
            .map(|_| {
                let (level, message) = MESSAGES[self.rng.gen_range(0..MESSAGES.len())];
                LogEntry {
                    level: level.to_string(),
                    message: message.to_string(),
                    service: self.service.clone(),
                    timestamp: chrono::Utc::now(),
                }
            })
            .collect()
    }

    /// True with probability `rate`, used to simulate an unhealthy upstream.
    pub fn should_fail(&mut self, rate: f64) -> bool {
        rate > 0.0 && self.rng.gen_bool(rate.min(1.0))
    }
}
