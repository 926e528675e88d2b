use crate::{entry::MetricEntry, error::QueryError};
use std::fmt;
use std::str::FromStr;

/// Levels accepted by the single-service filter endpoint.
///
/// Upstreams report warnings as `warn`, which this vocabulary does not accept;
/// `warning` is accepted here but never counted by the aggregate reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterLevel {
    Info,
    Warning,
    Error,
}

impl FilterLevel {
    pub const ALL: [FilterLevel; 3] = [FilterLevel::Info, FilterLevel::Warning, FilterLevel::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterLevel::Info => "info",
            FilterLevel::Warning => "warning",
            FilterLevel::Error => "error",
        }
    }
}

impl fmt::Display for FilterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterLevel {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or(QueryError::InvalidParameter)
    }
}

/// Entries whose `level` equals `level`, in their original order.
pub fn filter_by_level(entries: Vec<MetricEntry>, level: &str) -> Vec<MetricEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.level() == Some(level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entries(levels: &[&str]) -> Vec<MetricEntry> {
        levels.iter().map(|l| MetricEntry::with_level(*l)).collect()
    }

    #[test]
    fn test_filter_info() {
        let filtered = filter_by_level(entries(&["info", "warn", "info", "error"]), "info");
        assert_eq!(filtered, entries(&["info", "info"]));
    }

    #[test]
    fn test_filter_no_match() {
        assert!(filter_by_level(entries(&["info", "warn"]), "warning").is_empty());
        assert!(filter_by_level(Vec::new(), "info").is_empty());
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("info".parse::<FilterLevel>(), Ok(FilterLevel::Info));
        assert_eq!("warning".parse::<FilterLevel>(), Ok(FilterLevel::Warning));
        assert_eq!("error".parse::<FilterLevel>(), Ok(FilterLevel::Error));
        assert_eq!("warn".parse::<FilterLevel>(), Err(QueryError::InvalidParameter));
        assert_eq!("INFO".parse::<FilterLevel>(), Err(QueryError::InvalidParameter));
        assert_eq!("badlevel".parse::<FilterLevel>(), Err(QueryError::InvalidParameter));
    }

    fn level_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("info".to_string()),
            Just("warn".to_string()),
            Just("warning".to_string()),
            Just("error".to_string()),
            "[a-z]{0,6}",
        ]
    }

    proptest! {
        #[test]
        fn prop_filter_keeps_exact_ordered_subsequence(
            levels in proptest::collection::vec(level_strategy(), 0..32),
            wanted in level_strategy(),
        ) {
            let input: Vec<MetricEntry> = levels
                .iter()
                .enumerate()
                .map(|(i, level)| {
                    serde_json::from_value(serde_json::json!({"level": level, "seq": i}))
                        .unwrap()
                })
                .collect();

            let expected: Vec<MetricEntry> = input
                .iter()
                .filter(|e| e.level() == Some(wanted.as_str()))
                .cloned()
                .collect();

            let filtered = filter_by_level(input, &wanted);
            prop_assert_eq!(filtered, expected);
        }
    }
}
