use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A named upstream exposing log-style metric entries over HTTP GET.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceTarget {
    pub name: String,
    pub url: String,
    /// Overrides the gateway-wide request timeout for this target only.
    #[serde(
        default,
        skip_serializing,
        deserialize_with = "humantime_serde_option::deserialize"
    )]
    pub timeout: Option<Duration>,
}

impl ServiceTarget {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn description(&self) -> String {
        format!("{} ({})", self.name, self.url)
    }
}

mod humantime_serde_option {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        opt.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
