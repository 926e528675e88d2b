use crate::{
    error::{GatewayError, Result},
    service::ServiceTarget,
};
use std::collections::HashMap;
use tracing::debug;

/// Immutable, ordered set of upstream targets, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    targets: Vec<ServiceTarget>,
    index: HashMap<String, usize>,
}

impl ServiceRegistry {
    pub fn new(targets: Vec<ServiceTarget>) -> Result<Self> {
        let mut index = HashMap::with_capacity(targets.len());

        for (position, target) in targets.iter().enumerate() {
            if target.name.is_empty() {
                return Err(GatewayError::InvalidConfig(format!(
                    "Service {} name cannot be empty",
                    position
                )));
            }

            validate_url(target)?;

            if index.insert(target.name.clone(), position).is_some() {
                return Err(GatewayError::DuplicateService(target.name.clone()));
            }

            debug!("Registered service {}", target.description());
        }

        Ok(Self { targets, index })
    }

    /// Targets in configuration order.
    pub fn list(&self) -> &[ServiceTarget] {
        &self.targets
    }

    /// Exact, case-sensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&ServiceTarget> {
        self.index.get(name).map(|&position| &self.targets[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn validate_url(target: &ServiceTarget) -> Result<()> {
    let invalid = |reason: String| GatewayError::InvalidServiceUrl {
        name: target.name.clone(),
        reason,
    };

    let parsed = url::Url::parse(&target.url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
