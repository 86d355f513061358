//! Domain service policy configuration

use serde::Deserialize;

use crate::domain::service::ServicePolicy;

/// Policy switches for the course service
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServiceConfig {
    /// Whether a soft-deleted participant may be newly enrolled.
    /// Defaults to false.
    #[serde(default)]
    pub allow_inactive_enrollment: bool,
}

impl ServiceConfig {
    /// Converts the configuration into the domain policy object.
    pub fn policy(&self) -> ServicePolicy {
        ServicePolicy {
            allow_inactive_enrollment: self.allow_inactive_enrollment,
        }
    }
}
