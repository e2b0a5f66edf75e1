//! Typed configuration for the routing core (§6). Loading config files
//! from disk is out of scope — only the structs, their `Default` impls,
//! and their construction-time validation live here.

mod batch;
mod centroid;
mod defaults;
mod folder_scoring;
mod policy;
mod thresholds;

pub use batch::{BatchConfig, ClusteringConfig, SearchLimitsConfig};
pub use centroid::{CentroidConfig, ExemplarStrategy, SystemPhase};
pub use folder_scoring::FolderScoringConfig;
pub use policy::{PolicyConfig, TimeoutsConfig};
pub use thresholds::RoutingThresholds;

use serde::{Deserialize, Serialize};

use crate::errors::RouterError;

/// Aggregate configuration for one `Router` instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RoutingConfig {
    pub thresholds: RoutingThresholds,
    pub folder_scoring: FolderScoringConfig,
    pub batch: BatchConfig,
    pub clustering: ClusteringConfig,
    pub search_limits: SearchLimitsConfig,
    pub centroid: CentroidConfig,
    pub policy: PolicyConfig,
    pub timeouts: TimeoutsConfig,
}

impl RoutingConfig {
    /// Validate every cross-field invariant in the aggregate config.
    /// Called once at router construction; `RouterError::Config` is
    /// fatal and never raised from `route` itself.
    pub fn validate(&self) -> Result<(), RouterError> {
        self.thresholds.validate()?;
        self.folder_scoring.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        RoutingConfig::default().validate().unwrap();
    }
}
