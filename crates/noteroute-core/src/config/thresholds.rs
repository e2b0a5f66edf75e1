use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::RouterError;

/// The routing decision machine's confidence bands (§3, §4.5).
///
/// Construction validates the total ordering `duplicate >= high_confidence
/// >= low_confidence >= new_topic`, and `new_topic <= folder_placement <=
/// high_confidence`, raising [`RouterError::Config`] on violation. This
/// validation has no counterpart in the teacher's independently-defaulted
/// leaf configs, because `RoutingThresholds` is the one config with a
/// cross-field invariant the spec calls out explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoutingThresholds {
    pub high_confidence: f64,
    pub low_confidence: f64,
    pub new_topic: f64,
    pub duplicate: f64,
    pub folder_placement: f64,
    pub cross_link_delta: f64,
    pub cross_link_min: f64,
}

impl Default for RoutingThresholds {
    fn default() -> Self {
        Self {
            high_confidence: defaults::DEFAULT_HIGH_CONFIDENCE,
            low_confidence: defaults::DEFAULT_LOW_CONFIDENCE,
            new_topic: defaults::DEFAULT_NEW_TOPIC,
            duplicate: defaults::DEFAULT_DUPLICATE,
            folder_placement: defaults::DEFAULT_FOLDER_PLACEMENT,
            cross_link_delta: defaults::DEFAULT_CROSS_LINK_DELTA,
            cross_link_min: defaults::DEFAULT_CROSS_LINK_MIN,
        }
    }
}

impl RoutingThresholds {
    /// Validate the ordering invariant from §3. Called at router
    /// construction time; never from `route` itself.
    pub fn validate(&self) -> Result<(), RouterError> {
        for (name, value) in [
            ("high_confidence", self.high_confidence),
            ("low_confidence", self.low_confidence),
            ("new_topic", self.new_topic),
            ("duplicate", self.duplicate),
            ("folder_placement", self.folder_placement),
            ("cross_link_delta", self.cross_link_delta),
            ("cross_link_min", self.cross_link_min),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RouterError::Config(format!(
                    "threshold {name} must be in [0, 1], got {value}"
                )));
            }
        }

        if !(self.duplicate >= self.high_confidence
            && self.high_confidence >= self.low_confidence
            && self.low_confidence >= self.new_topic)
        {
            return Err(RouterError::Config(format!(
                "thresholds must satisfy duplicate >= high_confidence >= low_confidence >= new_topic, got {} >= {} >= {} >= {}",
                self.duplicate, self.high_confidence, self.low_confidence, self.new_topic
            )));
        }

        if !(self.folder_placement >= self.new_topic && self.folder_placement <= self.high_confidence) {
            return Err(RouterError::Config(format!(
                "folder_placement ({}) must be within [new_topic ({}), high_confidence ({})]",
                self.folder_placement, self.new_topic, self.high_confidence
            )));
        }

        Ok(())
    }
}
