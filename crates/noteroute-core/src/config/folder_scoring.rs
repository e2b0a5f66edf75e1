use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::RouterError;

/// Weights for `FolderScorer` (§4.2):
/// `score = w_avg*avg(sim) + w_max*max(sim) + min(count*bonus_mult, max_bonus)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FolderScoringConfig {
    pub w_avg: f64,
    pub w_max: f64,
    pub bonus_mult: f64,
    pub max_bonus: f64,
}

impl Default for FolderScoringConfig {
    fn default() -> Self {
        Self {
            w_avg: defaults::DEFAULT_W_AVG,
            w_max: defaults::DEFAULT_W_MAX,
            bonus_mult: defaults::DEFAULT_BONUS_MULT,
            max_bonus: defaults::DEFAULT_MAX_BONUS,
        }
    }
}

impl FolderScoringConfig {
    /// Reject negative weights, and a `max_bonus` that a single concept's
    /// `bonus_mult` could never reach (new relative to the teacher, whose
    /// numeric config fields aren't cross-validated at construction).
    pub fn validate(&self) -> Result<(), RouterError> {
        for (name, value) in [
            ("w_avg", self.w_avg),
            ("w_max", self.w_max),
            ("bonus_mult", self.bonus_mult),
            ("max_bonus", self.max_bonus),
        ] {
            if value < 0.0 {
                return Err(RouterError::Config(format!(
                    "folder scoring weight {name} must be non-negative, got {value}"
                )));
            }
        }
        if self.bonus_mult > 0.0 && self.max_bonus < self.bonus_mult {
            return Err(RouterError::Config(format!(
                "max_bonus ({}) is unreachable: smaller than a single concept's bonus_mult ({})",
                self.max_bonus, self.bonus_mult
            )));
        }
        Ok(())
    }
}
