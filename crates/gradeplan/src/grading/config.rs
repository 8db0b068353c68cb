/// Planner settings used by the study advisor
use super::error::GradingError;
use super::table::band_threshold;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Nominal credit load needed to graduate.
pub const DEFAULT_NOMINAL_CREDITS: f64 = 180.0;

pub const DEFAULT_TARGET_CLASS: &str = "Second Class Upper";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_nominal_credits")]
    pub nominal_credits: f64,
    /// Used when a profile has no target classification
    #[serde(default = "default_target_class")]
    pub default_target_class: String,
}

impl PlannerConfig {
    /// Loads planner settings from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(PlannerConfig)` - Parsed and validated settings
    /// * `Err` - If the file can't be read, parsed, or fails validation
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GradingError> {
        if !(self.nominal_credits > 0.0) {
            return Err(GradingError::InvalidField {
                field: "nominal_credits",
                reason: format!("{} must be positive", self.nominal_credits),
            });
        }
        band_threshold(&self.default_target_class)?;
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            nominal_credits: DEFAULT_NOMINAL_CREDITS,
            default_target_class: DEFAULT_TARGET_CLASS.to_string(),
        }
    }
}

fn default_nominal_credits() -> f64 {
    DEFAULT_NOMINAL_CREDITS
}

fn default_target_class() -> String {
    DEFAULT_TARGET_CLASS.to_string()
}
