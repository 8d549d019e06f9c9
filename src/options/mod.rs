//! Runtime analysis options with TOML preset support.
//!
//! Every tweakable setting of the session (proximity filter defaults,
//! contact distance mode, search behavior) lives here. Options serialize
//! to/from TOML; all sections use `#[serde(default)]` so a file that only
//! overrides `[filter]` still loads.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::contact::ContactDistanceMode;
use crate::error::ProximaError;
use crate::filter::clamp_threshold;

/// Proximity filter defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Proximity Filter", inline)]
#[serde(default)]
pub struct FilterOptions {
    /// Threshold applied after every load, in Angstroms.
    #[schemars(title = "Default Threshold", range(min = 1.0, max = 5.0), extend("step" = 0.1))]
    pub default_threshold: f32,
    /// Whether proximity filtering starts enabled.
    #[schemars(title = "Filter Enabled")]
    pub filter_enabled: bool,
    /// Quiet period before a threshold change is applied.
    #[schemars(title = "Threshold Debounce (ms)", range(min = 0, max = 1000))]
    pub threshold_debounce_ms: u64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            default_threshold: 5.0,
            filter_enabled: true,
            threshold_debounce_ms: 75,
        }
    }
}

impl FilterOptions {
    /// Default threshold clamped into the valid range.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        clamp_threshold(self.default_threshold)
    }

    /// Debounce quiet period.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.threshold_debounce_ms)
    }
}

/// Contact map construction.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Contacts", inline)]
#[serde(default)]
pub struct ContactOptions {
    /// Which distance a contact entry records.
    #[schemars(title = "Distance Mode")]
    pub distance_mode: ContactDistanceMode,
}

/// Candidate search box behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Search", inline)]
#[serde(default)]
pub struct SearchOptions {
    /// Submitting a search selects the first visible match.
    #[schemars(title = "Select First On Submit")]
    pub select_first_on_submit: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            select_first_on_submit: true,
        }
    }
}

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Proximity filter defaults.
    pub filter: FilterOptions,
    /// Contact map construction.
    pub contacts: ContactOptions,
    /// Candidate search behavior.
    pub search: SearchOptions,
}

impl AnalysisOptions {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(AnalysisOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ProximaError> {
        toml::from_str(content)
            .map_err(|e| ProximaError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ProximaError> {
        let content = std::fs::read_to_string(path)?;
        let opts = Self::from_toml(&content)?;
        log::debug!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ProximaError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProximaError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
