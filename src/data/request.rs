use serde::Deserialize;

use crate::config::constants::{DEFAULT_RISK_THRESHOLD, DEFAULT_SAMPLE_COUNT, DEFAULT_SEED};
use crate::config::engine_config::EngineConfig;
use crate::models::scenario::ScenarioInput;

fn default_risk_threshold() -> f64 {
    DEFAULT_RISK_THRESHOLD
}

fn default_samples() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// One evaluation request as received over the process boundary.
/// Scenarios come either from a CSV path or inline; inline records use
/// the same field names as the tabular schema.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default = "default_risk_threshold")]
    pub risk_threshold: f64,
    #[serde(default = "default_samples")]
    pub n: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub csv_path: Option<String>,
    #[serde(default)]
    pub trucks: Option<Vec<ScenarioInput>>,
}

impl EvaluationRequest {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            risk_threshold: self.risk_threshold,
            samples: self.n,
            seed: self.seed,
        }
    }
}
