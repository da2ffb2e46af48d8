use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_CARGO_TONS, DEFAULT_RISK_THRESHOLD, DEFAULT_SAMPLE_COUNT, DEFAULT_SEED,
    EPA_CARBON_PRICE,
};

/// Knobs for one evaluation run. `risk_threshold` selects the scoring
/// quantile (lower = more conservative); `seed` is combined with each
/// truck id to give every scenario an independent-but-reproducible stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub risk_threshold: f64,
    pub samples: usize,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            samples: DEFAULT_SAMPLE_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    pub fn seed_for_truck(&self, truck_id: u64) -> u64 {
        self.seed.wrapping_add(truck_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainabilityConfig {
    pub cargo_tons: f64,
    pub carbon_price: f64,
}

impl Default for SustainabilityConfig {
    fn default() -> Self {
        Self {
            cargo_tons: DEFAULT_CARGO_TONS,
            carbon_price: EPA_CARBON_PRICE,
        }
    }
}
