use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::stats::CostStats;
use crate::models::action::Action;
use crate::models::scenario::ScenarioInput;

/// Expected value of each cost component, plus the action's fixed cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownMeans {
    pub operating_travel: f64,
    pub delay_service: f64,
    pub spoilage: f64,
    pub fixed_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEvaluation {
    pub stats: CostStats,
    pub breakdown_means: BreakdownMeans,
    pub score: f64,
}

/// The completed decision for one scenario: every action's distribution
/// summary, the chosen action, and a human-readable rationale. Immutable
/// once produced; this is the unit handed to the sustainability
/// translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub truck_id: u64,
    pub node_id: u64,
    pub inputs: ScenarioInput,
    pub per_action: BTreeMap<Action, ActionEvaluation>,
    pub recommended_action: Action,
    pub risk_threshold: f64,
    pub quantile_used: String,
    pub rationale: String,
}
