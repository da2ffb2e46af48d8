use serde::{Deserialize, Serialize};

use crate::config::constants::{EMISSIONS_FACTOR, GRAMS_PER_METRIC_TON};
use crate::config::engine_config::SustainabilityConfig;
use crate::core::params::action_distance_miles;
use crate::models::action::Action;
use crate::models::result::ScenarioResult;
use crate::models::scenario::ScenarioInput;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Inputs echoed back with every savings record so the arithmetic is
/// auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalAssumptions {
    pub carbon_price: f64,
    pub emissions_factor_g_per_ton_mile: f64,
    pub cargo_tons: f64,
    pub original_distance_miles: f64,
    pub optimized_distance_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalSavings {
    pub distance_saved: f64,
    pub ton_miles_saved: f64,
    pub total_tonnes_carbon_saved: f64,
    pub environmental_value: f64,
    pub assumptions: EnvironmentalAssumptions,
}

/// Environmental savings from route optimisation. A chosen route that is
/// equal or longer than the baseline saves nothing; every output field is
/// zero in that case.
pub fn calculate_environmental_sroi(
    original_distance: f64,
    optimized_distance: f64,
    cargo_tons: f64,
    carbon_price: f64,
) -> EnvironmentalSavings {
    let distance_saved = original_distance - optimized_distance;

    if distance_saved <= 0.0 {
        return EnvironmentalSavings {
            distance_saved: 0.0,
            ton_miles_saved: 0.0,
            total_tonnes_carbon_saved: 0.0,
            environmental_value: 0.0,
            assumptions: EnvironmentalAssumptions {
                carbon_price,
                emissions_factor_g_per_ton_mile: EMISSIONS_FACTOR,
                cargo_tons,
                original_distance_miles: original_distance,
                optimized_distance_miles: optimized_distance,
                note: Some(
                    "No distance saved - optimised route is equal or longer".to_string(),
                ),
            },
        };
    }

    let ton_miles_saved = distance_saved * cargo_tons;
    let total_tonnes_carbon_saved = ton_miles_saved * EMISSIONS_FACTOR / GRAMS_PER_METRIC_TON;
    let environmental_value = carbon_price * total_tonnes_carbon_saved;

    EnvironmentalSavings {
        distance_saved: round_to(distance_saved, 4),
        ton_miles_saved: round_to(ton_miles_saved, 4),
        total_tonnes_carbon_saved: round_to(total_tonnes_carbon_saved, 6),
        environmental_value: round_to(environmental_value, 4),
        assumptions: EnvironmentalAssumptions {
            carbon_price,
            emissions_factor_g_per_ton_mile: EMISSIONS_FACTOR,
            cargo_tons,
            original_distance_miles: round_to(original_distance, 4),
            optimized_distance_miles: round_to(optimized_distance, 4),
            note: None,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoilageSavings {
    pub baseline_expected_spoilage_cost: f64,
    pub chosen_expected_spoilage_cost: f64,
    pub expected_spoilage_cost_saved: f64,
}

/// Expected spoilage cost saved: baseline (continue) vs the chosen action,
/// read straight off the completed result's breakdown means.
pub fn spoilage_cost_saved(result: &ScenarioResult, chosen: Action) -> SpoilageSavings {
    let baseline = result.per_action[&Action::Continue].breakdown_means.spoilage;
    let chosen_cost = result.per_action[&chosen].breakdown_means.spoilage;

    SpoilageSavings {
        baseline_expected_spoilage_cost: round_to(baseline, 2),
        chosen_expected_spoilage_cost: round_to(chosen_cost, 2),
        expected_spoilage_cost_saved: round_to(baseline - chosen_cost, 2),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckEnvironmentalImpact {
    pub truck_id: u64,
    pub node_id: u64,
    pub baseline_action: Action,
    pub chosen_action: Action,
    pub distance_saved: f64,
    pub ton_miles_saved: f64,
    pub total_tonnes_carbon_saved: f64,
    pub environmental_value: f64,
    pub expected_spoilage_cost_saved: f64,
    pub baseline_expected_spoilage_cost: f64,
    pub chosen_expected_spoilage_cost: f64,
    pub total_sustainability_value: f64,
    pub cost_difference_vs_baseline: f64,
    pub sustainability_roi_ratio: f64,
    pub carbon_saved_per_dollar: f64,
    pub assumptions: EnvironmentalAssumptions,
}

/// Combine environmental SROI and spoilage savings for one truck. Pure
/// arithmetic over already-computed result fields; no simulation of its
/// own.
pub fn compute_truck_environmental_impact(
    result: &ScenarioResult,
    scenario: &ScenarioInput,
    config: &SustainabilityConfig,
) -> TruckEnvironmentalImpact {
    let baseline_action = Action::Continue;
    let chosen_action = result.recommended_action;

    let original_distance =
        action_distance_miles(baseline_action.definition(), scenario.distance_base_miles);
    let optimized_distance =
        action_distance_miles(chosen_action.definition(), scenario.distance_base_miles);

    let env = calculate_environmental_sroi(
        original_distance,
        optimized_distance,
        config.cargo_tons,
        config.carbon_price,
    );
    let spoilage = spoilage_cost_saved(result, chosen_action);

    let total_sustainability_value =
        env.environmental_value + spoilage.expected_spoilage_cost_saved;

    let baseline_total_cost = result.per_action[&baseline_action].stats.mean;
    let chosen_total_cost = result.per_action[&chosen_action].stats.mean;
    let cost_difference = chosen_total_cost - baseline_total_cost;

    let sustainability_roi_ratio = total_sustainability_value / cost_difference.abs().max(1.0);
    let carbon_saved_per_dollar =
        env.total_tonnes_carbon_saved / cost_difference.abs().max(1.0);

    TruckEnvironmentalImpact {
        truck_id: result.truck_id,
        node_id: result.node_id,
        baseline_action,
        chosen_action,
        distance_saved: env.distance_saved,
        ton_miles_saved: env.ton_miles_saved,
        total_tonnes_carbon_saved: env.total_tonnes_carbon_saved,
        environmental_value: env.environmental_value,
        expected_spoilage_cost_saved: spoilage.expected_spoilage_cost_saved,
        baseline_expected_spoilage_cost: spoilage.baseline_expected_spoilage_cost,
        chosen_expected_spoilage_cost: spoilage.chosen_expected_spoilage_cost,
        total_sustainability_value: round_to(total_sustainability_value, 4),
        cost_difference_vs_baseline: round_to(cost_difference, 2),
        sustainability_roi_ratio: round_to(sustainability_roi_ratio, 4),
        carbon_saved_per_dollar: round_to(carbon_saved_per_dollar, 6),
        assumptions: env.assumptions,
    }
}
