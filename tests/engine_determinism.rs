// End-to-end checks of the decision engine's reproducibility contract.

use coldroute::config::engine_config::EngineConfig;
use coldroute::core::evaluator::{evaluate_batch, evaluate_scenario};
use coldroute::data::scenarios_loader::parse_scenarios;
use coldroute::models::action::Action;
use coldroute::models::scenario::ScenarioInput;

fn reference_scenario() -> ScenarioInput {
    ScenarioInput {
        truck_id: 1,
        node_id: 10,
        minutes_above_temp: 20.0,
        future_violation_if_continue: 30.0,
        reroute_reduction: 18.0,
        detour_repair_benefit: 40.0,
        slack_minutes: 10.0,
        door_open: false,
        high_humidity: false,
        distance_base_miles: 100.0,
        delay_base_minutes: 15.0,
        spoilage_time_base_hours: 2.0,
        shipment_value: Some(75_000.0),
        recommended_action: None,
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let scenario = reference_scenario();
    let a = evaluate_scenario(&scenario, 0.50, 5000, 42);
    let b = evaluate_scenario(&scenario, 0.50, 5000, 42);

    assert_eq!(a.recommended_action, b.recommended_action);
    assert_eq!(a.rationale, b.rationale);
    for action in Action::ALL {
        let ea = &a.per_action[&action];
        let eb = &b.per_action[&action];
        assert_eq!(ea.score, eb.score);
        assert_eq!(ea.stats.p05, eb.stats.p05);
        assert_eq!(ea.stats.p95, eb.stats.p95);
        assert_eq!(ea.breakdown_means.spoilage, eb.breakdown_means.spoilage);
    }
    assert_eq!(
        serde_json::to_string(&a).expect("serialize"),
        serde_json::to_string(&b).expect("serialize")
    );
}

#[test]
fn quantile_labels_match_risk_posture() {
    let scenario = reference_scenario();
    for (risk, label) in [(0.25, "p75"), (0.50, "p50"), (0.75, "p25")] {
        let result = evaluate_scenario(&scenario, risk, 1000, 42);
        assert_eq!(result.quantile_used, label);
        assert_eq!(result.risk_threshold, risk);
    }
}

#[test]
fn csv_roundtrip_feeds_the_engine() {
    let csv = "\
truck_id,node_id,minutes_above_temp,future_violation_if_continue,reroute_reduction,\
detour_repair_benefit,slack_minutes,door_open,high_humidity,distance_base_miles,\
delay_base_minutes,spoilage_time_base_hours,shipment_value,recommended_action
1,10,20,30,18,40,10,0,0,100,15,2,75000,
2,11,0,0,0,0,60,1,1,50,5,0,,continue
";
    let batch = parse_scenarios(csv).expect("parse");
    assert_eq!(batch.scenarios.len(), 2);
    assert!(batch.skipped.is_empty());

    let config = EngineConfig {
        risk_threshold: 0.50,
        samples: 1000,
        seed: 42,
    };
    let results = evaluate_batch(&batch.scenarios, &config, true, false);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].truck_id, 1);
    assert_eq!(results[1].truck_id, 2);
    // Truck 2 carries an external override.
    assert_eq!(results[1].recommended_action, Action::Continue);
    assert!(results[1].rationale.contains("from routing decision data"));
}

#[test]
fn per_truck_streams_are_independent_of_batch_composition() {
    let mut solo = reference_scenario();
    solo.truck_id = 9;

    let mut other = reference_scenario();
    other.truck_id = 4;

    let config = EngineConfig {
        risk_threshold: 0.50,
        samples: 1000,
        seed: 42,
    };

    let alone = evaluate_batch(std::slice::from_ref(&solo), &config, false, false);
    let together = evaluate_batch(&[other, solo.clone()], &config, true, false);

    assert_eq!(
        alone[0].per_action[&Action::Continue].stats.mean,
        together[1].per_action[&Action::Continue].stats.mean
    );
    assert_eq!(alone[0].rationale, together[1].rationale);
}
