use crate::config::constants::OVERHEAD_MINUTES_PER_DISTANCE_DOUBLING;
use crate::models::action::{Action, ActionDefinition};
use crate::models::scenario::ScenarioInput;

/// Inputs to one sampler call, fully determined by (action, scenario).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub distance_miles: f64,
    pub door_open: bool,
    pub high_humidity: bool,
    pub net_delay_minutes: f64,
    pub spoilage_time_hours: f64,
    pub fixed_cost: f64,
    pub shipment_value: Option<f64>,
}

/// Effective mileage for an action: overhead minutes are modeled as an
/// equivalent distance markup.
pub fn action_distance_miles(def: &ActionDefinition, distance_base_miles: f64) -> f64 {
    distance_base_miles * (1.0 + def.extra_time() / OVERHEAD_MINUTES_PER_DISTANCE_DOUBLING)
}

/// Pure mapping (action, scenario) -> simulation parameters. No
/// randomness; everything the sampler needs is fixed here.
pub fn derive_params(def: &ActionDefinition, scenario: &ScenarioInput) -> SimulationParams {
    let extra_time = def.extra_time();

    // The service stop repairs the cold-chain fault, so detour ignores the
    // scenario's door/humidity flags.
    let (door_open, high_humidity) = match def.action {
        Action::Detour => (false, false),
        _ => (scenario.door_open, scenario.high_humidity),
    };

    // Slack absorbs added time before it becomes billable delay.
    let net_delay_minutes =
        (scenario.delay_base_minutes + extra_time - scenario.slack_minutes).max(0.0);

    let extra_violation = def.action.extra_violation_minutes(extra_time, scenario);
    let spoilage_time_hours = scenario.spoilage_time_base_hours
        + (scenario.minutes_above_temp + extra_violation) / 60.0;

    SimulationParams {
        distance_miles: action_distance_miles(def, scenario.distance_base_miles),
        door_open,
        high_humidity,
        net_delay_minutes,
        spoilage_time_hours,
        fixed_cost: def.fixed_cost,
        shipment_value: scenario.shipment_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::action::CATALOG;

    const EPS: f64 = 1e-12;

    fn scenario() -> ScenarioInput {
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
    fn distance_markup_for_all_actions() {
        let s = scenario();
        for def in &CATALOG {
            let expected = 100.0 * (1.0 + def.extra_time() / 300.0);
            assert!((action_distance_miles(def, s.distance_base_miles) - expected).abs() < EPS);
        }
        // Spot values: continue 100, reroute 116, detour ~126.67.
        assert!((derive_params(&CATALOG[0], &s).distance_miles - 100.0).abs() < EPS);
        assert!((derive_params(&CATALOG[1], &s).distance_miles - 116.0).abs() < EPS);
        assert!((derive_params(&CATALOG[2], &s).distance_miles - 100.0 * (1.0 + 80.0 / 300.0)).abs() < EPS);
    }

    #[test]
    fn net_delay_reference_example() {
        let s = scenario();
        assert!((derive_params(&CATALOG[0], &s).net_delay_minutes - 15.0).abs() < EPS);
        assert!((derive_params(&CATALOG[1], &s).net_delay_minutes - 53.0).abs() < EPS);
        assert!((derive_params(&CATALOG[2], &s).net_delay_minutes - 85.0).abs() < EPS);
    }

    #[test]
    fn slack_floors_net_delay_at_zero() {
        let mut s = scenario();
        s.slack_minutes = 500.0;
        for def in &CATALOG {
            assert_eq!(derive_params(def, &s).net_delay_minutes, 0.0);
        }
    }

    #[test]
    fn detour_forces_environment_flags_off() {
        let mut s = scenario();
        s.door_open = true;
        s.high_humidity = true;

        let detour = derive_params(&CATALOG[2], &s);
        assert!(!detour.door_open);
        assert!(!detour.high_humidity);

        let reroute = derive_params(&CATALOG[1], &s);
        assert!(reroute.door_open);
        assert!(reroute.high_humidity);
    }

    #[test]
    fn spoilage_time_adds_violation_minutes() {
        let s = scenario();
        // continue: 2h base + (20 above + 30 future) / 60
        let p = derive_params(&CATALOG[0], &s);
        assert!((p.spoilage_time_hours - (2.0 + 50.0 / 60.0)).abs() < EPS);
        // detour: extra_time 80 - benefit 40 = 40 extra violation minutes
        let p = derive_params(&CATALOG[2], &s);
        assert!((p.spoilage_time_hours - (2.0 + (20.0 + 40.0) / 60.0)).abs() < EPS);
    }

    #[test]
    fn fixed_cost_and_value_pass_through() {
        let s = scenario();
        assert_eq!(derive_params(&CATALOG[1], &s).fixed_cost, 500.0);
        assert_eq!(derive_params(&CATALOG[2], &s).fixed_cost, 2000.0);
        assert_eq!(derive_params(&CATALOG[0], &s).shipment_value, Some(75_000.0));
    }
}
