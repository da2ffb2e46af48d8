use serde::{Deserialize, Serialize};

use crate::config::constants::{
    CONTINUE_EXTRA_HANDLING_MINUTES, CONTINUE_EXTRA_TRAVEL_MINUTES, CONTINUE_FIXED_COST,
    DETOUR_EXTRA_HANDLING_MINUTES, DETOUR_EXTRA_TRAVEL_MINUTES, DETOUR_FIXED_COST,
    REROUTE_EXTRA_HANDLING_MINUTES, REROUTE_EXTRA_TRAVEL_MINUTES, REROUTE_FIXED_COST,
};
use crate::models::scenario::ScenarioInput;

/// The closed set of candidate actions for one truck at one decision point.
/// Variant order is catalog order and doubles as the deterministic
/// tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Continue,
    Reroute,
    Detour,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Continue, Action::Reroute, Action::Detour];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Continue => "continue",
            Action::Reroute => "reroute",
            Action::Detour => "detour",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        match name {
            "continue" => Some(Action::Continue),
            "reroute" => Some(Action::Reroute),
            "detour" => Some(Action::Detour),
            _ => None,
        }
    }

    pub fn definition(&self) -> &'static ActionDefinition {
        &CATALOG[*self as usize]
    }

    /// Additional projected temperature-violation minutes for this action.
    ///
    /// continue – inherits the full projected violation.
    /// reroute  – reduces the projection, but its own extra time counts
    ///            against cargo that is already in excursion.
    /// detour   – extra time offset by the service stop's repair benefit.
    pub fn extra_violation_minutes(&self, extra_time: f64, scenario: &ScenarioInput) -> f64 {
        let future = scenario.future_violation_if_continue;
        match self {
            Action::Continue => future,
            Action::Reroute => {
                let reduced = (future - scenario.reroute_reduction).max(0.0);
                let penalty = if scenario.minutes_above_temp > 0.0 {
                    extra_time
                } else {
                    0.0
                };
                reduced + penalty
            }
            Action::Detour => (extra_time - scenario.detour_repair_benefit).max(0.0),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed overheads of one candidate action. Three immutable instances
/// exist for the life of the process; identity is the action variant.
#[derive(Debug, Clone)]
pub struct ActionDefinition {
    pub action: Action,
    pub extra_travel_minutes: f64,
    pub extra_handling_minutes: f64,
    pub fixed_cost: f64,
}

impl ActionDefinition {
    pub fn extra_time(&self) -> f64 {
        self.extra_travel_minutes + self.extra_handling_minutes
    }
}

pub static CATALOG: [ActionDefinition; 3] = [
    ActionDefinition {
        action: Action::Continue,
        extra_travel_minutes: CONTINUE_EXTRA_TRAVEL_MINUTES,
        extra_handling_minutes: CONTINUE_EXTRA_HANDLING_MINUTES,
        fixed_cost: CONTINUE_FIXED_COST,
    },
    ActionDefinition {
        action: Action::Reroute,
        extra_travel_minutes: REROUTE_EXTRA_TRAVEL_MINUTES,
        extra_handling_minutes: REROUTE_EXTRA_HANDLING_MINUTES,
        fixed_cost: REROUTE_FIXED_COST,
    },
    ActionDefinition {
        action: Action::Detour,
        extra_travel_minutes: DETOUR_EXTRA_TRAVEL_MINUTES,
        extra_handling_minutes: DETOUR_EXTRA_HANDLING_MINUTES,
        fixed_cost: DETOUR_FIXED_COST,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

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
    fn continue_inherits_full_projection() {
        let s = scenario();
        assert_eq!(Action::Continue.extra_violation_minutes(0.0, &s), 30.0);
        assert_eq!(Action::Continue.extra_violation_minutes(999.0, &s), 30.0);
    }

    #[test]
    fn reroute_pays_extra_time_only_while_in_excursion() {
        let mut s = scenario();
        // Already above temp: reduced projection plus the reroute's own time.
        assert_eq!(Action::Reroute.extra_violation_minutes(48.0, &s), 12.0 + 48.0);

        s.minutes_above_temp = 0.0;
        assert_eq!(Action::Reroute.extra_violation_minutes(48.0, &s), 12.0);
    }

    #[test]
    fn reroute_reduction_floors_at_zero() {
        let mut s = scenario();
        s.minutes_above_temp = 0.0;
        s.reroute_reduction = 100.0;
        assert_eq!(Action::Reroute.extra_violation_minutes(48.0, &s), 0.0);
    }

    #[test]
    fn detour_offsets_extra_time_by_repair_benefit() {
        let s = scenario();
        assert_eq!(Action::Detour.extra_violation_minutes(80.0, &s), 40.0);
        assert_eq!(Action::Detour.extra_violation_minutes(30.0, &s), 0.0);
    }

    #[test]
    fn catalog_matches_variant_indices() {
        for (i, def) in CATALOG.iter().enumerate() {
            assert_eq!(def.action as usize, i);
            assert!(std::ptr::eq(def.action.definition(), def));
        }
    }

    #[test]
    fn names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
        assert_eq!(Action::from_name("teleport"), None);
    }

    #[test]
    fn extra_time_sums_travel_and_handling() {
        assert_eq!(Action::Continue.definition().extra_time(), 0.0);
        assert_eq!(Action::Reroute.definition().extra_time(), 48.0);
        assert_eq!(Action::Detour.definition().extra_time(), 80.0);
    }
}
