use serde::{Deserialize, Serialize};

use crate::models::action::Action;

/// One truck's state at one decision point. Built once per evaluation call
/// from an external record, validated, then never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub truck_id: u64,
    pub node_id: u64,
    pub minutes_above_temp: f64,
    pub future_violation_if_continue: f64,
    pub reroute_reduction: f64,
    pub detour_repair_benefit: f64,
    pub slack_minutes: f64,
    pub door_open: bool,
    pub high_humidity: bool,
    pub distance_base_miles: f64,
    pub delay_base_minutes: f64,
    pub spoilage_time_base_hours: f64,
    #[serde(default)]
    pub shipment_value: Option<f64>,
    #[serde(default, deserialize_with = "de_recommended_action")]
    pub recommended_action: Option<Action>,
}

/// An externally supplied action that names nothing in the catalog is
/// treated as absent, not as an error.
fn de_recommended_action<'de, D>(deserializer: D) -> Result<Option<Action>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(Action::from_name))
}

#[derive(Debug)]
pub struct ScenarioValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl std::fmt::Display for ScenarioValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid scenario field '{}': {}", self.field, self.reason)
    }
}

impl std::error::Error for ScenarioValidationError {}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ScenarioValidationError> {
    if !value.is_finite() {
        return Err(ScenarioValidationError {
            field,
            reason: format!("must be finite, got {}", value),
        });
    }
    if value < 0.0 {
        return Err(ScenarioValidationError {
            field,
            reason: format!("must be non-negative, got {}", value),
        });
    }
    Ok(())
}

impl ScenarioInput {
    /// Range/finiteness checks on every numeric field. Parsing gets a
    /// value of the right type; this rejects values outside the model's
    /// domain before they reach the sampler.
    pub fn validate(&self) -> Result<(), ScenarioValidationError> {
        check_non_negative("minutes_above_temp", self.minutes_above_temp)?;
        check_non_negative("future_violation_if_continue", self.future_violation_if_continue)?;
        check_non_negative("reroute_reduction", self.reroute_reduction)?;
        check_non_negative("detour_repair_benefit", self.detour_repair_benefit)?;
        check_non_negative("slack_minutes", self.slack_minutes)?;
        check_non_negative("delay_base_minutes", self.delay_base_minutes)?;
        check_non_negative("spoilage_time_base_hours", self.spoilage_time_base_hours)?;

        if !self.distance_base_miles.is_finite() || self.distance_base_miles <= 0.0 {
            return Err(ScenarioValidationError {
                field: "distance_base_miles",
                reason: format!("must be positive and finite, got {}", self.distance_base_miles),
            });
        }

        if let Some(value) = self.shipment_value {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScenarioValidationError {
                    field: "shipment_value",
                    reason: format!("must be positive when present, got {}", value),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ScenarioInput {
        ScenarioInput {
            truck_id: 7,
            node_id: 3,
            minutes_above_temp: 0.0,
            future_violation_if_continue: 12.0,
            reroute_reduction: 6.0,
            detour_repair_benefit: 10.0,
            slack_minutes: 20.0,
            door_open: false,
            high_humidity: true,
            distance_base_miles: 250.0,
            delay_base_minutes: 5.0,
            spoilage_time_base_hours: 0.5,
            shipment_value: None,
            recommended_action: None,
        }
    }

    #[test]
    fn valid_scenario_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn negative_time_fields_rejected() {
        let mut s = valid();
        s.minutes_above_temp = -1.0;
        let err = s.validate().unwrap_err();
        assert_eq!(err.field, "minutes_above_temp");
    }

    #[test]
    fn non_finite_rejected() {
        let mut s = valid();
        s.delay_base_minutes = f64::NAN;
        assert!(s.validate().is_err());
        s = valid();
        s.slack_minutes = f64::INFINITY;
        assert!(s.validate().is_err());
    }

    #[test]
    fn zero_distance_rejected() {
        let mut s = valid();
        s.distance_base_miles = 0.0;
        let err = s.validate().unwrap_err();
        assert_eq!(err.field, "distance_base_miles");
    }

    #[test]
    fn non_positive_shipment_value_rejected() {
        let mut s = valid();
        s.shipment_value = Some(0.0);
        assert!(s.validate().is_err());
        s.shipment_value = Some(80_000.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn unknown_recommended_action_deserializes_as_absent() {
        let mut json = serde_json::to_value(valid()).expect("serialize");
        json["recommended_action"] = serde_json::Value::String("teleport".to_string());
        let parsed: ScenarioInput = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed.recommended_action, None);

        let mut json = serde_json::to_value(valid()).expect("serialize");
        json["recommended_action"] = serde_json::Value::String("detour".to_string());
        let parsed: ScenarioInput = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed.recommended_action, Some(Action::Detour));
    }
}
