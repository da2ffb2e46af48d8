use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Triangular;

use crate::config::constants::{
    DETENTION_RATE_MAX, DETENTION_RATE_MIN, DOOR_OPEN_MULTIPLIER, HANDLING_FEE_MAX,
    HANDLING_FEE_MIN, HAZARD_BLEND_HOURS, HAZARD_JITTER_MAX, HAZARD_JITTER_MIN, HAZARD_KNEE_HOURS,
    HIGH_HUMIDITY_MULTIPLIER, MILE_COST_MAX, MILE_COST_MIN, OTIF_PENALTY_FRACTION,
    SHIPMENT_VALUE_HIGH, SHIPMENT_VALUE_LOW, SHIPMENT_VALUE_MODE, SPEED_MPH_MAX, SPEED_MPH_MIN,
    SPOILAGE_ANCHOR_EARLY_HOURS, SPOILAGE_ANCHOR_EARLY_P, SPOILAGE_ANCHOR_LATE_HOURS,
    SPOILAGE_ANCHOR_LATE_P,
};
use crate::core::params::SimulationParams;

/// N simulated outcomes for one action under one scenario. The four
/// sequences are index-aligned: sample i of `total` is the sum of sample i
/// of each component plus the action's fixed cost.
#[derive(Debug, Clone)]
pub struct CostSample {
    pub total: Vec<f64>,
    pub operating_travel: Vec<f64>,
    pub delay_service: Vec<f64>,
    pub spoilage: Vec<f64>,
}

impl CostSample {
    pub fn len(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }
}

/// Joint Monte Carlo draw of the shipment cost distribution.
///
/// Reproducibility contract: for each sample, variables are drawn from
/// `rng` in this exact order —
///   1. mile cost   2. speed   3. handling fee
///   4. shipment value (only when the scenario did not supply one)
///   5. detention rate   6. early-anchor hazard jitter
///   7. late-anchor hazard jitter
/// Identical seeds therefore yield identical sequences. Advancing `rng`
/// is the only side effect.
pub fn simulate_cost_distribution<R: Rng>(
    params: &SimulationParams,
    n: usize,
    rng: &mut R,
) -> CostSample {
    let mile_cost = Uniform::new(MILE_COST_MIN, MILE_COST_MAX);
    let speed_mph = Uniform::new(SPEED_MPH_MIN, SPEED_MPH_MAX);
    let handling_fee = Uniform::new(HANDLING_FEE_MIN, HANDLING_FEE_MAX);
    let detention_rate = Uniform::new(DETENTION_RATE_MIN, DETENTION_RATE_MAX);
    let hazard_jitter = Uniform::new(HAZARD_JITTER_MIN, HAZARD_JITTER_MAX);
    // Only consulted when the scenario did not supply a value; building it
    // up front consumes no draws.
    let shipment_dist =
        Triangular::new(SHIPMENT_VALUE_LOW, SHIPMENT_VALUE_HIGH, SHIPMENT_VALUE_MODE)
            .expect("shipment value triangle bounds are valid constants");

    // Hazard anchors: lambda = -ln(1 - p) / t at each calibration point.
    let lambda_early_base =
        -(1.0 - SPOILAGE_ANCHOR_EARLY_P).ln() / SPOILAGE_ANCHOR_EARLY_HOURS;
    let lambda_late_base = -(1.0 - SPOILAGE_ANCHOR_LATE_P).ln() / SPOILAGE_ANCHOR_LATE_HOURS;

    // Negative derived times never reach the hazard model.
    let t = params.spoilage_time_hours.max(0.0);
    let blend = ((t - HAZARD_KNEE_HOURS) / HAZARD_BLEND_HOURS).clamp(0.0, 1.0);
    let net_delay = params.net_delay_minutes.max(0.0);

    let door_mult = if params.door_open { DOOR_OPEN_MULTIPLIER } else { 1.0 };
    let humidity_mult = if params.high_humidity { HIGH_HUMIDITY_MULTIPLIER } else { 1.0 };
    let env_mult = door_mult * humidity_mult;

    let mut total = Vec::with_capacity(n);
    let mut operating_travel = Vec::with_capacity(n);
    let mut delay_service = Vec::with_capacity(n);
    let mut spoilage = Vec::with_capacity(n);

    for _ in 0..n {
        let rate_per_mile = mile_cost.sample(rng) * speed_mph.sample(rng) / 60.0;
        let operating = rate_per_mile * params.distance_miles + handling_fee.sample(rng);

        let shipment_value = match params.shipment_value {
            Some(value) => value,
            None => shipment_dist.sample(rng),
        };
        let otif_cost = OTIF_PENALTY_FRACTION * shipment_value;
        let detention_cost = detention_rate.sample(rng) * net_delay;
        let delay = otif_cost + detention_cost;

        let lambda_early = lambda_early_base * hazard_jitter.sample(rng);
        let lambda_late = lambda_late_base * hazard_jitter.sample(rng);
        let lambda_eff = if t <= HAZARD_KNEE_HOURS {
            lambda_early
        } else {
            lambda_early + blend * (lambda_late - lambda_early)
        };
        let p_loss = 1.0 - (-lambda_eff * t).exp();
        let spoil = shipment_value * p_loss * env_mult;

        operating_travel.push(operating);
        delay_service.push(delay);
        spoilage.push(spoil);
        total.push(operating + delay + spoil + params.fixed_cost);
    }

    CostSample {
        total,
        operating_travel,
        delay_service,
        spoilage,
    }
}
