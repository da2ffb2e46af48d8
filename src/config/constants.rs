// Action Overhead Constants (minutes / dollars)
pub const CONTINUE_EXTRA_TRAVEL_MINUTES: f64 = 0.0;
pub const CONTINUE_EXTRA_HANDLING_MINUTES: f64 = 0.0;
pub const CONTINUE_FIXED_COST: f64 = 0.0;

pub const REROUTE_EXTRA_TRAVEL_MINUTES: f64 = 45.0;
pub const REROUTE_EXTRA_HANDLING_MINUTES: f64 = 3.0;
pub const REROUTE_FIXED_COST: f64 = 500.0;

pub const DETOUR_EXTRA_TRAVEL_MINUTES: f64 = 30.0;
pub const DETOUR_EXTRA_HANDLING_MINUTES: f64 = 50.0;
pub const DETOUR_FIXED_COST: f64 = 2000.0;

// Distance Markup
// Every 300 minutes of action overhead is modeled as a 100% distance markup
pub const OVERHEAD_MINUTES_PER_DISTANCE_DOUBLING: f64 = 300.0;

// Operating & Travel Draw Bounds
pub const MILE_COST_MIN: f64 = 2.20;           // $/mile
pub const MILE_COST_MAX: f64 = 2.35;
pub const SPEED_MPH_MIN: f64 = 30.0;
pub const SPEED_MPH_MAX: f64 = 55.0;
pub const HANDLING_FEE_MIN: f64 = 100.0;       // $ per shipment
pub const HANDLING_FEE_MAX: f64 = 500.0;

// Shipment Valuation (triangular, used when value is unknown)
pub const SHIPMENT_VALUE_LOW: f64 = 50_000.0;
pub const SHIPMENT_VALUE_MODE: f64 = 75_000.0;
pub const SHIPMENT_VALUE_HIGH: f64 = 100_000.0;

// Delay / Service Costs
pub const OTIF_PENALTY_FRACTION: f64 = 0.03;   // fraction of shipment value
pub const DETENTION_RATE_MIN: f64 = 0.5;       // $/minute of billable delay
pub const DETENTION_RATE_MAX: f64 = 0.83;

// Spoilage Hazard Calibration
// Two anchors: 20% cumulative loss probability at 1 hour, 80% at 6 hours
pub const SPOILAGE_ANCHOR_EARLY_P: f64 = 0.2;
pub const SPOILAGE_ANCHOR_EARLY_HOURS: f64 = 1.0;
pub const SPOILAGE_ANCHOR_LATE_P: f64 = 0.8;
pub const SPOILAGE_ANCHOR_LATE_HOURS: f64 = 6.0;
pub const HAZARD_KNEE_HOURS: f64 = 4.0;        // below this, early anchor only
pub const HAZARD_BLEND_HOURS: f64 = 2.0;       // interpolation window past the knee
pub const HAZARD_JITTER_MIN: f64 = 0.95;       // per-draw perturbation of anchor rates
pub const HAZARD_JITTER_MAX: f64 = 1.05;

// Spoilage Environment Multipliers
pub const DOOR_OPEN_MULTIPLIER: f64 = 1.5;
pub const HIGH_HUMIDITY_MULTIPLIER: f64 = 1.2;

// Engine Defaults
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.50;
pub const DEFAULT_SAMPLE_COUNT: usize = 20_000;
pub const DEFAULT_SEED: u64 = 42;

// Sustainability Constants
pub const EPA_CARBON_PRICE: f64 = 190.0;       // $/metric ton CO2 (EPA social cost)
pub const EMISSIONS_FACTOR: f64 = 161.8;       // grams CO2 per ton-mile, medium/heavy truck
pub const DEFAULT_CARGO_TONS: f64 = 20.0;
pub const GRAMS_PER_METRIC_TON: f64 = 1_000_000.0;
