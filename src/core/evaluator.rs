use std::collections::BTreeMap;

use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::debug;

use crate::config::engine_config::EngineConfig;
use crate::core::params::derive_params;
use crate::core::sampler::simulate_cost_distribution;
use crate::core::stats::{compute_stats, mean, percentile};
use crate::models::action::{Action, CATALOG};
use crate::models::result::{ActionEvaluation, BreakdownMeans, ScenarioResult};
use crate::models::scenario::ScenarioInput;
use crate::utils::logging::{self, EvaluationType, OperationCategory};

const CANONICAL_THRESHOLD_EPS: f64 = 1e-9;

fn risk_label(risk_threshold: f64) -> String {
    if (risk_threshold - 0.25).abs() < CANONICAL_THRESHOLD_EPS {
        "25% Safe".to_string()
    } else if (risk_threshold - 0.50).abs() < CANONICAL_THRESHOLD_EPS {
        "50% Balanced".to_string()
    } else if (risk_threshold - 0.75).abs() < CANONICAL_THRESHOLD_EPS {
        "75% Cheap".to_string()
    } else {
        format!("{}%", (risk_threshold * 100.0) as i64)
    }
}

fn fmt_money(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Minimum-score action; exact ties keep the earlier catalog entry so the
/// result is reproducible under equal scores.
fn pick_lowest(scores: &[(Action, f64)]) -> Action {
    let mut best = scores[0];
    for &(action, score) in &scores[1..] {
        if score < best.1 {
            best = (action, score);
        }
    }
    best.0
}

/// Evaluate all three actions for one scenario and decide.
///
/// One RNG stream is advanced sequentially across the actions in catalog
/// order: reroute's draws begin exactly where continue's left off, and
/// detour's where reroute's left off. Given a fixed seed the whole
/// scenario is one deterministic consumption of a single stream.
pub fn evaluate_scenario(
    scenario: &ScenarioInput,
    risk_threshold: f64,
    samples: usize,
    seed: u64,
) -> ScenarioResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let quantile_pct = 1.0 - risk_threshold;
    let quantile_label = format!("p{}", (quantile_pct * 100.0) as i64);

    let mut per_action = BTreeMap::new();
    let mut scores: Vec<(Action, f64)> = Vec::with_capacity(CATALOG.len());

    for def in &CATALOG {
        let params = derive_params(def, scenario);
        let sample = simulate_cost_distribution(&params, samples, &mut rng);
        let stats = compute_stats(&sample.total);
        let score = percentile(&sample.total, quantile_pct * 100.0);

        debug!(
            truck_id = scenario.truck_id,
            action = def.action.name(),
            score,
            mean = stats.mean,
            "action evaluated"
        );

        per_action.insert(
            def.action,
            ActionEvaluation {
                stats,
                breakdown_means: BreakdownMeans {
                    operating_travel: mean(&sample.operating_travel),
                    delay_service: mean(&sample.delay_service),
                    spoilage: mean(&sample.spoilage),
                    fixed_cost: def.fixed_cost,
                },
                score,
            },
        );
        scores.push((def.action, score));
    }

    let risk_label = risk_label(risk_threshold);
    let (chosen, rationale) = match scenario.recommended_action {
        // External override: adopt the routed action without comparison.
        Some(action) => {
            let score = per_action[&action].score;
            (
                action,
                format!(
                    "Action '{}' from routing decision data ({} cost: ${} at {} risk)",
                    action,
                    quantile_label,
                    fmt_money(score),
                    risk_label
                ),
            )
        }
        None => {
            let chosen = pick_lowest(&scores);
            let score = per_action[&chosen].score;
            (
                chosen,
                format!(
                    "Selected '{}' because it minimizes {} cost (${}) at {} risk tolerance",
                    chosen,
                    quantile_label,
                    fmt_money(score),
                    risk_label
                ),
            )
        }
    };

    ScenarioResult {
        truck_id: scenario.truck_id,
        node_id: scenario.node_id,
        inputs: scenario.clone(),
        per_action,
        recommended_action: chosen,
        risk_threshold,
        quantile_used: quantile_label,
        rationale,
    }
}

/// Evaluate a batch of independent scenarios, preserving input order.
/// Each truck gets its own stream seeded `seed + truck_id`, so parallel
/// and sequential execution produce identical output.
pub fn evaluate_batch(
    scenarios: &[ScenarioInput],
    config: &EngineConfig,
    parallel: bool,
    show_progress: bool,
) -> Vec<ScenarioResult> {
    let _timing = logging::start_timing(
        "evaluate_batch",
        OperationCategory::Evaluation {
            subcategory: EvaluationType::Scoring,
        },
    );

    let progress = if show_progress && scenarios.len() > 1 {
        Some(ProgressBar::new(scenarios.len() as u64))
    } else {
        None
    };

    let eval = |scenario: &ScenarioInput| {
        let result = evaluate_scenario(
            scenario,
            config.risk_threshold,
            config.samples,
            config.seed_for_truck(scenario.truck_id),
        );
        if let Some(pb) = &progress {
            pb.inc(1);
        }
        result
    };

    let results: Vec<ScenarioResult> = if parallel {
        scenarios.par_iter().map(eval).collect()
    } else {
        scenarios.iter().map(eval).collect()
    };

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    results
}
