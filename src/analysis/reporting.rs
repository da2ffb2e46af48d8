use crate::analysis::sustainability::TruckEnvironmentalImpact;
use crate::models::result::ScenarioResult;

pub fn print_scenario_summary(result: &ScenarioResult) {
    println!("\nTruck {} @ node {}", result.truck_id, result.node_id);
    println!("----------------------------------------");
    for (action, eval) in &result.per_action {
        println!(
            "  {:<8} score ${:>12.2}  mean ${:>12.2}  p95 ${:>12.2}",
            action.name(),
            eval.score,
            eval.stats.mean,
            eval.stats.p95
        );
        println!(
            "           breakdown: travel ${:.2}, delay ${:.2}, spoilage ${:.2}, fixed ${:.2}",
            eval.breakdown_means.operating_travel,
            eval.breakdown_means.delay_service,
            eval.breakdown_means.spoilage,
            eval.breakdown_means.fixed_cost
        );
    }
    println!(
        "  Decision: {} ({} at risk {})",
        result.recommended_action, result.quantile_used, result.risk_threshold
    );
    println!("  {}", result.rationale);
}

pub fn print_batch_summary(results: &[ScenarioResult]) {
    for result in results {
        print_scenario_summary(result);
    }
    println!("\n{} scenario(s) evaluated", results.len());
}

pub fn print_impact_summary(impact: &TruckEnvironmentalImpact) {
    println!("\nTruck {} Sustainability", impact.truck_id);
    println!("----------------------------------------");
    println!(
        "  Baseline: {}  Chosen: {}",
        impact.baseline_action, impact.chosen_action
    );
    println!("  Distance Saved: {:.2} miles", impact.distance_saved);
    println!("  Carbon Saved: {:.6} tonnes CO2", impact.total_tonnes_carbon_saved);
    println!("  Environmental Value: ${:.2}", impact.environmental_value);
    println!(
        "  Expected Spoilage Saved: ${:.2}",
        impact.expected_spoilage_cost_saved
    );
    println!(
        "  Total Sustainability Value: ${:.2}",
        impact.total_sustainability_value
    );
    println!(
        "  Cost vs Baseline: ${:.2} (ROI ratio {:.4})",
        impact.cost_difference_vs_baseline, impact.sustainability_roi_ratio
    );
}
