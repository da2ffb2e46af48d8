use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;

use crate::models::action::Action;
use crate::models::result::ScenarioResult;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Write one row per scenario into a timestamped CSV under `output_dir`.
/// Returns the path written.
pub fn export_results_csv(
    results: &[ScenarioResult],
    output_dir: &str,
) -> Result<PathBuf, csv::Error> {
    let _timing = logging::start_timing(
        "export_results_csv",
        OperationCategory::FileIO {
            subcategory: FileIOType::ResultsSave,
        },
    );

    fs::create_dir_all(output_dir)?;
    let filename = format!("decisions_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
    let path = Path::new(output_dir).join(filename);

    let mut writer = Writer::from_path(&path)?;
    let mut header = vec![
        "truck_id".to_string(),
        "node_id".to_string(),
        "recommended_action".to_string(),
        "risk_threshold".to_string(),
        "quantile_used".to_string(),
        "chosen_score".to_string(),
    ];
    for action in Action::ALL {
        header.push(format!("{}_score", action.name()));
        header.push(format!("{}_mean", action.name()));
        header.push(format!("{}_p95", action.name()));
        header.push(format!("{}_spoilage_mean", action.name()));
    }
    header.push("rationale".to_string());
    writer.write_record(&header)?;

    for result in results {
        let chosen = &result.per_action[&result.recommended_action];
        let mut row = vec![
            result.truck_id.to_string(),
            result.node_id.to_string(),
            result.recommended_action.name().to_string(),
            result.risk_threshold.to_string(),
            result.quantile_used.clone(),
            format!("{:.2}", chosen.score),
        ];
        for action in Action::ALL {
            let eval = &result.per_action[&action];
            row.push(format!("{:.2}", eval.score));
            row.push(format!("{:.2}", eval.stats.mean));
            row.push(format!("{:.2}", eval.stats.p95));
            row.push(format!("{:.2}", eval.breakdown_means.spoilage));
        }
        row.push(result.rationale.clone());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluator::evaluate_scenario;
    use crate::models::scenario::ScenarioInput;

    #[test]
    fn export_writes_one_row_per_scenario() {
        let scenario = ScenarioInput {
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
        };
        let results = vec![evaluate_scenario(&scenario, 0.5, 200, 42)];

        let dir = std::env::temp_dir().join("coldroute_export_test");
        let path = export_results_csv(&results, dir.to_str().expect("utf8 path")).expect("export");

        let contents = fs::read_to_string(&path).expect("read back");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("truck_id,node_id,recommended_action"));
        assert!(lines[1].starts_with("1,10,"));

        fs::remove_file(path).ok();
    }
}
