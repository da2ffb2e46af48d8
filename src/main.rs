use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use coldroute::analysis::reporting;
use coldroute::analysis::sustainability::{
    compute_truck_environmental_impact, TruckEnvironmentalImpact,
};
use coldroute::cli::cli::Args;
use coldroute::config::engine_config::{EngineConfig, SustainabilityConfig};
use coldroute::core::evaluator::evaluate_batch;
use coldroute::data::request::EvaluationRequest;
use coldroute::data::scenarios_loader::{self, ScenarioBatch};
use coldroute::models::scenario::ScenarioInput;
use coldroute::utils::csv_export::export_results_csv;
use coldroute::utils::logging;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    let (config, scenarios) = gather_inputs(&args)?;
    if scenarios.is_empty() {
        bail!("no valid scenarios to evaluate");
    }

    info!(
        scenarios = scenarios.len(),
        samples = config.samples,
        risk_threshold = config.risk_threshold,
        seed = config.seed,
        "starting evaluation"
    );

    let show_progress = scenarios.len() > 1;
    let results = evaluate_batch(&scenarios, &config, args.parallel(), show_progress);

    if args.verbose() {
        reporting::print_batch_summary(&results);
    }

    if let Some(dir) = args.export_dir() {
        let path = export_results_csv(&results, dir)?;
        info!(path = %path.display(), "decision CSV written");
    }

    let payload = if args.sustainability() {
        let sustainability = SustainabilityConfig {
            cargo_tons: args.cargo_tons(),
            carbon_price: args.carbon_price(),
        };
        let impacts: Vec<TruckEnvironmentalImpact> = results
            .iter()
            .zip(&scenarios)
            .map(|(result, scenario)| {
                compute_truck_environmental_impact(result, scenario, &sustainability)
            })
            .collect();
        if args.verbose() {
            for impact in &impacts {
                reporting::print_impact_summary(impact);
            }
        }
        serde_json::to_string_pretty(&impacts)?
    } else {
        serde_json::to_string_pretty(&results)?
    };

    match args.output() {
        Some(path) => {
            std::fs::write(path, &payload)
                .with_context(|| format!("failed to write results to {}", path))?;
            info!(path, "results written");
        }
        None => println!("{}", payload),
    }

    logging::print_timing_report();
    Ok(())
}

/// Resolve the engine configuration and scenario list from either the
/// stdin JSON request or the CLI flags.
fn gather_inputs(args: &Args) -> Result<(EngineConfig, Vec<ScenarioInput>)> {
    if args.stdin_request() {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read request from stdin")?;
        let request: EvaluationRequest =
            serde_json::from_str(&raw).context("malformed evaluation request")?;
        let config = request.engine_config();

        if let Some(path) = &request.csv_path {
            let batch = scenarios_loader::load_scenarios(path)
                .with_context(|| format!("failed to load scenarios from {}", path))?;
            return Ok((config, report_skipped(batch)));
        }
        if let Some(trucks) = request.trucks {
            let scenarios = validate_inline(trucks);
            return Ok((config, scenarios));
        }
        bail!("request must supply either csv_path or trucks");
    }

    let Some(path) = args.scenarios() else {
        bail!("either --scenarios <csv> or --stdin-request is required");
    };
    let config = EngineConfig {
        risk_threshold: args.risk_threshold(),
        samples: args.samples(),
        seed: args.seed(),
    };
    let batch = scenarios_loader::load_scenarios(path)
        .with_context(|| format!("failed to load scenarios from {}", path))?;
    Ok((config, report_skipped(batch)))
}

fn report_skipped(batch: ScenarioBatch) -> Vec<ScenarioInput> {
    if !batch.skipped.is_empty() {
        warn!(
            skipped = batch.skipped.len(),
            loaded = batch.scenarios.len(),
            "some scenario records were malformed and skipped"
        );
    }
    batch.scenarios
}

fn validate_inline(trucks: Vec<ScenarioInput>) -> Vec<ScenarioInput> {
    let mut scenarios = Vec::with_capacity(trucks.len());
    for scenario in trucks {
        match scenario.validate() {
            Ok(()) => scenarios.push(scenario),
            Err(error) => {
                warn!(truck_id = scenario.truck_id, %error, "skipping invalid inline scenario");
            }
        }
    }
    scenarios
}
