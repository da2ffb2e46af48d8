use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_timing::{Builder, Histogram};

// Operation categories for the timing report.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Evaluation { subcategory: EvaluationType },
    FileIO { subcategory: FileIOType },
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum EvaluationType {
    Derivation,
    Sampling,
    Scoring,
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    ScenarioLoad,
    ResultsSave,
    Other,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Evaluation { subcategory } => {
                format!(
                    "Evaluation - {}",
                    match subcategory {
                        EvaluationType::Derivation => "Parameter Derivation",
                        EvaluationType::Sampling => "Cost Sampling",
                        EvaluationType::Scoring => "Scoring",
                        EvaluationType::Other => "Other",
                    }
                )
            }
            OperationCategory::FileIO { subcategory } => {
                format!(
                    "File I/O - {}",
                    match subcategory {
                        FileIOType::ScenarioLoad => "Scenario Load",
                        FileIOType::ResultsSave => "Results Save",
                        FileIOType::Other => "Other",
                    }
                )
            }
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize)>>> =
        Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, Histogram<u64>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        record_timing(&self.function_name, self.start.elapsed(), &self.category);
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
    }
}

fn record_timing(function_name: &str, duration: Duration, category: &OperationCategory) {
    if !is_timing_enabled() {
        return;
    }

    {
        let mut timings = FUNCTION_TIMINGS.write();
        let entry = timings
            .entry(function_name.to_string())
            .or_insert((Duration::from_nanos(0), 0));
        entry.0 += duration;
        entry.1 += 1;
    }

    {
        let mut category_timings = CATEGORY_TIMINGS.write();
        let histogram = category_timings
            .entry(category.clone())
            .or_insert_with(|| Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3).unwrap());
        let _ = histogram.record(duration.as_nanos() as u64);
    }
}

pub fn init_logging(enable_timing: bool, debug_logging: bool) {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let level = if debug_logging {
        "coldroute=debug"
    } else {
        "coldroute=info"
    };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive(level.parse().unwrap());

    if enable_timing {
        let histogram = || Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3).unwrap();
        let timing_layer = Builder::default().layer(histogram);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set up tracing subscriber");
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty());

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set up tracing subscriber");
    }
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nPerformance Report");
    println!("==================");

    println!("\nBy Function:");
    let timings = FUNCTION_TIMINGS.read();
    let mut entries: Vec<_> = timings.iter().collect();
    entries.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
    for (function_name, (total, count)) in entries {
        let avg = total.div_f64((*count).max(1) as f64);
        println!(
            "{}: total={:.2}s, count={}, avg={:.2}ms",
            function_name,
            total.as_secs_f64(),
            count,
            avg.as_secs_f64() * 1000.0
        );
    }

    println!("\nBy Category:");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        b.1.mean()
            .partial_cmp(&a.1.mean())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (category, histogram) in category_vec {
        println!(
            "{}: mean={:.2}ms, p95={:.2}ms, count={}",
            category.as_str(),
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.len(),
        );
    }
    println!("==================\n");
}
