use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::models::action::Action;
use crate::models::scenario::{ScenarioInput, ScenarioValidationError};
use crate::utils::logging::{self, FileIOType, OperationCategory};

pub const REQUIRED_COLUMNS: [&str; 12] = [
    "truck_id",
    "node_id",
    "minutes_above_temp",
    "future_violation_if_continue",
    "reroute_reduction",
    "detour_repair_benefit",
    "slack_minutes",
    "door_open",
    "high_humidity",
    "distance_base_miles",
    "delay_base_minutes",
    "spoilage_time_base_hours",
];

#[derive(Debug)]
pub enum ScenarioLoadError {
    IoError(std::io::Error),
    CsvError(csv::Error),
    MissingColumn(String),
    MissingField { line: u64, column: String },
    ParseError { line: u64, column: String, value: String },
    InvalidScenario { line: u64, source: ScenarioValidationError },
}

impl From<std::io::Error> for ScenarioLoadError {
    fn from(err: std::io::Error) -> Self {
        ScenarioLoadError::IoError(err)
    }
}

impl From<csv::Error> for ScenarioLoadError {
    fn from(err: csv::Error) -> Self {
        ScenarioLoadError::CsvError(err)
    }
}

impl std::fmt::Display for ScenarioLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioLoadError::IoError(e) => write!(f, "IO error: {}", e),
            ScenarioLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            ScenarioLoadError::MissingColumn(c) => write!(f, "missing required column: {}", c),
            ScenarioLoadError::MissingField { line, column } => {
                write!(f, "line {}: missing value for column '{}'", line, column)
            }
            ScenarioLoadError::ParseError { line, column, value } => {
                write!(f, "line {}: cannot parse '{}' for column '{}'", line, value, column)
            }
            ScenarioLoadError::InvalidScenario { line, source } => {
                write!(f, "line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for ScenarioLoadError {}

/// A record that failed to parse, with enough context to report it.
#[derive(Debug)]
pub struct RecordError {
    pub line: u64,
    pub error: ScenarioLoadError,
}

/// Outcome of one batch load: every well-formed scenario in input order,
/// plus the records that were skipped. A malformed record never aborts
/// the batch.
#[derive(Debug)]
pub struct ScenarioBatch {
    pub scenarios: Vec<ScenarioInput>,
    pub skipped: Vec<RecordError>,
}

fn field<'a>(
    record: &'a StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
    line: u64,
) -> Result<&'a str, ScenarioLoadError> {
    let value = columns
        .get(name)
        .and_then(|&i| record.get(i))
        .map(str::trim)
        .unwrap_or("");
    if value.is_empty() {
        return Err(ScenarioLoadError::MissingField {
            line,
            column: name.to_string(),
        });
    }
    Ok(value)
}

fn optional_field<'a>(
    record: &'a StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let value = columns
        .get(name)
        .and_then(|&i| record.get(i))
        .map(str::trim)
        .unwrap_or("");
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_f64(value: &str, column: &str, line: u64) -> Result<f64, ScenarioLoadError> {
    value.parse().map_err(|_| ScenarioLoadError::ParseError {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(value: &str, column: &str, line: u64) -> Result<u64, ScenarioLoadError> {
    value.parse().map_err(|_| ScenarioLoadError::ParseError {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Boolean columns accept an enumerated set of literal forms; anything
/// else is a parse error, never a silent default.
fn parse_flag(value: &str, column: &str, line: u64) -> Result<bool, ScenarioLoadError> {
    match value.to_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        _ => Err(ScenarioLoadError::ParseError {
            line,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_record(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    line: u64,
) -> Result<ScenarioInput, ScenarioLoadError> {
    let recommended_action = match optional_field(record, columns, "recommended_action") {
        Some(name) => {
            let action = Action::from_name(name);
            if action.is_none() {
                // Unknown names fall back to quantile scoring downstream.
                warn!(line, action = name, "unknown recommended action, treating as absent");
            }
            action
        }
        None => None,
    };

    let shipment_value = match optional_field(record, columns, "shipment_value") {
        Some(v) => Some(parse_f64(v, "shipment_value", line)?),
        None => None,
    };

    let scenario = ScenarioInput {
        truck_id: parse_u64(field(record, columns, "truck_id", line)?, "truck_id", line)?,
        node_id: parse_u64(field(record, columns, "node_id", line)?, "node_id", line)?,
        minutes_above_temp: parse_f64(
            field(record, columns, "minutes_above_temp", line)?,
            "minutes_above_temp",
            line,
        )?,
        future_violation_if_continue: parse_f64(
            field(record, columns, "future_violation_if_continue", line)?,
            "future_violation_if_continue",
            line,
        )?,
        reroute_reduction: parse_f64(
            field(record, columns, "reroute_reduction", line)?,
            "reroute_reduction",
            line,
        )?,
        detour_repair_benefit: parse_f64(
            field(record, columns, "detour_repair_benefit", line)?,
            "detour_repair_benefit",
            line,
        )?,
        slack_minutes: parse_f64(
            field(record, columns, "slack_minutes", line)?,
            "slack_minutes",
            line,
        )?,
        door_open: parse_flag(field(record, columns, "door_open", line)?, "door_open", line)?,
        high_humidity: parse_flag(
            field(record, columns, "high_humidity", line)?,
            "high_humidity",
            line,
        )?,
        distance_base_miles: parse_f64(
            field(record, columns, "distance_base_miles", line)?,
            "distance_base_miles",
            line,
        )?,
        delay_base_minutes: parse_f64(
            field(record, columns, "delay_base_minutes", line)?,
            "delay_base_minutes",
            line,
        )?,
        spoilage_time_base_hours: parse_f64(
            field(record, columns, "spoilage_time_base_hours", line)?,
            "spoilage_time_base_hours",
            line,
        )?,
        shipment_value,
        recommended_action,
    };

    scenario
        .validate()
        .map_err(|source| ScenarioLoadError::InvalidScenario { line, source })?;

    Ok(scenario)
}

/// Parse scenario rows from CSV text. Header problems abort; malformed
/// records are skipped and reported.
pub fn parse_scenarios(contents: &str) -> Result<ScenarioBatch, ScenarioLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(contents.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(required) {
            return Err(ScenarioLoadError::MissingColumn(required.to_string()));
        }
    }

    let mut scenarios = Vec::new();
    let mut skipped = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match parse_record(&record, &columns, line) {
            Ok(scenario) => scenarios.push(scenario),
            Err(error) => {
                warn!(%error, "skipping malformed scenario record");
                skipped.push(RecordError { line, error });
            }
        }
    }

    Ok(ScenarioBatch { scenarios, skipped })
}

pub fn load_scenarios(csv_path: &str) -> Result<ScenarioBatch, ScenarioLoadError> {
    let _timing = logging::start_timing(
        "load_scenarios",
        OperationCategory::FileIO {
            subcategory: FileIOType::ScenarioLoad,
        },
    );

    let mut file = File::open(csv_path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    parse_scenarios(&contents)
}
