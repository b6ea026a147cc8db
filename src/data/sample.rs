use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::core::{DateInput, parse_iso_date};
use crate::error::{ChartError, ChartResult};

/// Row count of the bundled sample dataset.
pub const SAMPLE_DATASET_ROWS: usize = 500;

const SAMPLE_CSV: &str = include_str!("../../data/sample.csv");

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    dates: String,
    values: f64,
}

/// Two parallel columns of observations, as read from a `dates,values` CSV.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationTable {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl ObservationTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates converted for the calendar pipeline.
    #[must_use]
    pub fn date_inputs(&self) -> Vec<DateInput> {
        self.dates.iter().copied().map(DateInput::from).collect()
    }
}

/// Loads the bundled fake daily dataset (`SAMPLE_DATASET_ROWS` rows over 2024).
pub fn load_sample_dataset() -> ChartResult<ObservationTable> {
    let table = read_observations_csv(SAMPLE_CSV.as_bytes())?;
    if table.len() != SAMPLE_DATASET_ROWS {
        return Err(ChartError::Dataset(format!(
            "bundled sample has {} rows, expected {SAMPLE_DATASET_ROWS}",
            table.len()
        )));
    }
    Ok(table)
}

/// Reads a headed CSV with `dates` (`YYYY-MM-DD`) and `values` columns.
pub fn read_observations_csv<R: Read>(reader: R) -> ChartResult<ObservationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = ObservationTable::default();
    for (idx, result) in reader.deserialize::<ObservationRecord>().enumerate() {
        // +2: header line plus 1-based numbering.
        let line = idx + 2;
        let record = result
            .map_err(|e| ChartError::Dataset(format!("invalid csv row at line {line}: {e}")))?;
        let date = parse_iso_date(&record.dates).map_err(|e| {
            ChartError::Dataset(format!("invalid date at line {line}: {e}"))
        })?;
        table.dates.push(date);
        table.values.push(record.values);
    }
    debug!(rows = table.len(), "observations csv loaded");
    Ok(table)
}
