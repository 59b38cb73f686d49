use crate::error::{EvalError, Result};
use chrono::NaiveDate;
use cses_utils::dates::parse_timestamp_date;
use csv::ReaderBuilder;
use std::collections::HashSet;

/// Name of the timestamp column in every series CSV.
pub const DATETIME_COLUMN: &str = "Datetime";

/// A single daily flow value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowPoint {
    pub date: NaiveDate,
    /// Streamflow in cubic feet per second. NaN when the cell was empty.
    pub value: f64,
}

/// A daily streamflow series in file order.
///
/// Dates are not guaranteed unique until [`TimeSeries::dedup`] has run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    /// Column the values were read from, e.g. `USGS_flow`
    pub name: String,
    pub points: Vec<FlowPoint>,
}

/// True for the unnamed row-index column written alongside exported frames.
fn is_index_header(header: &str) -> bool {
    let header = header.trim();
    header.is_empty() || header.starts_with("Unnamed")
}

fn parse_flow(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: Vec<FlowPoint>) -> TimeSeries {
        TimeSeries {
            name: name.into(),
            points,
        }
    }

    /// Parse a series CSV retrieved from `key`.
    ///
    /// The leading unnamed index column is dropped, `Datetime` is read at
    /// daily resolution and `value_column` supplies the flow. Any missing
    /// column or unparseable cell fails the whole series.
    pub fn from_csv(key: &str, body: &[u8], value_column: &str) -> Result<TimeSeries> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(body);

        let headers = rdr
            .headers()
            .map_err(|e| EvalError::malformed(key, e.to_string()))?
            .clone();
        let skip_index = headers.get(0).is_some_and(is_index_header);
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .skip(usize::from(skip_index))
                .find(|(_, h)| h.trim() == name)
                .map(|(i, _)| i)
                .ok_or_else(|| EvalError::malformed(key, format!("missing column '{}'", name)))
        };
        let date_idx = find(DATETIME_COLUMN)?;
        let value_idx = find(value_column)?;

        let mut points = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| EvalError::malformed(key, e.to_string()))?;
            let date_cell = record.get(date_idx).unwrap_or("");
            let date = parse_timestamp_date(date_cell).map_err(|_| {
                EvalError::malformed(key, format!("row {}: bad date '{}'", row + 1, date_cell))
            })?;
            let value_cell = record.get(value_idx).unwrap_or("");
            let value = parse_flow(value_cell).ok_or_else(|| {
                EvalError::malformed(key, format!("row {}: bad flow '{}'", row + 1, value_cell))
            })?;
            points.push(FlowPoint { date, value });
        }
        log::debug!("{}: parsed {} rows of {}", key, points.len(), value_column);
        Ok(TimeSeries::new(value_column, points))
    }

    /// Drop repeated dates, keeping the first occurrence of each.
    pub fn dedup(&mut self) {
        let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(self.points.len());
        self.points.retain(|p| seen.insert(p.date));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
