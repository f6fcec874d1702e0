use crate::error::{CoreError, Result};
use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::Deserialize;
use std::{fmt, io, path::Path, str::FromStr};
use thiserror::Error;
use tmx_utils::{dates, numbers};

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "max_temperature", "min_temperature"];

/// One row of the input CSV, before any typing.
///
/// Fields missing from a short row deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub max_temperature: String,
    #[serde(default)]
    pub min_temperature: String,
}

/// What is wrong with a raw row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowDefect {
    #[error("unparseable date {0:?}")]
    Date(String),
    #[error("non-numeric {field} {value:?}")]
    Number { field: &'static str, value: String },
}

/// How malformed rows are treated while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RowPolicy {
    /// Non-numeric temperatures become `NaN` and poison their cell.
    /// Rows whose date cannot be parsed have no cell and are dropped.
    #[default]
    Propagate,
    /// Drop every malformed row.
    Skip,
    /// Fail the whole load on the first malformed row.
    Strict,
}

impl FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "propagate" => Ok(RowPolicy::Propagate),
            "skip" => Ok(RowPolicy::Skip),
            "strict" => Ok(RowPolicy::Strict),
            other => Err(format!(
                "unknown row policy {other:?} (expected propagate, skip or strict)"
            )),
        }
    }
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowPolicy::Propagate => "propagate",
            RowPolicy::Skip => "skip",
            RowPolicy::Strict => "strict",
        };
        f.write_str(name)
    }
}

/// A single day of temperature data with its derived fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub year: i32,
    /// Zero-based month (January = 0).
    pub month: u32,
    pub max_temperature: f64,
    pub min_temperature: f64,
    /// `(max_temperature + min_temperature) / 2`
    pub mean_temperature: f64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, max_temperature: f64, min_temperature: f64) -> Self {
        DailyRecord {
            date,
            year: date.year(),
            month: dates::month_index(&date),
            max_temperature,
            min_temperature,
            mean_temperature: (max_temperature + min_temperature) / 2.0,
        }
    }

    /// True when neither temperature is `NaN`.
    pub fn is_well_formed(&self) -> bool {
        !self.max_temperature.is_nan() && !self.min_temperature.is_nan()
    }
}

impl RawRow {
    /// The first non-numeric temperature field, if any.
    pub fn numeric_defect(&self) -> Option<RowDefect> {
        [
            ("max_temperature", &self.max_temperature),
            ("min_temperature", &self.min_temperature),
        ]
        .into_iter()
        .find(|(_, value)| numbers::coerce_number(value).is_nan())
        .map(|(field, value)| RowDefect::Number {
            field,
            value: value.clone(),
        })
    }
}

/// Only a bad date fails the conversion; bad numbers coerce to `NaN`.
impl TryFrom<&RawRow> for DailyRecord {
    type Error = RowDefect;

    fn try_from(row: &RawRow) -> std::result::Result<Self, Self::Error> {
        let date = dates::parse_date(&row.date).map_err(|_| RowDefect::Date(row.date.clone()))?;
        Ok(DailyRecord::new(
            date,
            numbers::coerce_number(&row.max_temperature),
            numbers::coerce_number(&row.min_temperature),
        ))
    }
}

/// Parsed records plus the number of rows the policy dropped.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<DailyRecord>,
    pub skipped: usize,
}

/// Turn raw rows into records, in input order.
///
/// Each row is paired with its line number in the source file, which is only
/// used for diagnostics.
pub fn parse_rows<I>(rows: I, policy: RowPolicy) -> Result<ParseOutcome>
where
    I: IntoIterator<Item = (u64, RawRow)>,
{
    let mut outcome = ParseOutcome::default();
    for (line, row) in rows {
        let defect = match DailyRecord::try_from(&row) {
            Ok(record) => match row.numeric_defect() {
                None => {
                    outcome.records.push(record);
                    continue;
                }
                Some(defect) if policy == RowPolicy::Propagate => {
                    warn!("line {}: {}; cell will be poisoned", line, defect);
                    outcome.records.push(record);
                    continue;
                }
                Some(defect) => defect,
            },
            Err(defect) => defect,
        };
        if policy == RowPolicy::Strict {
            return Err(CoreError::MalformedRow {
                line,
                reason: defect.to_string(),
            });
        }
        warn!("line {}: {}; row skipped", line, defect);
        outcome.skipped += 1;
    }
    Ok(outcome)
}

/// Read daily records from CSV data with a header row.
pub fn read_csv<R: io::Read>(reader: R, policy: RowPolicy) -> Result<ParseOutcome> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CoreError::MissingColumn(column));
        }
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record: StringRecord = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: RawRow = record.deserialize(Some(&headers))?;
        rows.push((line, row));
    }

    let outcome = parse_rows(rows, policy)?;
    info!(
        "Loaded {} daily records, skipped {} malformed ({} policy)",
        outcome.records.len(),
        outcome.skipped,
        policy
    );
    Ok(outcome)
}

/// Read daily records from an in-memory CSV string.
pub fn read_csv_str(csv_data: &str, policy: RowPolicy) -> Result<ParseOutcome> {
    read_csv(csv_data.as_bytes(), policy)
}

/// Read daily records from a CSV file on disk.
pub fn read_csv_path<P: AsRef<Path>>(path: P, policy: RowPolicy) -> Result<ParseOutcome> {
    let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
    read_csv(file, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_DATA: &str = "date,max_temperature,min_temperature,station
2020-01-01,10,0,HKO
2020-01-02,12,2,HKO
2020-01-03,8,-2,HKO
";

    #[test]
    fn test_read_csv_derives_fields() {
        let outcome = read_csv_str(CSV_DATA, RowPolicy::Propagate).unwrap();
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.skipped, 0);
        let first = outcome.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(first.year, 2020);
        assert_eq!(first.month, 0);
        assert_eq!(first.mean_temperature, 5.0);
        assert_eq!(outcome.records[2].mean_temperature, 3.0);
    }

    #[test]
    fn test_read_csv_preserves_input_order() {
        let data = "date,max_temperature,min_temperature
2021-03-02,20,10
2019-07-01,30,25
2021-03-01,18,9
";
        let outcome = read_csv_str(data, RowPolicy::Propagate).unwrap();
        let years: Vec<i32> = outcome.records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2021, 2019, 2021]);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let data = "date,max_temperature\n2020-01-01,10\n";
        let err = read_csv_str(data, RowPolicy::Propagate).unwrap_err();
        assert!(matches!(err, CoreError::MissingColumn("min_temperature")));
    }

    #[test]
    fn test_propagate_keeps_nan_rows_and_drops_bad_dates() {
        let data = "date,max_temperature,min_temperature
2020-01-01,abc,0
01/02/2020,12,2
2020-01-03,8,-2
";
        let outcome = read_csv_str(data, RowPolicy::Propagate).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.records[0].max_temperature.is_nan());
        assert!(outcome.records[0].mean_temperature.is_nan());
        assert!(!outcome.records[0].is_well_formed());
    }

    #[test]
    fn test_skip_drops_every_malformed_row() {
        let data = "date,max_temperature,min_temperature
2020-01-01,abc,0
not-a-date,12,2
2020-01-03,8,
2020-01-04,8,1
";
        let outcome = read_csv_str(data, RowPolicy::Skip).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped, 3);
    }

    #[test]
    fn test_skip_drops_non_finite_temperatures() {
        let data = "date,max_temperature,min_temperature
2020-01-01,inf,0
2020-01-02,12,1e400
2020-01-03,-infinity,2
2020-01-04,8,1
";
        let outcome = read_csv_str(data, RowPolicy::Skip).unwrap();
        assert_eq!(outcome.skipped, 3);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].is_well_formed());
        assert_eq!(outcome.records[0].date.to_string(), "2020-01-04");
    }

    #[test]
    fn test_strict_reports_the_offending_line() {
        let data = "date,max_temperature,min_temperature
2020-01-01,10,0
2020-01-02,warm,2
";
        let err = read_csv_str(data, RowPolicy::Strict).unwrap_err();
        match err {
            CoreError::MalformedRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("max_temperature"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_coerces_missing_fields() {
        let data = "date,max_temperature,min_temperature\n2020-01-01,10\n";
        let outcome = read_csv_str(data, RowPolicy::Propagate).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].min_temperature.is_nan());
    }

    #[test]
    fn test_row_policy_from_str() {
        assert_eq!("Skip".parse::<RowPolicy>().unwrap(), RowPolicy::Skip);
        assert_eq!("strict".parse::<RowPolicy>().unwrap(), RowPolicy::Strict);
        assert!("lenient".parse::<RowPolicy>().is_err());
        assert_eq!(RowPolicy::default().to_string(), "propagate");
    }

    #[test]
    fn test_empty_file_with_header_is_not_an_error() {
        let outcome = read_csv_str("date,max_temperature,min_temperature\n", RowPolicy::Strict)
            .unwrap();
        assert!(outcome.records.is_empty());
    }
}
