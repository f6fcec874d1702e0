use std::collections::HashMap;
use tmx_core::DailyRecord;

/// Composite (year, month) key shared by the daily index and the monthly statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub year: i32,
    /// Zero-based month (January = 0).
    pub month: u32,
}

impl CellKey {
    pub fn new(year: i32, month: u32) -> Self {
        CellKey { year, month }
    }
}

impl From<&DailyRecord> for CellKey {
    fn from(record: &DailyRecord) -> Self {
        CellKey::new(record.year, record.month)
    }
}

/// Statistics for one (year, month) group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    /// Mean of the daily mean temperatures.
    pub mean_of_means: f64,
    /// Highest daily maximum.
    pub max_of_max: f64,
    /// Lowest daily minimum.
    pub min_of_min: f64,
}

impl MonthlyAggregate {
    pub fn key(&self) -> CellKey {
        CellKey::new(self.year, self.month)
    }
}

/// Running statistics for a group.
///
/// `f64::max`/`f64::min` skip `NaN`, so a `NaN` input is carried explicitly
/// to poison the whole group.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
    max: f64,
    min: f64,
}

impl Accumulator {
    fn new() -> Self {
        Accumulator {
            sum: 0.0,
            count: 0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
        }
    }

    fn update(&mut self, record: &DailyRecord) {
        self.sum += record.mean_temperature;
        self.count += 1;
        self.max = if self.max.is_nan() || record.max_temperature.is_nan() {
            f64::NAN
        } else {
            self.max.max(record.max_temperature)
        };
        self.min = if self.min.is_nan() || record.min_temperature.is_nan() {
            f64::NAN
        } else {
            self.min.min(record.min_temperature)
        };
    }

    fn finish(self, key: CellKey) -> MonthlyAggregate {
        MonthlyAggregate {
            year: key.year,
            month: key.month,
            mean_of_means: self.sum / self.count as f64,
            max_of_max: self.max,
            min_of_min: self.min,
        }
    }
}

/// Daily records grouped by (year, month), in input order within each group.
///
/// Built once and read-only afterwards; used for sparklines.
#[derive(Debug, Clone, Default)]
pub struct DailyIndex {
    groups: HashMap<CellKey, Vec<DailyRecord>>,
}

impl DailyIndex {
    /// Records of one cell, or `None` when the cell has no data.
    pub fn get(&self, year: i32, month: u32) -> Option<&[DailyRecord]> {
        self.groups
            .get(&CellKey::new(year, month))
            .map(|records| records.as_slice())
    }

    /// All months of one year that have data, ascending by month.
    pub fn months_of(&self, year: i32) -> Vec<(u32, &[DailyRecord])> {
        let mut months: Vec<(u32, &[DailyRecord])> = self
            .groups
            .iter()
            .filter(|(key, _)| key.year == year)
            .map(|(key, records)| (key.month, records.as_slice()))
            .collect();
        months.sort_by_key(|(month, _)| *month);
        months
    }

    /// Number of cells with at least one record.
    pub fn cell_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all cells.
    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Monthly statistics keyed by (year, month), kept in order of first occurrence.
#[derive(Debug, Clone, Default)]
pub struct MonthlyGrouping {
    entries: Vec<MonthlyAggregate>,
    positions: HashMap<CellKey, usize>,
}

impl MonthlyGrouping {
    pub fn get(&self, year: i32, month: u32) -> Option<&MonthlyAggregate> {
        self.positions
            .get(&CellKey::new(year, month))
            .map(|&position| &self.entries[position])
    }

    /// Aggregates in order of first occurrence in the input.
    pub fn iter(&self) -> impl Iterator<Item = &MonthlyAggregate> {
        self.entries.iter()
    }

    /// Distinct years in order of first occurrence.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        for entry in &self.entries {
            if !years.contains(&entry.year) {
                years.push(entry.year);
            }
        }
        years
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both groupings produced by one pass over the records.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub daily: DailyIndex,
    pub monthly: MonthlyGrouping,
}

/// Group records by (year, month) and compute per-group statistics.
///
/// Groups with no records never appear in either output.
pub fn aggregate(records: &[DailyRecord]) -> Aggregation {
    let mut order: Vec<(CellKey, Accumulator)> = Vec::new();
    let mut positions: HashMap<CellKey, usize> = HashMap::new();
    let mut daily: HashMap<CellKey, Vec<DailyRecord>> = HashMap::new();

    for record in records {
        let key = CellKey::from(record);
        let position = *positions.entry(key).or_insert_with(|| {
            order.push((key, Accumulator::new()));
            order.len() - 1
        });
        order[position].1.update(record);
        daily.entry(key).or_default().push(*record);
    }

    let entries = order
        .into_iter()
        .map(|(key, accumulator)| accumulator.finish(key))
        .collect();

    Aggregation {
        daily: DailyIndex { groups: daily },
        monthly: MonthlyGrouping { entries, positions },
    }
}
