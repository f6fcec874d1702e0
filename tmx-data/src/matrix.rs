use crate::aggregate::{CellKey, MonthlyAggregate, MonthlyGrouping};

/// One (year, month) cell of the heatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCell {
    pub year: i32,
    /// Zero-based month (January = 0).
    pub month: u32,
    pub mean_of_means: f64,
    pub max_of_max: f64,
    pub min_of_min: f64,
}

impl MatrixCell {
    pub fn key(&self) -> CellKey {
        CellKey::new(self.year, self.month)
    }
}

impl From<&MonthlyAggregate> for MatrixCell {
    fn from(value: &MonthlyAggregate) -> Self {
        MatrixCell {
            year: value.year,
            month: value.month,
            mean_of_means: value.mean_of_means,
            max_of_max: value.max_of_max,
            min_of_min: value.min_of_min,
        }
    }
}

/// Flatten the monthly grouping into cells ordered by year, then month.
///
/// The grouping iterates in first-occurrence order, which need not be
/// chronological, so the sort is always applied.
pub fn build_matrix(grouping: &MonthlyGrouping) -> Vec<MatrixCell> {
    let mut cells: Vec<MatrixCell> = grouping.iter().map(MatrixCell::from).collect();
    cells.sort_by_key(|cell| (cell.year, cell.month));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use tmx_core::DailyRecord;

    fn record(year: i32, month: u32, day: u32) -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(year, month, day).unwrap(), 25.0, 15.0)
    }

    fn scrambled_records() -> Vec<DailyRecord> {
        let mut records = Vec::new();
        for (i, year) in [2019, 2016, 2018, 2017].into_iter().enumerate() {
            for month in [12, 3, 7, 1, 10] {
                if (year + month as i32) % 4 == i as i32 {
                    continue;
                }
                records.push(record(year, month, 5));
                records.push(record(year, month, 20));
            }
        }
        records
    }

    #[test]
    fn test_cells_are_strictly_ordered() {
        let aggregation = aggregate(&scrambled_records());
        let cells = build_matrix(&aggregation.monthly);
        for pair in cells.windows(2) {
            assert!((pair[0].year, pair[0].month) < (pair[1].year, pair[1].month));
        }
    }

    #[test]
    fn test_every_populated_cell_appears_once() {
        let records = scrambled_records();
        let expected: HashSet<CellKey> = records.iter().map(CellKey::from).collect();
        let cells = build_matrix(&aggregate(&records).monthly);
        let actual: HashSet<CellKey> = cells.iter().map(MatrixCell::key).collect();
        assert_eq!(actual, expected);
        assert_eq!(cells.len(), expected.len());
        let years: HashSet<i32> = records.iter().map(|r| r.year).collect();
        assert!(cells.len() <= years.len() * 12);
    }

    #[test]
    fn test_daily_index_round_trip() {
        let records = scrambled_records();
        let aggregation = aggregate(&records);
        let cells = build_matrix(&aggregation.monthly);
        for cell in &cells {
            let daily = aggregation.daily.get(cell.year, cell.month).unwrap();
            let expected: Vec<DailyRecord> = records
                .iter()
                .filter(|r| r.year == cell.year && r.month == cell.month)
                .copied()
                .collect();
            assert_eq!(daily, expected.as_slice());
        }
    }

    #[test]
    fn test_empty_grouping_yields_no_cells() {
        assert!(build_matrix(&MonthlyGrouping::default()).is_empty());
    }
}
