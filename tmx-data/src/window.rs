use crate::error::{DataError, Result};
use tmx_core::DailyRecord;

/// Number of calendar years kept by default: the latest year plus nine before it.
pub const DEFAULT_WINDOW_YEARS: u32 = 10;

/// The largest year present in the records.
pub fn latest_year(records: &[DailyRecord]) -> Result<i32> {
    records
        .iter()
        .map(|record| record.year)
        .max()
        .ok_or(DataError::EmptyInput)
}

/// First calendar year of a `years`-long window ending at `latest`.
///
/// Spans wider than `i32::MAX` years are capped there instead of wrapping.
pub fn earliest_year(latest: i32, years: u32) -> i32 {
    let span = i32::try_from(years.saturating_sub(1)).unwrap_or(i32::MAX);
    latest.saturating_sub(span)
}

/// Keep only records in the trailing `years` calendar years, inclusive.
///
/// Input order is preserved. Years are not required to be contiguous; a year
/// without data inside the window simply contributes nothing.
pub fn window(records: &[DailyRecord], years: u32) -> Result<Vec<DailyRecord>> {
    if years == 0 {
        return Err(DataError::InvalidWindow(years));
    }
    let latest = latest_year(records)?;
    let earliest = earliest_year(latest, years);
    Ok(records
        .iter()
        .filter(|record| record.year >= earliest)
        .copied()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(year: i32, month: u32, day: u32) -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(year, month, day).unwrap(), 20.0, 10.0)
    }

    #[test]
    fn test_latest_year() {
        let records = vec![record(2019, 5, 1), record(2023, 1, 1), record(2021, 8, 9)];
        assert_eq!(latest_year(&records).unwrap(), 2023);
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(latest_year(&[]), Err(DataError::EmptyInput)));
        assert!(matches!(window(&[], 10), Err(DataError::EmptyInput)));
    }

    #[test]
    fn test_huge_window_keeps_everything() {
        let records = vec![record(2020, 1, 1), record(1850, 6, 1)];
        assert_eq!(window(&records, u32::MAX).unwrap().len(), 2);
        assert_eq!(window(&records, 1 << 31).unwrap().len(), 2);
        assert_eq!(earliest_year(2020, u32::MAX), 2020 - i32::MAX);
        assert_eq!(earliest_year(i32::MIN + 5, 100), i32::MIN);
        assert_eq!(earliest_year(2020, 10), 2011);
        assert_eq!(earliest_year(2020, 1), 2020);
    }

    #[test]
    fn test_zero_years_is_rejected() {
        let records = vec![record(2020, 1, 1)];
        assert!(matches!(window(&records, 0), Err(DataError::InvalidWindow(0))));
    }

    #[test]
    fn test_twenty_years_keeps_last_ten() {
        let records: Vec<DailyRecord> = (2005..=2024)
            .flat_map(|year| [record(year, 1, 15), record(year, 7, 15)])
            .collect();
        let windowed = window(&records, DEFAULT_WINDOW_YEARS).unwrap();
        let mut years: Vec<i32> = windowed.iter().map(|r| r.year).collect();
        years.dedup();
        assert_eq!(years, (2015..=2024).collect::<Vec<_>>());
        assert_eq!(windowed.len(), 20);
    }

    #[test]
    fn test_window_bound_holds_for_unordered_input() {
        let records = vec![
            record(2010, 3, 1),
            record(2001, 3, 1),
            record(2012, 3, 1),
            record(2003, 3, 1),
            record(2002, 3, 1),
        ];
        let latest = latest_year(&records).unwrap();
        let windowed = window(&records, DEFAULT_WINDOW_YEARS).unwrap();
        assert!(windowed.iter().all(|r| r.year >= latest - 9 && r.year <= latest));
        let years: Vec<i32> = windowed.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2010, 2012, 2003]);
    }

    #[test]
    fn test_gaps_are_preserved() {
        let records = vec![record(2010, 1, 1), record(2014, 1, 1), record(2019, 1, 1)];
        let windowed = window(&records, DEFAULT_WINDOW_YEARS).unwrap();
        assert_eq!(windowed.len(), 3);
    }
}
