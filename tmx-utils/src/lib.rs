//! Shared utility functions for TMX crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate};

    /// Date format used by the daily temperature CSV: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Abbreviated month names, indexed by zero-based month.
    pub const MONTH_NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Zero-based month (January = 0, December = 11).
    pub fn month_index(date: &NaiveDate) -> u32 {
        date.month0()
    }

    /// Short month name for a zero-based month index.
    /// Out of range indexes yield `"???"`.
    pub fn month_name(month: u32) -> &'static str {
        MONTH_NAMES.get(month as usize).copied().unwrap_or("???")
    }

}

/// Numeric coercion and formatting
pub mod numbers {
    /// Coerce a CSV field to a float.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a finite
    /// number becomes `NaN`: empty fields, text, `inf` and overflowing
    /// literals such as `1e400`.
    pub fn coerce_number(s: &str) -> f64 {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(f64::NAN)
    }

    /// Format a temperature with one decimal place and a degree suffix.
    pub fn format_celsius(value: f64) -> String {
        if value.is_finite() {
            format!("{:.1}°C", value)
        } else {
            "n/a".to_string()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_coerce_number() {
            assert_eq!(coerce_number("12.5"), 12.5);
            assert_eq!(coerce_number(" -3 "), -3.0);
            assert!(coerce_number("abc").is_nan());
            assert!(coerce_number("").is_nan());
        }

        #[test]
        fn test_non_finite_numbers_are_rejected() {
            for text in ["inf", "-infinity", "Infinity", "NaN", "1e400", "-1e400"] {
                assert!(coerce_number(text).is_nan(), "{text}");
            }
            assert_eq!(coerce_number("1e3"), 1000.0);
        }

        #[test]
        fn test_format_celsius() {
            assert_eq!(format_celsius(5.0), "5.0°C");
            assert_eq!(format_celsius(-2.26), "-2.3°C");
            assert_eq!(format_celsius(f64::NAN), "n/a");
        }
    }
}
