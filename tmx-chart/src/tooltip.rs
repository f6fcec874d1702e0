use tmx_data::MatrixCell;
use tmx_utils::{dates::month_name, numbers::format_celsius};

/// Tooltip markup for a cell. The mean is shown whatever the display mode.
pub fn tooltip_html(cell: &MatrixCell) -> String {
    format!(
        "<strong>{} {}</strong><br>Max: {}<br>Min: {}<br>Avg: {}",
        month_name(cell.month),
        cell.year,
        format_celsius(cell.max_of_max),
        format_celsius(cell.min_of_min),
        format_celsius(cell.mean_of_means),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_text() {
        let cell = MatrixCell {
            year: 2020,
            month: 0,
            mean_of_means: 5.0,
            max_of_max: 12.0,
            min_of_min: -2.0,
        };
        assert_eq!(
            tooltip_html(&cell),
            "<strong>Jan 2020</strong><br>Max: 12.0°C<br>Min: -2.0°C<br>Avg: 5.0°C"
        );
    }

    #[test]
    fn test_tooltip_for_poisoned_cell() {
        let cell = MatrixCell {
            year: 2019,
            month: 6,
            mean_of_means: f64::NAN,
            max_of_max: f64::NAN,
            min_of_min: 24.3,
        };
        let html = tooltip_html(&cell);
        assert!(html.starts_with("<strong>Jul 2019</strong>"));
        assert!(html.contains("Max: n/a"));
        assert!(html.contains("Min: 24.3°C"));
    }
}
