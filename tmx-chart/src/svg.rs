//! SVG serialization of a [`Scene`].

use crate::scene::{Label, Scene};
use std::fmt::Write;

/// Escape text for use inside a double-quoted XML attribute or element body.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn write_labels(svg: &mut String, labels: &[Label]) {
    for label in labels {
        let _ = write!(
            svg,
            r##"<text class="{}" x="{:.2}" y="{:.2}" text-anchor="{}" dominant-baseline="middle">{}</text>"##,
            label.class,
            label.x,
            label.y,
            label.anchor.as_str(),
            escape_xml(&label.text)
        );
    }
}

impl Scene {
    /// Serialize the scene as a standalone `<svg>` element.
    ///
    /// Each cell carries both fills as `data-fill-max` / `data-fill-min`, so
    /// the page script can toggle modes without recomputing anything.
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(16 * 1024);
        let _ = write!(
            svg,
            r##"<svg id="matrix-chart" xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" data-mode="{}" data-transition-ms="{}">"##,
            self.width, self.height, self.mode, self.transition_ms
        );

        svg.push_str(r##"<defs><linearGradient id="legend-gradient" x1="0%" y1="100%" x2="0%" y2="0%">"##);
        for stop in &self.legend.stops {
            let _ = write!(
                svg,
                r##"<stop offset="{:.2}%" stop-color="{}"/>"##,
                stop.offset, stop.color
            );
        }
        svg.push_str("</linearGradient></defs>");

        let _ = write!(
            svg,
            r##"<g transform="translate({}, {})">"##,
            self.origin.0, self.origin.1
        );

        for cell in &self.cells {
            let _ = write!(
                svg,
                r##"<rect class="cell" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" data-fill-max="{}" data-fill-min="{}" data-tooltip="{}"/>"##,
                cell.x,
                cell.y,
                cell.width,
                cell.height,
                cell.fill(self.mode),
                cell.fill_max,
                cell.fill_min,
                escape_xml(&cell.tooltip)
            );
        }

        svg.push_str(r##"<g class="sparklines">"##);
        for sparkline in self.sparklines.iter().filter(|s| s.point_count() > 0) {
            let _ = write!(
                svg,
                r##"<path transform="translate({:.2}, {:.2})" d="{}" fill="none" stroke="{}" stroke-width="{}" pointer-events="none"/>"##,
                sparkline.origin.0,
                sparkline.origin.1,
                sparkline.path_data(),
                self.sparkline_stroke,
                self.sparkline_stroke_width
            );
        }
        svg.push_str("</g>");

        write_labels(&mut svg, &self.month_labels);
        write_labels(&mut svg, &self.year_labels);
        svg.push_str("</g>");

        // Legend bar and its right-hand axis
        let legend = &self.legend;
        let _ = write!(
            svg,
            r##"<g class="legend" transform="translate({}, {})"><rect width="{}" height="{:.2}" style="fill: url(#legend-gradient)"/>"##,
            legend.x, legend.y, legend.width, legend.height
        );
        let _ = write!(
            svg,
            r##"<g class="axis" transform="translate({},0)"><path class="domain" stroke="currentColor" fill="none" d="M6,{:.2}H0V0H6"/>"##,
            legend.width, legend.height
        );
        for tick in &legend.ticks {
            let _ = write!(
                svg,
                r##"<g class="tick" transform="translate(0,{:.2})"><line stroke="currentColor" x2="6"/><text fill="currentColor" x="9" dy="0.32em">{}</text></g>"##,
                tick.y,
                escape_xml(&tick.label)
            );
        }
        svg.push_str("</g></g></svg>");
        svg
    }
}
