//! Sequential red-yellow-blue color scale.

use crate::config::LegendDomain;
use tmx_data::HeatmapData;

/// The 11-class RdYlBu scheme, red (hot) to blue (cold).
const RD_YL_BU: [[f64; 3]; 11] = [
    [165.0, 0.0, 38.0],
    [215.0, 48.0, 39.0],
    [244.0, 109.0, 67.0],
    [253.0, 174.0, 97.0],
    [254.0, 224.0, 144.0],
    [255.0, 255.0, 191.0],
    [224.0, 243.0, 248.0],
    [171.0, 217.0, 233.0],
    [116.0, 173.0, 209.0],
    [69.0, 117.0, 180.0],
    [49.0, 54.0, 149.0],
];

/// Domain used when the data has no finite mean temperature.
pub const FALLBACK_DOMAIN: (f64, f64) = (0.0, 40.0);

/// Uniform cubic B-spline through the scheme, one channel at a time.
fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Interpolate the scheme at `t` in `[0, 1]` (clamped).
pub fn interpolate_rd_yl_bu(t: f64) -> String {
    let n = RD_YL_BU.len() - 1;
    let t = t.clamp(0.0, 1.0);
    let i = if t >= 1.0 {
        n - 1
    } else {
        (t * n as f64).floor() as usize
    };
    let mut channels = [0u8; 3];
    for (c, channel) in channels.iter_mut().enumerate() {
        let v1 = RD_YL_BU[i][c];
        let v2 = RD_YL_BU[i + 1][c];
        let v0 = if i > 0 { RD_YL_BU[i - 1][c] } else { 2.0 * v1 - v2 };
        let v3 = if i < n - 1 {
            RD_YL_BU[i + 2][c]
        } else {
            2.0 * v2 - v1
        };
        let value = basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3);
        *channel = value.round().clamp(0.0, 255.0) as u8;
    }
    format!("rgb({}, {}, {})", channels[0], channels[1], channels[2])
}

/// Maps a temperature onto a fill color. Hotter is redder.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    /// (cold, hot) ends of the domain.
    pub domain: (f64, f64),
    unknown: String,
}

impl ColorScale {
    pub fn new(domain: (f64, f64), unknown: impl Into<String>) -> Self {
        ColorScale {
            domain,
            unknown: unknown.into(),
        }
    }

    /// Resolve the configured domain policy against the data.
    ///
    /// With no finite mean temperature to measure, a data-extent domain falls
    /// back to [`FALLBACK_DOMAIN`].
    pub fn for_data(policy: LegendDomain, data: &HeatmapData, unknown: impl Into<String>) -> Self {
        let domain = match policy {
            LegendDomain::Fixed { min, max } => (min, max),
            LegendDomain::DataExtent => data.mean_extent().unwrap_or(FALLBACK_DOMAIN),
        };
        ColorScale::new(domain, unknown)
    }

    /// Fill for `value`; values outside the domain are clamped and `NaN`
    /// gets the unknown fill.
    pub fn color(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.unknown.clone();
        }
        let (cold, hot) = self.domain;
        let t = if hot == cold {
            0.5
        } else {
            (hot - value) / (hot - cold)
        };
        interpolate_rd_yl_bu(t)
    }
}
