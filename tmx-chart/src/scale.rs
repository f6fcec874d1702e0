//! Band and linear scales, plus "nice" tick generation.
//!
//! Band math (padding as a fraction of the step, outer padding equal to the
//! inner one) and 1-2-5 tick steps match the usual web charting conventions.

/// Maps discrete domain values onto evenly spaced bands.
#[derive(Debug, Clone)]
pub struct BandScale<T> {
    domain: Vec<T>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<T: PartialEq> BandScale<T> {
    /// `padding` is used for both the inner and the outer padding; bands are
    /// centered in the range.
    pub fn new(domain: Vec<T>, range: (f64, f64), padding: f64) -> Self {
        let (lo, hi) = if range.1 < range.0 {
            (range.1, range.0)
        } else {
            range
        };
        let n = domain.len() as f64;
        let step = (hi - lo) / (n - padding + padding * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding)) * 0.5;
        BandScale {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Start of the band for `value`, or `None` if it is not in the domain.
    pub fn position(&self, value: &T) -> Option<f64> {
        self.domain
            .iter()
            .position(|candidate| candidate == value)
            .map(|index| self.start + self.step * index as f64)
    }

    /// Center of the band for `value`.
    pub fn center(&self, value: &T) -> Option<f64> {
        self.position(value).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

}

/// Continuous linear map from a domain interval to a range interval.
///
/// No clamping. A zero-width domain maps everything to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Roughly `count` round-numbered ticks covering `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi, reverse) = if stop < start {
        (stop, start, true)
    } else {
        (start, stop, false)
    };

    let step = (hi - lo) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let mut values = Vec::new();
    if power < 0.0 {
        // Work in inverted units to keep decimal ticks exact.
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (lo * inc).round();
        let mut i2 = (hi * inc).round();
        if i1 / inc < lo {
            i1 += 1.0;
        }
        if i2 / inc > hi {
            i2 -= 1.0;
        }
        let mut i = i1;
        while i <= i2 {
            values.push(i / inc);
            i += 1.0;
        }
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (lo / inc).round();
        let mut i2 = (hi / inc).round();
        if i1 * inc < lo {
            i1 += 1.0;
        }
        if i2 * inc > hi {
            i2 -= 1.0;
        }
        let mut i = i1;
        while i <= i2 {
            values.push(i * inc);
            i += 1.0;
        }
    }
    if reverse {
        values.reverse();
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_band_scale_months() {
        let months: Vec<u32> = (0..12).collect();
        let scale = BandScale::new(months, (0.0, 520.0), 0.05);
        let step = 520.0 / 12.05;
        assert!(close(scale.position(&1).unwrap() - scale.position(&0).unwrap(), step));
        assert!(close(scale.bandwidth(), step * 0.95));
        assert!(close(scale.position(&0).unwrap(), step * 0.05));
        assert!(close(
            scale.position(&11).unwrap() + scale.bandwidth(),
            520.0 - step * 0.05
        ));
        assert!(scale.position(&12).is_none());
    }

    #[test]
    fn test_band_scale_single_value() {
        let scale = BandScale::new(vec![2020], (0.0, 880.0), 0.05);
        let step = 880.0 / 1.05;
        assert!(close(scale.bandwidth(), step * 0.95));
        assert!(close(scale.center(&2020).unwrap(), 440.0));
    }

    #[test]
    fn test_band_scale_empty_domain() {
        let scale: BandScale<i32> = BandScale::new(Vec::new(), (0.0, 100.0), 0.05);
        assert!(scale.position(&1).is_none());
    }

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 40.0), (100.0, 0.0));
        assert_eq!(scale.apply(0.0), 100.0);
        assert_eq!(scale.apply(40.0), 0.0);
        assert_eq!(scale.apply(10.0), 75.0);
        assert_eq!(scale.apply(-4.0), 110.0);
    }

    #[test]
    fn test_linear_scale_degenerate_domain() {
        let scale = LinearScale::new((0.0, 0.0), (2.0, 10.0));
        assert_eq!(scale.apply(0.0), 6.0);
    }

    #[test]
    fn test_ticks_fixed_domain() {
        let values = ticks(0.0, 40.0, 8);
        assert_eq!(values, vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0]);
    }

    #[test]
    fn test_ticks_data_extent() {
        let values = ticks(3.2, 27.9, 8);
        assert_eq!(values.first().copied(), Some(4.0));
        assert_eq!(values.last().copied(), Some(26.0));
        assert_eq!(values.len(), 12);
    }

    #[test]
    fn test_ticks_small_range() {
        let values = ticks(0.0, 1.0, 5);
        assert_eq!(values, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_ticks_edge_cases() {
        assert!(ticks(0.0, 10.0, 0).is_empty());
        assert_eq!(ticks(5.0, 5.0, 8), vec![5.0]);
        assert_eq!(ticks(40.0, 0.0, 8).first().copied(), Some(40.0));
    }
}
