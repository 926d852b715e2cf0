//! Data processing for the accident distribution charts.
//!
//! This crate turns accident lists into the bins and monthly counts the
//! D3.js charts draw, and decides when a chart is a placeholder instead.

pub mod chart;

/// Tick generation and fixed-threshold histograms.
pub mod binning {
    use serde::Serialize;

    /// One histogram bar covering `[x0, x1)` (the last bin also includes `x1`).
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Bin {
        pub x0: f64,
        pub x1: f64,
        pub count: usize,
    }

    /// A "nice" step (1, 2 or 5 times a power of ten) giving about `count`
    /// intervals over `[start, stop]`.
    pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
        let raw = (stop - start).abs() / count.max(1) as f64;
        if raw <= 0.0 || !raw.is_finite() {
            return 1.0;
        }
        let power = raw.log10().floor();
        let base = 10f64.powf(power);
        let error = raw / base;
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };
        factor * base
    }

    /// Evenly spaced round values inside `[start, stop]`.
    pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
        if !(start.is_finite() && stop.is_finite()) || stop < start {
            return Vec::new();
        }
        let step = tick_step(start, stop, count);
        // Divide by the inverse for fractional steps so 0.1 * 3 lands on 0.3.
        let inverse = (step < 1.0).then(|| (1.0 / step).round());
        let (lo, hi) = match inverse {
            Some(inv) => ((start * inv).ceil(), (stop * inv).floor()),
            None => ((start / step).ceil(), (stop / step).floor()),
        };
        (lo as i64..=hi as i64)
            .map(|i| match inverse {
                Some(inv) => i as f64 / inv,
                None => i as f64 * step,
            })
            .collect()
    }

    /// Count `values` into bins split at `thresholds` over `domain`.
    ///
    /// Thresholds outside the open domain are ignored, as are values outside
    /// the closed domain.
    pub fn histogram(values: &[f64], domain: (f64, f64), thresholds: &[f64]) -> Vec<Bin> {
        let (x0, x1) = domain;
        let mut edges = vec![x0];
        edges.extend(thresholds.iter().copied().filter(|t| *t > x0 && *t < x1));
        edges.push(x1);

        let mut bins: Vec<Bin> = edges
            .windows(2)
            .map(|w| Bin {
                x0: w[0],
                x1: w[1],
                count: 0,
            })
            .collect();

        let last = bins.len() - 1;
        for &v in values {
            if !(v >= x0 && v <= x1) {
                continue;
            }
            let idx = bins
                .iter()
                .position(|b| v < b.x1)
                .unwrap_or(last);
            bins[idx].count += 1;
        }
        bins
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn ticks_for_temperature_domain() {
            let ticks = nice_ticks(0.0, 100.0, 10);
            assert_eq!(ticks.len(), 11);
            assert_eq!(ticks[0], 0.0);
            assert_eq!(ticks[10], 100.0);
        }

        #[test]
        fn fractional_ticks_are_exact() {
            let ticks = nice_ticks(0.0, 1.0, 10);
            assert_eq!(ticks[3], 0.3);
            assert_eq!(ticks.len(), 11);
        }

        #[test]
        fn tick_step_prefers_round_numbers() {
            assert_eq!(tick_step(0.0, 100.0, 10), 10.0);
            assert_eq!(tick_step(0.0, 11.0, 10), 1.0);
            assert_eq!(tick_step(2.0, 32.0, 10), 2.0);
            assert_eq!(tick_step(0.0, 70.0, 10), 5.0);
            assert_eq!(tick_step(5.0, 5.0, 10), 1.0);
        }

        #[test]
        fn histogram_counts_into_half_open_bins() {
            let bins = histogram(&[0.0, 9.9, 10.0, 55.0, 100.0, 120.0], (0.0, 100.0), &[10.0, 50.0]);
            assert_eq!(bins.len(), 3);
            assert_eq!(bins[0].count, 2);
            assert_eq!(bins[1].count, 1);
            // 100 is included in the last bin, 120 falls outside the domain
            assert_eq!(bins[2].count, 2);
        }

        #[test]
        fn thresholds_on_the_domain_edge_are_dropped() {
            let bins = histogram(&[1.0], (0.0, 2.0), &[0.0, 1.0, 2.0]);
            assert_eq!(bins.len(), 2);
            assert_eq!(bins[1].count, 1);
        }
    }
}
