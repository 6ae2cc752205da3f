//! Distribution Module
//! Histogram bins and box-plot summaries consumed by the charts.

use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics};

/// One equal-width histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Split the finite values into `bins` equal-width bins spanning min..=max.
/// The last bin is closed on the right; a constant series gets one unit-wide bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// `None` for an empty (or all non-finite) sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut data = Data::new(sorted.clone());
        let q1 = data.lower_quartile();
        let median = data.quantile(0.5);
        let q3 = data.upper_quartile();

        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;
        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            lower_quartile: q1,
            median,
            upper_quartile: q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [1.0, 2.0, 2.5, 3.0, 10.0, f64::NAN];
        let bins = histogram(&values, 3);

        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[2].end, 10.0);
        // max lands in the last, right-closed bin
        assert_eq!(bins[2].count, 1);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(histogram(&[], 30).is_empty());
        assert!(histogram(&[1.0], 0).is_empty());

        let constant = histogram(&[4.0, 4.0, 4.0], 30);
        assert_eq!(constant.len(), 1);
        assert_eq!(constant[0].count, 3);
        assert_eq!(constant[0].center(), 4.0);
        assert_eq!(constant[0].width(), 1.0);
    }

    #[test]
    fn box_summary_flags_outliers() {
        let summary = BoxSummary::from_values(&[5.0, 1.0, 3.0, 100.0, 2.0, 4.0]).unwrap();

        assert_eq!(summary.count, 6);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert!((summary.median - 3.5).abs() < 1e-9);
        assert!(summary.lower_quartile < summary.median);
        assert!(summary.median < summary.upper_quartile);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
        assert_eq!(summary.outliers, vec![100.0]);
    }

    #[test]
    fn box_summary_of_empty_sample() {
        assert!(BoxSummary::from_values(&[]).is_none());
        assert!(BoxSummary::from_values(&[f64::NAN]).is_none());

        let single = BoxSummary::from_values(&[2.5]).unwrap();
        assert_eq!(single.median, 2.5);
        assert!(single.outliers.is_empty());
    }
}
