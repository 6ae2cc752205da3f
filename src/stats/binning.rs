//! Weight Binning Module
//! Classifies mouse weights into fixed, ordered categories.

use crate::stats::{require_column, AnalysisError};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;

/// Mouse weight class, ordered from lightest to heaviest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WeightCategory {
    SuperLight,
    Light,
    Medium,
    Heavy,
}

impl WeightCategory {
    pub const ALL: [WeightCategory; 4] = [Self::SuperLight, Self::Light, Self::Medium, Self::Heavy];

    pub fn name(self) -> &'static str {
        match self {
            Self::SuperLight => "Super Leve",
            Self::Light => "Leve",
            Self::Medium => "Médio",
            Self::Heavy => "Pesado",
        }
    }

    /// Axis label including the weight range.
    pub fn label(self) -> &'static str {
        match self {
            Self::SuperLight => "Super Leve (<70g)",
            Self::Light => "Leve (70-89g)",
            Self::Medium => "Médio (90-109g)",
            Self::Heavy => "Pesado (>=110g)",
        }
    }

    /// Position in the declared order, used as the chart axis slot.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WeightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Half-open range `[lower, upper)` mapped to a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band<C> {
    pub lower: f64,
    pub upper: f64,
    pub category: C,
}

impl<C> Band<C> {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }
}

/// Mouse weight bands in grams.
pub const WEIGHT_BANDS: [Band<WeightCategory>; 4] = [
    Band {
        lower: 0.0,
        upper: 70.0,
        category: WeightCategory::SuperLight,
    },
    Band {
        lower: 70.0,
        upper: 90.0,
        category: WeightCategory::Light,
    },
    Band {
        lower: 90.0,
        upper: 110.0,
        category: WeightCategory::Medium,
    },
    Band {
        lower: 110.0,
        upper: f64::INFINITY,
        category: WeightCategory::Heavy,
    },
];

/// Category of the first band containing `value`, if any.
pub fn classify<C: Copy>(bands: &[Band<C>], value: f64) -> Option<C> {
    bands
        .iter()
        .find(|band| band.contains(value))
        .map(|band| band.category)
}

/// One player's sensitivity tagged with the class of their mouse weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightSample {
    pub category: WeightCategory,
    pub weight: f64,
    pub sensitivity: f64,
}

/// Pair each row's weight with its value, dropping rows missing either,
/// and bin by [`WEIGHT_BANDS`]. Output follows category order.
pub fn bin_by_weight(
    df: &DataFrame,
    weight_column: &str,
    value_column: &str,
) -> Result<Vec<WeightSample>, AnalysisError> {
    let weights = require_column(df, weight_column)?.cast(&DataType::Float64)?;
    let values = require_column(df, value_column)?.cast(&DataType::Float64)?;

    let mut samples: Vec<WeightSample> = weights
        .f64()?
        .into_iter()
        .zip(values.f64()?)
        .filter_map(|pair| match pair {
            (Some(weight), Some(sensitivity)) if !weight.is_nan() && !sensitivity.is_nan() => {
                classify(&WEIGHT_BANDS, weight).map(|category| WeightSample {
                    category,
                    weight,
                    sensitivity,
                })
            }
            _ => None,
        })
        .collect();

    samples.sort_by_key(|sample| sample.category);
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_closed_left_open_right() {
        assert_eq!(classify(&WEIGHT_BANDS, 0.0), Some(WeightCategory::SuperLight));
        assert_eq!(classify(&WEIGHT_BANDS, 69.99), Some(WeightCategory::SuperLight));
        assert_eq!(classify(&WEIGHT_BANDS, 70.0), Some(WeightCategory::Light));
        assert_eq!(classify(&WEIGHT_BANDS, 89.9), Some(WeightCategory::Light));
        assert_eq!(classify(&WEIGHT_BANDS, 90.0), Some(WeightCategory::Medium));
        assert_eq!(classify(&WEIGHT_BANDS, 110.0), Some(WeightCategory::Heavy));
        assert_eq!(classify(&WEIGHT_BANDS, 5000.0), Some(WeightCategory::Heavy));
    }

    #[test]
    fn values_outside_every_band_are_unassigned() {
        assert_eq!(classify(&WEIGHT_BANDS, -1.0), None);
        assert_eq!(classify(&WEIGHT_BANDS, f64::NAN), None);
        assert_eq!(classify(&WEIGHT_BANDS, f64::INFINITY), None);
    }

    #[test]
    fn sample_weights_bin_into_expected_names() {
        let names: Vec<&str> = [65.0, 70.0, 95.0, 150.0]
            .into_iter()
            .filter_map(|w| classify(&WEIGHT_BANDS, w))
            .map(WeightCategory::name)
            .collect();
        assert_eq!(names, vec!["Super Leve", "Leve", "Médio", "Pesado"]);
    }

    #[test]
    fn classifier_is_generic_over_band_tables() {
        let bands = [
            Band { lower: 0.0, upper: 1.0, category: 'a' },
            Band { lower: 1.0, upper: 2.0, category: 'b' },
        ];
        assert_eq!(classify(&bands, 1.0), Some('b'));
        assert_eq!(classify(&bands, 2.0), None);
    }

    #[test]
    fn binning_drops_incomplete_rows_and_orders_by_category() {
        let df = df!(
            "mouseweight" => [Some(150.0), Some(65.0), None, Some(95.0), Some(70.0), Some(80.0), Some(-3.0)],
            "sensitivity" => [Some(1.0), Some(2.0), Some(3.0), None, Some(4.0), Some(5.0), Some(6.0)],
        )
        .unwrap();

        let samples = bin_by_weight(&df, "mouseweight", "sensitivity").unwrap();

        let got: Vec<(WeightCategory, f64)> =
            samples.iter().map(|s| (s.category, s.sensitivity)).collect();
        assert_eq!(
            got,
            vec![
                (WeightCategory::SuperLight, 2.0),
                (WeightCategory::Light, 4.0),
                (WeightCategory::Light, 5.0),
                (WeightCategory::Heavy, 1.0),
            ]
        );
    }

    #[test]
    fn binning_requires_both_columns() {
        let df = df!("sensitivity" => [1.0]).unwrap();
        assert!(matches!(
            bin_by_weight(&df, "mouseweight", "sensitivity"),
            Err(AnalysisError::MissingColumn(name)) if name == "mouseweight"
        ));
    }
}
