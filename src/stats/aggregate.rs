//! Aggregation Module
//! Scalar means, grouped means and top-N frequency counts over the player table.

use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

const MEAN_COL: &str = "__mean";
const COUNT_COL: &str = "__count";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Column '{0}' not found")]
    MissingColumn(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Mean of a numeric column within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub category: String,
    /// `None` when every value in the category is missing.
    pub mean: Option<f64>,
    pub count: usize,
}

/// Number of rows holding a given value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyCount {
    pub value: String,
    pub count: usize,
}

/// Look up a column, mapping absence to [`AnalysisError::MissingColumn`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AnalysisError> {
    df.column(name)
        .map_err(|_| AnalysisError::MissingColumn(name.to_string()))
}

/// Row filter keeping non-missing keys: not null, and not NaN for float columns.
fn present_key(column: &Column) -> Expr {
    let key = col(column.name().clone());
    if column.dtype().is_float() {
        key.clone().is_not_null().and(key.is_not_nan())
    } else {
        key.is_not_null()
    }
}

/// Non-missing values of a column as `f64`, in row order.
///
/// Nulls, NaN and cells that do not parse as numbers are skipped.
pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, AnalysisError> {
    let values = require_column(df, column)?.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Arithmetic mean over non-missing values; `None` when there are none.
pub fn scalar_mean(df: &DataFrame, column: &str) -> Result<Option<f64>, AnalysisError> {
    let values = numeric_values(df, column)?;
    if values.is_empty() {
        return Ok(None);
    }
    Ok(Some(values.iter().mean()))
}

/// Mean of `value_column` for each distinct non-missing `group_column` value.
///
/// Categories come out in first-seen row order.
pub fn grouped_mean(
    df: &DataFrame,
    group_column: &str,
    value_column: &str,
) -> Result<Vec<GroupMean>, AnalysisError> {
    let key = present_key(require_column(df, group_column)?);
    require_column(df, value_column)?;

    let value = col(value_column).cast(DataType::Float64);
    let grouped = df
        .clone()
        .lazy()
        .filter(key)
        .group_by_stable([col(group_column).cast(DataType::String)])
        .agg([
            value.clone().mean().alias(MEAN_COL),
            value.count().alias(COUNT_COL),
        ])
        .collect()?;

    let categories = grouped.column(group_column)?.str()?;
    let means = grouped.column(MEAN_COL)?.f64()?;
    let count_col = grouped.column(COUNT_COL)?.cast(&DataType::UInt64)?;
    let counts = count_col.u64()?;

    Ok(categories
        .into_iter()
        .zip(means)
        .zip(counts)
        .filter_map(|((category, mean), count)| {
            Some(GroupMean {
                category: category?.to_string(),
                mean: mean.filter(|m| !m.is_nan()),
                count: count.unwrap_or(0) as usize,
            })
        })
        .collect())
}

/// The `n` most frequent non-missing values of `column`, most frequent first.
///
/// Ties keep the order in which the values first appear in the table.
pub fn top_n_counts(
    df: &DataFrame,
    column: &str,
    n: usize,
) -> Result<Vec<FrequencyCount>, AnalysisError> {
    let key = present_key(require_column(df, column)?);

    let counted = df
        .clone()
        .lazy()
        .filter(key)
        .group_by_stable([col(column).cast(DataType::String)])
        .agg([len().alias(COUNT_COL)])
        .sort_by_exprs(
            [col(COUNT_COL)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(n as IdxSize)
        .collect()?;

    let values = counted.column(column)?.str()?;
    let count_col = counted.column(COUNT_COL)?.cast(&DataType::UInt64)?;
    let counts = count_col.u64()?;

    Ok(values
        .into_iter()
        .zip(counts)
        .filter_map(|(value, count)| {
            Some(FrequencyCount {
                value: value?.to_string(),
                count: count? as usize,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> DataFrame {
        df!(
            "player" => ["A", "B", "C", "D", "E", "F"],
            "sensitivity" => [Some(4.0), Some(6.0), None, Some(5.0), Some(3.0), Some(2.0)],
            "dpi" => [800i64, 800, 1600, 400, 800, 800],
            "role" => [Some("tank"), Some("support"), Some("tank"), None, Some("damage"), Some("support")],
            "mousemodel" => [Some("G Pro"), Some("Viper"), Some("Viper"), Some("G Pro"), None, Some("Zowie")],
        )
        .unwrap()
    }

    #[test]
    fn scalar_mean_matches_two_player_scenario() {
        let df = df!(
            "player" => ["A", "B"],
            "sensitivity" => [4.0, 6.0],
            "dpi" => [800i64, 800],
        )
        .unwrap();
        assert_eq!(scalar_mean(&df, "sensitivity").unwrap(), Some(5.0));
        assert_eq!(scalar_mean(&df, "dpi").unwrap(), Some(800.0));
    }

    #[test]
    fn scalar_mean_skips_missing_values() {
        // (4 + 6 + 5 + 3 + 2) / 5, the null row is not counted
        assert_eq!(scalar_mean(&players(), "sensitivity").unwrap(), Some(4.0));
    }

    #[test]
    fn scalar_mean_of_all_missing_is_unavailable() {
        let df = df!("cmper360" => [None::<f64>, None]).unwrap();
        assert_eq!(scalar_mean(&df, "cmper360").unwrap(), None);

        let empty = df!("cmper360" => Vec::<f64>::new()).unwrap();
        assert_eq!(scalar_mean(&empty, "cmper360").unwrap(), None);
    }

    #[test]
    fn scalar_mean_reports_missing_column() {
        let err = scalar_mean(&players(), "cmper360").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(name) if name == "cmper360"));
    }

    #[test]
    fn grouped_mean_has_one_entry_per_observed_category() {
        let means = grouped_mean(&players(), "role", "sensitivity").unwrap();

        assert_eq!(means.len(), 3);
        let categories: Vec<&str> = means.iter().map(|m| m.category.as_str()).collect();
        assert_eq!(categories, vec!["tank", "support", "damage"]);

        let tank = &means[0];
        assert_eq!(tank.mean, Some(4.0));
        assert_eq!(tank.count, 1);
        let support = &means[1];
        assert_eq!(support.mean, Some(4.0));
        assert_eq!(support.count, 2);
    }

    #[test]
    fn grouped_mean_with_all_missing_values_in_a_category() {
        let df = df!(
            "role" => ["tank", "support"],
            "sensitivity" => [None, Some(3.0)],
        )
        .unwrap();
        let means = grouped_mean(&df, "role", "sensitivity").unwrap();
        assert_eq!(means[0].mean, None);
        assert_eq!(means[1].mean, Some(3.0));
    }

    #[test]
    fn nan_keys_are_not_a_category() {
        let df = df!(
            "role" => [Some(1.0), Some(f64::NAN), None],
            "sensitivity" => [1.0, 2.0, 3.0],
        )
        .unwrap();

        let means = grouped_mean(&df, "role", "sensitivity").unwrap();
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].mean, Some(1.0));
        assert_eq!(means[0].count, 1);

        let counts = top_n_counts(&df, "role", 10).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn grouped_mean_requires_both_columns() {
        let df = df!("role" => ["tank"]).unwrap();
        assert!(matches!(
            grouped_mean(&df, "role", "sensitivity"),
            Err(AnalysisError::MissingColumn(name)) if name == "sensitivity"
        ));
    }

    #[test]
    fn top_n_sorted_descending_with_stable_ties() {
        let counts = top_n_counts(&players(), "mousemodel", 10).unwrap();
        assert_eq!(
            counts,
            vec![
                FrequencyCount { value: "G Pro".into(), count: 2 },
                FrequencyCount { value: "Viper".into(), count: 2 },
                FrequencyCount { value: "Zowie".into(), count: 1 },
            ]
        );
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert!(total <= players().height());
    }

    #[test]
    fn top_n_truncates() {
        let models: Vec<String> = (0..15).map(|i| format!("mouse-{i}")).collect();
        let df = df!("mousemodel" => models).unwrap();

        let counts = top_n_counts(&df, "mousemodel", 10).unwrap();
        assert_eq!(counts.len(), 10);
        assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(counts[0].value, "mouse-0");
    }
}
