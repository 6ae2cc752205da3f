//! Dashboard Summary
//! Every view's data, computed once per session from the player table.

use crate::config::DashboardConfig;
use crate::dashboard::{CapabilityReport, View};
use crate::data::schema::{self, CM_PER_360, DPI, MOUSE_MODEL, MOUSE_WEIGHT, ROLE, SENSITIVITY};
use crate::data::player_names;
use crate::stats::{
    bin_by_weight, grouped_mean, histogram, numeric_values, scalar_mean, top_n_counts,
    AnalysisError, BoxSummary, FrequencyCount, GroupMean, HistogramBin, WeightCategory,
    WeightSample,
};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A view's data, or why it cannot be shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ViewData<T> {
    Ready(T),
    MissingColumns(Vec<String>),
    Failed(String),
}

impl<T> ViewData<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    fn compute(
        view: View,
        report: &CapabilityReport,
        compute: impl FnOnce() -> Result<T, AnalysisError>,
    ) -> Self {
        if !report.is_satisfied(view) {
            let missing = report.missing_columns(view).to_vec();
            warn!(?view, ?missing, "view skipped, required columns not found");
            return Self::MissingColumns(missing);
        }

        match compute() {
            Ok(data) => Self::Ready(data),
            Err(AnalysisError::MissingColumn(column)) => Self::MissingColumns(vec![column]),
            Err(error) => {
                warn!(?view, %error, "view computation failed");
                Self::Failed(error.to_string())
            }
        }
    }
}

/// Format a metric, or "N/A" when it is unavailable.
pub fn format_metric(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}{suffix}"),
        None => "N/A".to_string(),
    }
}

/// The three metric cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub mean_sensitivity: Option<f64>,
    pub mean_dpi: Option<f64>,
    pub mean_cm_per_360: Option<f64>,
}

impl HeadlineMetrics {
    pub fn from_players(players: &DataFrame) -> Self {
        Self {
            mean_sensitivity: Self::metric(players, SENSITIVITY),
            mean_dpi: Self::metric(players, DPI),
            mean_cm_per_360: Self::metric(players, CM_PER_360),
        }
    }

    fn metric(players: &DataFrame, column: &str) -> Option<f64> {
        match scalar_mean(players, column) {
            Ok(mean) => mean,
            Err(error) => {
                warn!(column, %error, "metric not available");
                None
            }
        }
    }

    pub fn sensitivity_text(&self) -> String {
        format_metric(self.mean_sensitivity, 2, "")
    }

    pub fn dpi_text(&self) -> String {
        format_metric(self.mean_dpi, 0, "")
    }

    pub fn cm_per_360_text(&self) -> String {
        format_metric(self.mean_cm_per_360, 2, " cm")
    }
}

/// Raw sensitivities and their histogram bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityView {
    pub values: Vec<f64>,
    pub bins: Vec<HistogramBin>,
}

/// Box-plot summary for one weight category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBox {
    pub category: WeightCategory,
    pub summary: BoxSummary,
}

/// Binned samples and one box per populated category, in category order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightView {
    pub samples: Vec<WeightSample>,
    pub boxes: Vec<CategoryBox>,
}

impl WeightView {
    pub fn from_samples(samples: Vec<WeightSample>) -> Self {
        let boxes = WeightCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let values: Vec<f64> = samples
                    .iter()
                    .filter(|s| s.category == category)
                    .map(|s| s.sensitivity)
                    .collect();
                BoxSummary::from_values(&values).map(|summary| CategoryBox { category, summary })
            })
            .collect();
        Self { samples, boxes }
    }
}

/// Everything the presentation layer and the report export consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub row_count: usize,
    pub capabilities: CapabilityReport,
    pub headline: HeadlineMetrics,
    pub sensitivity: ViewData<SensitivityView>,
    pub top_mice: ViewData<Vec<FrequencyCount>>,
    pub role_sensitivity: ViewData<Vec<GroupMean>>,
    pub weight_sensitivity: ViewData<WeightView>,
    pub players: ViewData<Vec<String>>,
}

impl DashboardSummary {
    pub fn build(players: &DataFrame, config: &DashboardConfig) -> Self {
        let report = CapabilityReport::from_columns(&schema::column_names(players));

        let sensitivity = ViewData::compute(View::SensitivityHistogram, &report, || {
            let values = numeric_values(players, SENSITIVITY)?;
            let bins = histogram(&values, config.histogram_bins);
            debug!(values = values.len(), bins = bins.len(), "sensitivity histogram");
            Ok(SensitivityView { values, bins })
        });

        let top_mice = ViewData::compute(View::TopMice, &report, || {
            top_n_counts(players, MOUSE_MODEL, config.top_n)
        });

        let role_sensitivity = ViewData::compute(View::RoleSensitivity, &report, || {
            grouped_mean(players, ROLE, SENSITIVITY)
        });

        let weight_sensitivity = ViewData::compute(View::WeightSensitivity, &report, || {
            let samples = bin_by_weight(players, MOUSE_WEIGHT, SENSITIVITY)?;
            debug!(samples = samples.len(), "weight samples binned");
            Ok(WeightView::from_samples(samples))
        });

        let player_list = ViewData::compute(View::PlayerLookup, &report, || player_names(players));

        let summary = Self {
            row_count: players.height(),
            headline: HeadlineMetrics::from_players(players),
            capabilities: report,
            sensitivity,
            top_mice,
            role_sensitivity,
            weight_sensitivity,
            players: player_list,
        };

        info!(
            rows = summary.row_count,
            views = summary.capabilities.satisfied_views().len(),
            "dashboard summary built"
        );
        summary
    }
}
