//! Stats module - Aggregation, weight binning and chart distributions

mod aggregate;
mod binning;
mod distribution;

pub use aggregate::{
    grouped_mean, numeric_values, require_column, scalar_mean, top_n_counts, AnalysisError,
    FrequencyCount, GroupMean,
};
pub use binning::{bin_by_weight, WeightCategory, WeightSample};
pub use distribution::{histogram, BoxSummary, HistogramBin};
