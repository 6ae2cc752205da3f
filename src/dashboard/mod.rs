//! Dashboard module - Per-view capabilities and the computed session summary

mod capability;
mod summary;

pub use capability::{CapabilityReport, View};
pub use summary::{DashboardSummary, SensitivityView, ViewData, WeightView};
