//! Report Export
//! Writes the dashboard charts as PNG and the summary as JSON.

use crate::charts::StaticChartRenderer;
use crate::dashboard::DashboardSummary;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths written by [`export_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub image: PathBuf,
    pub summary: PathBuf,
}

/// Write `<base>.png` and `<base>.json` next to each other.
pub fn export_report(summary: &DashboardSummary, base: &Path) -> Result<ExportedReport> {
    let report = ExportedReport {
        image: base.with_extension("png"),
        summary: base.with_extension("json"),
    };

    StaticChartRenderer::render_png(summary, &report.image)
        .with_context(|| format!("failed to render {}", report.image.display()))?;
    write_summary_json(summary, &report.summary)?;

    info!(
        image = %report.image.display(),
        summary = %report.summary.display(),
        "report exported"
    );
    Ok(report)
}

pub fn write_summary_json(summary: &DashboardSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
