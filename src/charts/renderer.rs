//! Static Chart Renderer
//! Renders the dashboard charts into a single PNG image using plotters.
//!
//! Layout (2x2 grid):
//! 1. Sensitivity histogram
//! 2. Top mice (horizontal bars)
//! 3. Mean sensitivity by role
//! 4. Sensitivity by mouse weight category (box plot)

use crate::charts::plotter::category_label;
use crate::dashboard::{DashboardSummary, SensitivityView, ViewData, WeightView};
use crate::stats::{FrequencyCount, GroupMean, WeightCategory};
use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const BAR: RGBColor = RGBColor(99, 110, 250);
const PALETTE: [RGBColor; 4] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
];
const FONT: &str = "sans-serif";

pub const REPORT_SIZE: (u32, u32) = (1600, 1200);

fn draw_error<E: std::fmt::Display>(error: E) -> anyhow::Error {
    anyhow!("chart drawing failed: {error}")
}

/// Renders the summary's charts to PNG.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn render_png(summary: &DashboardSummary, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, REPORT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let panels = root.split_evenly((2, 2));

        match &summary.sensitivity {
            ViewData::Ready(view) => Self::draw_histogram(&panels[0], view)?,
            other => Self::draw_unavailable(&panels[0], "Distribuição da Sensibilidade", other)?,
        }
        match &summary.top_mice {
            ViewData::Ready(counts) => Self::draw_top_mice(&panels[1], counts)?,
            other => Self::draw_unavailable(&panels[1], "Top 10 Mouses Mais Usados", other)?,
        }
        match &summary.role_sensitivity {
            ViewData::Ready(means) => Self::draw_role_means(&panels[2], means)?,
            other => Self::draw_unavailable(&panels[2], "Sensibilidade Média por Função", other)?,
        }
        match &summary.weight_sensitivity {
            ViewData::Ready(view) => Self::draw_weight_boxes(&panels[3], view)?,
            other => Self::draw_unavailable(
                &panels[3],
                "Sensibilidade por Categoria de Peso do Mouse",
                other,
            )?,
        }

        root.present().map_err(draw_error)?;
        Ok(())
    }

    fn draw_unavailable<DB: DrawingBackend, T>(
        area: &DrawingArea<DB, Shift>,
        title: &str,
        data: &ViewData<T>,
    ) -> Result<()> {
        let reason = match data {
            ViewData::MissingColumns(columns) => format!("Colunas ausentes: {}", columns.join(", ")),
            ViewData::Failed(reason) => reason.clone(),
            ViewData::Ready(_) => String::new(),
        };
        area.draw(&Text::new(title.to_string(), (30, 30), (FONT, 24).into_font()))
            .map_err(draw_error)?;
        area.draw(&Text::new(reason, (30, 70), (FONT, 18).into_font().color(&RED)))
            .map_err(draw_error)?;
        Ok(())
    }

    fn draw_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        view: &SensitivityView,
    ) -> Result<()> {
        let x_min = view.bins.first().map(|b| b.start).unwrap_or(0.0);
        let x_max = view.bins.last().map(|b| b.end).unwrap_or(1.0);
        let y_max = view.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption("Distribuição da Sensibilidade", (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_desc("Sensibilidade")
            .y_desc("Quantidade de Jogadores")
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(view.bins.iter().map(|bin| {
                let gap = bin.width() * 0.05;
                Rectangle::new(
                    [(bin.start + gap, 0.0), (bin.end - gap, bin.count as f64)],
                    BAR.filled(),
                )
            }))
            .map_err(draw_error)?;
        Ok(())
    }

    fn draw_top_mice<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        counts: &[FrequencyCount],
    ) -> Result<()> {
        let n = counts.len();
        let labels: Vec<String> = counts.iter().rev().map(|c| c.value.clone()).collect();
        let x_max = counts.iter().map(|c| c.count).max().unwrap_or(0).max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption("Top 10 Mouses Mais Usados", (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(140)
            .build_cartesian_2d(0.0..x_max, -0.5..(n.max(1) as f64 - 0.5))
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&|y| category_label(&labels, *y))
            .x_desc("Nº de Jogadores")
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, c)| {
                let slot = (n - 1 - i) as f64;
                Rectangle::new([(0.0, slot - 0.35), (c.count as f64, slot + 0.35)], BAR.filled())
            }))
            .map_err(draw_error)?;
        Ok(())
    }

    fn draw_role_means<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        means: &[GroupMean],
    ) -> Result<()> {
        let n = means.len();
        let labels: Vec<String> = means.iter().map(|m| m.category.clone()).collect();
        let y_max = means
            .iter()
            .filter_map(|m| m.mean)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.2;

        let mut chart = ChartBuilder::on(area)
            .caption("Sensibilidade Média por Função", (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5..(n.max(1) as f64 - 0.5), 0.0..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_labels(n.max(1))
            .x_label_formatter(&|x| category_label(&labels, *x))
            .y_desc("Sensibilidade Média")
            .draw()
            .map_err(draw_error)?;

        for (i, group) in means.iter().enumerate() {
            let Some(mean) = group.mean else {
                continue;
            };
            let color = PALETTE[i % PALETTE.len()];
            let x = i as f64;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.3, 0.0), (x + 0.3, mean)],
                    color.filled(),
                )))
                .map_err(draw_error)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{mean:.2}"),
                    (x - 0.1, mean + y_max * 0.02),
                    (FONT, 16).into_font(),
                )))
                .map_err(draw_error)?;
        }
        Ok(())
    }

    fn draw_weight_boxes<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        view: &WeightView,
    ) -> Result<()> {
        let labels: Vec<String> = WeightCategory::ALL
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        let (y_min, y_max) = view
            .boxes
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
                (lo.min(b.summary.min), hi.max(b.summary.max))
            });
        let (y_min, y_max) = if y_min.is_finite() && y_max > y_min {
            let pad = (y_max - y_min) * 0.1;
            (y_min - pad, y_max + pad)
        } else if y_min.is_finite() {
            (y_min - 1.0, y_min + 1.0)
        } else {
            (0.0, 1.0)
        };

        let mut chart = ChartBuilder::on(area)
            .caption("Sensibilidade por Categoria de Peso do Mouse", (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5..(labels.len() as f64 - 0.5), y_min..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| category_label(&labels, *x))
            .y_desc("Sensibilidade")
            .draw()
            .map_err(draw_error)?;

        for category_box in &view.boxes {
            let slot = category_box.category.index();
            let x = slot as f64;
            let color = PALETTE[slot % PALETTE.len()];
            let s = &category_box.summary;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.25, s.lower_quartile), (x + 0.25, s.upper_quartile)],
                    color.mix(0.3).filled(),
                )))
                .map_err(draw_error)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.25, s.lower_quartile), (x + 0.25, s.upper_quartile)],
                    color.stroke_width(2),
                )))
                .map_err(draw_error)?;

            let lines = [
                vec![(x - 0.25, s.median), (x + 0.25, s.median)],
                vec![(x, s.upper_quartile), (x, s.upper_whisker)],
                vec![(x, s.lower_quartile), (x, s.lower_whisker)],
                vec![(x - 0.1, s.upper_whisker), (x + 0.1, s.upper_whisker)],
                vec![(x - 0.1, s.lower_whisker), (x + 0.1, s.lower_whisker)],
            ];
            chart
                .draw_series(
                    lines
                        .into_iter()
                        .map(|points| PathElement::new(points, color.stroke_width(2))),
                )
                .map_err(draw_error)?;

            chart
                .draw_series(
                    s.outliers
                        .iter()
                        .map(|&y| Circle::new((x, y), 4, color.filled())),
                )
                .map_err(draw_error)?;
        }
        Ok(())
    }
}
