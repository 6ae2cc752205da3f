//! Chart Plotter Module
//! Draws the dashboard's interactive charts using egui_plot.

use crate::dashboard::{SensitivityView, ViewData, WeightView};
use crate::stats::{FrequencyCount, GroupMean, WeightCategory};
use egui::{Align2, Color32, RichText};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, PlotPoint, PlotPoints,
    Points, Text,
};

pub const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),  // Indigo
    Color32::from_rgb(239, 85, 59),   // Red
    Color32::from_rgb(0, 204, 150),   // Green
    Color32::from_rgb(171, 99, 250),  // Purple
    Color32::from_rgb(255, 161, 90),  // Orange
    Color32::from_rgb(25, 211, 243),  // Cyan
    Color32::from_rgb(255, 102, 146), // Pink
    Color32::from_rgb(182, 232, 128), // Lime
    Color32::from_rgb(255, 151, 255), // Magenta
    Color32::from_rgb(254, 203, 82),  // Yellow
];

const CHART_HEIGHT: f32 = 320.0;

/// Label of the category sitting on an integer axis slot, empty elsewhere.
pub fn category_label(labels: &[String], value: f64) -> String {
    let slot = value.round();
    if (value - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

/// Warning text for a view that cannot be drawn, `None` when it is ready.
pub fn unavailable_message<T>(data: &ViewData<T>, source_file: &str) -> Option<String> {
    match data {
        ViewData::Ready(_) => None,
        ViewData::MissingColumns(columns) if columns.len() == 1 => Some(format!(
            "A coluna '{}' não foi encontrada no arquivo {}.",
            columns[0], source_file
        )),
        ViewData::MissingColumns(columns) => {
            let quoted: Vec<String> = columns.iter().map(|c| format!("'{c}'")).collect();
            Some(format!("Colunas {} não encontradas.", quoted.join(" ou ")))
        }
        ViewData::Failed(reason) => Some(format!("Não foi possível calcular este gráfico: {reason}")),
    }
}

pub fn show_warning(ui: &mut egui::Ui, message: &str) {
    ui.label(
        RichText::new(format!("⚠ {message}"))
            .color(Color32::from_rgb(230, 162, 60))
            .size(13.0),
    );
}

fn show_empty(ui: &mut egui::Ui) {
    ui.label(RichText::new("Nenhum dado disponível para este gráfico.").color(Color32::GRAY));
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Histogram of player sensitivities.
    pub fn draw_sensitivity_histogram(ui: &mut egui::Ui, view: &SensitivityView) {
        if view.bins.is_empty() {
            show_empty(ui);
            return;
        }

        // 10% gap between bars
        let bars: Vec<Bar> = view
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width() * 0.9)
                    .name(format!("{:.2} - {:.2}", bin.start, bin.end))
            })
            .collect();

        Plot::new("sensitivity_histogram")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Sensibilidade")
            .y_axis_label("Quantidade de Jogadores")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Jogadores"));
            });
    }

    /// Horizontal bars, most used mouse on top.
    pub fn draw_top_mice(ui: &mut egui::Ui, counts: &[FrequencyCount]) {
        if counts.is_empty() {
            show_empty(ui);
            return;
        }

        // Ascending from the bottom: slot 0 holds the least used mouse.
        let n = counts.len();
        let labels: Vec<String> = counts.iter().rev().map(|c| c.value.clone()).collect();
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new((n - 1 - i) as f64, c.count as f64)
                    .width(0.7)
                    .name(&c.value)
            })
            .collect();

        Plot::new("top_mice")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Nº de Jogadores")
            .y_axis_label("Modelo do Mouse")
            .y_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .color(BAR_COLOR)
                        .name("Top 10 Mouses Mais Usados"),
                );
            });
    }

    /// One colored bar per role with its mean printed above it.
    pub fn draw_role_sensitivity(ui: &mut egui::Ui, means: &[GroupMean]) {
        if means.is_empty() {
            show_empty(ui);
            return;
        }

        let labels: Vec<String> = means.iter().map(|m| m.category.clone()).collect();
        let text_color = ui.visuals().text_color();

        Plot::new("role_sensitivity")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Função")
            .y_axis_label("Sensibilidade Média")
            .legend(Legend::default())
            .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, group) in means.iter().enumerate() {
                    let Some(mean) = group.mean else {
                        continue;
                    };
                    let color = PALETTE[i % PALETTE.len()];
                    let bar = Bar::new(i as f64, mean).width(0.6).fill(color);
                    plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(&group.category));
                    plot_ui.text(
                        Text::new(PlotPoint::new(i as f64, mean), format!("{mean:.2}"))
                            .anchor(Align2::CENTER_BOTTOM)
                            .color(text_color),
                    );
                }
            });
    }

    /// Sensitivity box per weight category, in category order.
    pub fn draw_weight_boxplot(ui: &mut egui::Ui, view: &WeightView) {
        if view.boxes.is_empty() {
            show_empty(ui);
            return;
        }

        let labels: Vec<String> = WeightCategory::ALL
            .iter()
            .map(|c| c.label().to_string())
            .collect();

        Plot::new("weight_boxplot")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Categoria de Peso do Mouse")
            .y_axis_label("Sensibilidade")
            .legend(Legend::default())
            .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for category_box in &view.boxes {
                    let slot = category_box.category.index();
                    let color = PALETTE[slot % PALETTE.len()];
                    let summary = &category_box.summary;

                    let box_elem = BoxElem::new(
                        slot as f64,
                        BoxSpread::new(
                            summary.lower_whisker,
                            summary.lower_quartile,
                            summary.median,
                            summary.upper_quartile,
                            summary.upper_whisker,
                        ),
                    )
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(
                        BoxPlot::new(vec![box_elem]).name(category_box.category.name()),
                    );

                    if !summary.outliers.is_empty() {
                        let points: PlotPoints = summary
                            .outliers
                            .iter()
                            .map(|&y| [slot as f64, y])
                            .collect();
                        plot_ui.points(
                            Points::new(points)
                                .radius(3.0)
                                .color(color)
                                .name(category_box.category.name()),
                        );
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_slots() {
        let labels = vec!["tank".to_string(), "support".to_string()];
        assert_eq!(category_label(&labels, 0.0), "tank");
        assert_eq!(category_label(&labels, 1.0), "support");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn unavailable_messages_name_the_columns() {
        let ready: ViewData<()> = ViewData::Ready(());
        assert_eq!(unavailable_message(&ready, "player_settings.csv"), None);

        let one: ViewData<()> = ViewData::MissingColumns(vec!["mousemodel".into()]);
        assert_eq!(
            unavailable_message(&one, "player_settings.csv").unwrap(),
            "A coluna 'mousemodel' não foi encontrada no arquivo player_settings.csv."
        );

        let two: ViewData<()> =
            ViewData::MissingColumns(vec!["role".into(), "sensitivity".into()]);
        assert_eq!(
            unavailable_message(&two, "player_settings.csv").unwrap(),
            "Colunas 'role' ou 'sensitivity' não encontradas."
        );
    }
}
