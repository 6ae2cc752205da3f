//! Dashboard Main Application
//! Single scrolling page: metric cards, charts, player filter and data sources.

use crate::charts::plotter::{show_warning, unavailable_message};
use crate::charts::ChartPlotter;
use crate::config::DashboardConfig;
use crate::dashboard::{DashboardSummary, View, ViewData};
use crate::data::{DatasetCache, DatasetSource};
use crate::export::export_report;
use crate::gui::PlayerPanel;
use egui::{Color32, RichText, ScrollArea};
use tracing::{debug, warn};

/// Main application window.
pub struct DashboardApp {
    cache: DatasetCache,
    summary: Option<DashboardSummary>,
    player_panel: PlayerPanel,
    status: String,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(config),
            summary: None,
            player_panel: PlayerPanel::new(),
            status: String::new(),
        }
    }

    /// Load the datasets on first use and build the summary once.
    fn ensure_summary(&mut self) {
        if self.summary.is_none() {
            let cached = self.cache.is_populated();
            let outcome = self.cache.get();
            debug!(cached, loaded = outcome.is_loaded(), "building dashboard summary");
            self.summary = Some(DashboardSummary::build(
                &outcome.datasets.players,
                self.cache.config(),
            ));
        }
    }

    /// Handle report export - ask for a destination, then write PNG + JSON
    fn handle_export(&mut self) {
        let Some(summary) = &self.summary else {
            self.status = "Nenhum dado para exportar".to_string();
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("relatorio_sensibilidade.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match export_report(summary, &path) {
            Ok(report) => {
                self.status = format!("Relatório exportado: {}", report.image.display());
            }
            Err(error) => {
                warn!("report export failed: {error:#}");
                self.status = format!("Erro ao exportar: {error:#}");
            }
        }
    }

    fn show_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Sensibilidade Overwatch Pro Players Dashboard")
                .size(28.0)
                .strong(),
        );
        ui.label(
            RichText::new(
                "Análise de configurações e equipamentos de jogadores profissionais de Overwatch",
            )
            .size(18.0),
        );
        ui.add_space(10.0);

        let outcome = self.cache.get();
        if let Some(error) = &outcome.error {
            ui.label(
                RichText::new(format!("✖ {error}"))
                    .color(Color32::from_rgb(220, 53, 69))
                    .strong(),
            );
        }

        let players = &outcome.datasets.players;
        let Some(summary) = &self.summary else {
            return;
        };
        if players.height() == 0 {
            show_warning(
                ui,
                "Não foi possível carregar os dados dos jogadores. Verifique se os arquivos CSV estão no lugar correto.",
            );
            return;
        }

        let source_file = self.cache.config().players_file.as_str();

        // ===== Headline metrics =====
        ui.label(
            RichText::new(format!("📊 {}", View::HeadlineMetrics.title()))
                .size(22.0)
                .strong(),
        );
        ui.label("Uma visão geral das configurações médias dos jogadores profissionais.");
        ui.add_space(5.0);
        ui.columns(3, |cols| {
            metric_card(
                &mut cols[0],
                "Média de Sensibilidade",
                &summary.headline.sensitivity_text(),
            );
            metric_card(&mut cols[1], "Média de DPI", &summary.headline.dpi_text());
            metric_card(
                &mut cols[2],
                "Média de cm/360",
                &summary.headline.cm_per_360_text(),
            );
        });

        ui.add_space(10.0);
        ui.separator();

        ui.columns(2, |cols| {
            view_section(
                &mut cols[0],
                &format!("📈 {}", View::SensitivityHistogram.title()),
                &summary.sensitivity,
                source_file,
                ChartPlotter::draw_sensitivity_histogram,
            );
            view_section(
                &mut cols[1],
                &format!("🖱 {}", View::TopMice.title()),
                &summary.top_mice,
                source_file,
                |ui, counts| ChartPlotter::draw_top_mice(ui, counts),
            );
        });

        ui.separator();

        ui.columns(2, |cols| {
            view_section(
                &mut cols[0],
                View::RoleSensitivity.title(),
                &summary.role_sensitivity,
                source_file,
                |ui, means| ChartPlotter::draw_role_sensitivity(ui, means),
            );
            view_section(
                &mut cols[1],
                View::WeightSensitivity.title(),
                &summary.weight_sensitivity,
                source_file,
                ChartPlotter::draw_weight_boxplot,
            );
        });

        ui.separator();

        // ===== Player filter =====
        ui.label(
            RichText::new(View::PlayerLookup.title())
                .size(22.0)
                .strong(),
        );
        if let Some(names) = summary.players.ready() {
            self.player_panel.show(ui, players, names);
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Data sources =====
        egui::CollapsingHeader::new("📁 Fontes de dados").show(ui, |ui| {
            egui::Grid::new("data_sources")
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for header in ["Tabela", "Arquivo", "Linhas", "Colunas"] {
                        ui.label(RichText::new(header).strong());
                    }
                    ui.end_row();

                    for source in DatasetSource::ALL {
                        let table = outcome.datasets.table(source);
                        ui.label(source.title());
                        ui.label(source.path(self.cache.config()).display().to_string());
                        ui.label(table.height().to_string());
                        ui.label(table.width().to_string());
                        ui.end_row();
                    }
                });
        });

        ui.add_space(5.0);
        ui.label(
            RichText::new("Dados: Kaggle (Overwatch Pro Player Settings)")
                .size(11.0)
                .color(Color32::GRAY),
        );
    }
}

fn metric_card(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(28.0).strong());
        });
}

/// Section title, then either the chart or a warning explaining its absence.
fn view_section<T>(
    ui: &mut egui::Ui,
    title: &str,
    data: &ViewData<T>,
    source_file: &str,
    draw: impl FnOnce(&mut egui::Ui, &T),
) {
    ui.label(RichText::new(title).size(18.0).strong());
    ui.add_space(5.0);
    match data.ready() {
        Some(ready) => draw(ui, ready),
        None => {
            if let Some(message) = unavailable_message(data, source_file) {
                show_warning(ui, &message);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_summary();

        // Top bar - export and status
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🎯 Pro Settings Dashboard").size(15.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let can_export = self.summary.as_ref().is_some_and(|s| s.row_count > 0);
                    if ui
                        .add_enabled(can_export, egui::Button::new("💾 Exportar relatório"))
                        .clicked()
                    {
                        self.handle_export();
                    }
                    if !self.status.is_empty() {
                        ui.label(RichText::new(&self.status).size(12.0).color(Color32::GRAY));
                    }
                });
            });
        });

        // Central panel - dashboard page
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_dashboard(ui);
                });
        });
    }
}
