//! Player Panel Widget
//! Player selector and the detail table of the selected player.

use crate::data::{player_rows, schema, table_rows};
use egui::{ComboBox, RichText, ScrollArea};
use polars::prelude::DataFrame;
use tracing::{debug, warn};

/// Rendered rows of the selected player.
struct PlayerDetail {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Selector over sorted player names with a detail table below.
#[derive(Default)]
pub struct PlayerPanel {
    selected: Option<String>,
    detail: Option<PlayerDetail>,
}

impl PlayerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `name` and cache its rows for display.
    pub fn select(&mut self, players: &DataFrame, name: &str) {
        self.detail = match player_rows(players, name) {
            Ok(rows) => {
                debug!(player = name, rows = rows.height(), "player selected");
                Some(PlayerDetail {
                    headers: schema::column_names(&rows),
                    rows: table_rows(&rows),
                })
            }
            Err(error) => {
                warn!(player = name, %error, "player lookup failed");
                None
            }
        };
        self.selected = Some(name.to_string());
    }

    /// Draw the selector and the table. The first name is selected initially.
    pub fn show(&mut self, ui: &mut egui::Ui, players: &DataFrame, names: &[String]) {
        let Some(first) = names.first() else {
            return;
        };
        if self.selected.is_none() {
            self.select(players, first);
        }

        let mut choice = self.selected.clone().unwrap_or_default();
        ComboBox::from_label("Selecione um jogador para ver seus detalhes:")
            .selected_text(choice.clone())
            .width(240.0)
            .show_ui(ui, |ui| {
                for name in names {
                    ui.selectable_value(&mut choice, name.clone(), name.as_str());
                }
            });

        if self.selected.as_deref() != Some(choice.as_str()) {
            self.select(players, &choice);
        }

        ui.add_space(8.0);
        if let Some(detail) = &self.detail {
            Self::draw_table(ui, detail);
        }
    }

    fn draw_table(ui: &mut egui::Ui, detail: &PlayerDetail) {
        ScrollArea::horizontal()
            .id_salt("player_detail_scroll")
            .show(ui, |ui| {
                egui::Grid::new("player_detail")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in &detail.headers {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &detail.rows {
                            for cell in row {
                                ui.label(RichText::new(cell).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn selecting_a_duplicated_name_keeps_every_row() {
        let players = df!(
            "player" => ["Kai", "Lee", "Kai"],
            "dpi" => [800i64, 400, 1600],
        )
        .unwrap();

        let mut panel = PlayerPanel::new();
        panel.select(&players, "Kai");

        let detail = panel.detail.as_ref().unwrap();
        assert_eq!(detail.headers, vec!["player", "dpi"]);
        assert_eq!(detail.rows.len(), 2);
        assert_eq!(detail.rows[1][1], "1600");
        assert_eq!(panel.selected.as_deref(), Some("Kai"));
    }

    #[test]
    fn lookup_failure_clears_detail() {
        let players = df!("dpi" => [800i64]).unwrap();
        let mut panel = PlayerPanel::new();
        panel.select(&players, "Kai");
        assert!(panel.detail.is_none());
    }
}
