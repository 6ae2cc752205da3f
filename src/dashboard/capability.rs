//! Which views the loaded player table can feed.

use crate::data::schema::{MOUSE_MODEL, MOUSE_WEIGHT, PLAYER, ROLE, SENSITIVITY};
use serde::Serialize;
use std::collections::BTreeMap;

/// Every view the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum View {
    HeadlineMetrics,
    SensitivityHistogram,
    TopMice,
    RoleSensitivity,
    WeightSensitivity,
    PlayerLookup,
}

impl View {
    pub const ALL: [View; 6] = [
        Self::HeadlineMetrics,
        Self::SensitivityHistogram,
        Self::TopMice,
        Self::RoleSensitivity,
        Self::WeightSensitivity,
        Self::PlayerLookup,
    ];

    /// Columns the view cannot render without. Headline metrics degrade per
    /// metric instead, so they require nothing.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::HeadlineMetrics => &[],
            Self::SensitivityHistogram => &[SENSITIVITY],
            Self::TopMice => &[MOUSE_MODEL],
            Self::RoleSensitivity => &[ROLE, SENSITIVITY],
            Self::WeightSensitivity => &[MOUSE_WEIGHT, SENSITIVITY],
            Self::PlayerLookup => &[PLAYER],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::HeadlineMetrics => "Estatísticas Gerais",
            Self::SensitivityHistogram => "Distribuição da Sensibilidade",
            Self::TopMice => "Mouses Mais Usados",
            Self::RoleSensitivity => "Sensibilidade Média por Função (Role)",
            Self::WeightSensitivity => "Distribuição da Sensibilidade por Peso do Mouse",
            Self::PlayerLookup => "Filtro por Jogador",
        }
    }
}

/// Missing columns per view, computed from a table's column labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapabilityReport {
    missing: BTreeMap<View, Vec<String>>,
}

impl CapabilityReport {
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        let missing = View::ALL
            .into_iter()
            .map(|view| {
                let absent: Vec<String> = view
                    .required_columns()
                    .iter()
                    .filter(|required| !columns.iter().any(|c| c.as_ref() == **required))
                    .map(|required| required.to_string())
                    .collect();
                (view, absent)
            })
            .collect();
        Self { missing }
    }

    pub fn is_satisfied(&self, view: View) -> bool {
        self.missing_columns(view).is_empty()
    }

    pub fn missing_columns(&self, view: View) -> &[String] {
        self.missing.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn satisfied_views(&self) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|view| self.is_satisfied(*view))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_schema_satisfies_every_view() {
        let report = CapabilityReport::from_columns(&[
            "player",
            "sensitivity",
            "dpi",
            "cmper360",
            "mousemodel",
            "role",
            "mouseweight",
        ]);
        assert_eq!(report.satisfied_views(), View::ALL.to_vec());
    }

    #[test]
    fn minimal_schema_reports_missing_columns_per_view() {
        let report = CapabilityReport::from_columns(&["sensitivity".to_string(), "dpi".to_string()]);

        assert!(report.is_satisfied(View::HeadlineMetrics));
        assert!(report.is_satisfied(View::SensitivityHistogram));
        assert_eq!(report.missing_columns(View::TopMice), ["mousemodel"]);
        assert_eq!(report.missing_columns(View::RoleSensitivity), ["role"]);
        assert_eq!(report.missing_columns(View::WeightSensitivity), ["mouseweight"]);
        assert_eq!(report.missing_columns(View::PlayerLookup), ["player"]);
    }

    #[test]
    fn empty_table_only_keeps_headline_metrics() {
        let report = CapabilityReport::from_columns::<&str>(&[]);
        assert_eq!(report.satisfied_views(), vec![View::HeadlineMetrics]);
        assert_eq!(
            report.missing_columns(View::RoleSensitivity),
            ["role", "sensitivity"]
        );
    }
}
