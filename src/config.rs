//! Dashboard Configuration
//! Data file locations and chart sizing, with optional JSON overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Settings shared by the loader, the summary builder and the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub players_file: String,
    pub mice_file: String,
    pub roster_file: String,
    pub histogram_bins: usize,
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            players_file: "player_settings.csv".to_string(),
            mice_file: "mouse_data.csv".to_string(),
            roster_file: "owl_roster.csv".to_string(),
            histogram_bins: 30,
            top_n: 10,
        }
    }
}

impl DashboardConfig {
    /// Read overrides from `path`, falling back to defaults when the file is
    /// absent or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<Self>(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(config) => {
                info!(path = %path.display(), "loaded dashboard configuration");
                config
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring invalid configuration");
                Self::default()
            }
        }
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(&self.players_file)
    }

    pub fn mice_path(&self) -> PathBuf {
        self.data_dir.join(&self.mice_file)
    }

    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(&self.roster_file)
    }
}
