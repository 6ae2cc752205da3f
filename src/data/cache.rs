//! Populate-once holder for the loaded datasets.

use crate::config::DashboardConfig;
use crate::data::{DatasetLoader, LoadOutcome};
use std::cell::OnceCell;

/// Loads the datasets on first access and serves the same outcome afterwards.
/// There is no refresh: a new outcome requires a new cache.
pub struct DatasetCache {
    loader: DatasetLoader,
    outcome: OnceCell<LoadOutcome>,
}

impl DatasetCache {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            loader: DatasetLoader::new(config),
            outcome: OnceCell::new(),
        }
    }

    pub fn get(&self) -> &LoadOutcome {
        self.outcome.get_or_init(|| self.loader.load_outcome())
    }

    pub fn is_populated(&self) -> bool {
        self.outcome.get().is_some()
    }

    pub fn config(&self) -> &DashboardConfig {
        self.loader.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_once_and_serves_cached_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("player_settings.csv"),
            "player,sensitivity,dpi\nA,4.0,800\n",
        )
        .unwrap();
        fs::write(dir.path().join("mouse_data.csv"), "model\nG Pro\n").unwrap();
        fs::write(dir.path().join("owl_roster.csv"), "player\nA\n").unwrap();

        let cache = DatasetCache::new(DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        });
        assert!(!cache.is_populated());
        assert_eq!(cache.get().datasets.players.height(), 1);
        assert!(cache.is_populated());

        // Files vanish after the first read; the cache still answers.
        fs::remove_file(dir.path().join("player_settings.csv")).unwrap();
        let outcome = cache.get();
        assert!(outcome.is_loaded());
        assert_eq!(outcome.datasets.players.height(), 1);
    }

    #[test]
    fn fresh_cache_per_instance() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        };

        let first = DatasetCache::new(config.clone());
        assert!(!first.get().is_loaded());

        fs::write(dir.path().join("player_settings.csv"), "player\nA\n").unwrap();
        fs::write(dir.path().join("mouse_data.csv"), "model\nX\n").unwrap();
        fs::write(dir.path().join("owl_roster.csv"), "player\nA\n").unwrap();

        assert!(!first.get().is_loaded());
        assert!(DatasetCache::new(config).get().is_loaded());
    }
}
