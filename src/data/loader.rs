//! Dataset Loader Module
//! Loads the player settings, mouse and roster CSV files using Polars.

use crate::config::DashboardConfig;
use crate::data::schema;
use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The three logical sources behind the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    Players,
    Mice,
    Roster,
}

impl DatasetSource {
    /// Load order; the first missing source in this order is the one reported.
    pub const ALL: [DatasetSource; 3] = [Self::Players, Self::Mice, Self::Roster];

    /// Display title used in the data sources panel.
    pub fn title(self) -> &'static str {
        match self {
            Self::Players => "Configurações dos jogadores",
            Self::Mice => "Mouses",
            Self::Roster => "Elenco",
        }
    }

    pub fn path(self, config: &DashboardConfig) -> PathBuf {
        match self {
            Self::Players => config.players_path(),
            Self::Mice => config.mice_path(),
            Self::Roster => config.roster_path(),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Players => "player settings",
            Self::Mice => "mouse data",
            Self::Roster => "roster",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Erro ao carregar os dados: O arquivo {} não foi encontrado.", path.display())]
    MissingSource { dataset: DatasetSource, path: PathBuf },
    #[error("Erro ao ler o arquivo {}: {error}", path.display())]
    Csv {
        dataset: DatasetSource,
        path: PathBuf,
        #[source]
        error: PolarsError,
    },
    #[error("Cabeçalho inválido na tabela de jogadores: {0}")]
    Schema(#[source] PolarsError),
}

impl LoadError {
    /// Source whose read failed, `None` for header normalization errors.
    pub fn dataset(&self) -> Option<DatasetSource> {
        match self {
            Self::MissingSource { dataset, .. } | Self::Csv { dataset, .. } => Some(*dataset),
            Self::Schema(_) => None,
        }
    }
}

/// The three loaded tables. All empty when loading failed.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub players: DataFrame,
    pub mice: DataFrame,
    pub roster: DataFrame,
}

impl Datasets {
    pub fn table(&self, source: DatasetSource) -> &DataFrame {
        match source {
            DatasetSource::Players => &self.players,
            DatasetSource::Mice => &self.mice,
            DatasetSource::Roster => &self.roster,
        }
    }
}

/// Result of a load attempt with the failure, if any, kept for display.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub datasets: Datasets,
    pub error: Option<LoadError>,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }
}

/// Reads the three sources named by a [`DashboardConfig`].
pub struct DatasetLoader {
    config: DashboardConfig,
}

impl DatasetLoader {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Load all three tables, all-or-nothing.
    ///
    /// The player table's headers are normalized before it is returned.
    pub fn load(&self) -> Result<Datasets, LoadError> {
        let mut players = self.read(DatasetSource::Players)?;
        let mice = self.read(DatasetSource::Mice)?;
        let roster = self.read(DatasetSource::Roster)?;

        schema::normalize_column_names(&mut players).map_err(LoadError::Schema)?;

        info!(
            players = players.height(),
            mice = mice.height(),
            roster = roster.height(),
            "datasets loaded"
        );

        Ok(Datasets {
            players,
            mice,
            roster,
        })
    }

    /// Load and degrade any failure to three empty tables plus the error.
    pub fn load_outcome(&self) -> LoadOutcome {
        match self.load() {
            Ok(datasets) => LoadOutcome {
                datasets,
                error: None,
            },
            Err(error) => {
                warn!(
                    dataset = ?error.dataset(),
                    %error,
                    "dataset load failed, continuing with empty tables"
                );
                LoadOutcome {
                    datasets: Datasets::default(),
                    error: Some(error),
                }
            }
        }
    }

    fn read(&self, dataset: DatasetSource) -> Result<DataFrame, LoadError> {
        let path = dataset.path(&self.config);
        debug!(%dataset, path = %path.display(), "reading csv");
        Self::read_csv(dataset, &path)
    }

    fn read_csv(dataset: DatasetSource, path: &Path) -> Result<DataFrame, LoadError> {
        if !path.exists() {
            return Err(LoadError::MissingSource {
                dataset,
                path: path.to_path_buf(),
            });
        }

        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .and_then(schema::trim_text_values)
            .map_err(|error| LoadError::Csv {
                dataset,
                path: path.to_path_buf(),
                error,
            })
    }
}
