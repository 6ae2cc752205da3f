//! Data module - CSV loading, header normalization and player lookup

mod cache;
mod loader;
mod lookup;
pub mod schema;

pub use cache::DatasetCache;
pub use loader::{DatasetLoader, DatasetSource, LoadOutcome};
pub use lookup::{player_names, player_rows, table_rows};
