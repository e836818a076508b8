//! Unified loader routing to the configured destination backend

use super::jsonl_loader::JsonlSummaryLoader;
use super::loader_backend::{LoaderError, SummaryLoaderBackend};
use super::sqlite_loader::SqliteSummaryLoader;
use super::table::SummaryRow;
use crate::config::{BackendType, Config};

/// Unified loader that routes to either the SQLite table or the JSONL export
pub enum SummaryLoader {
    Sqlite(SqliteSummaryLoader),
    Jsonl(JsonlSummaryLoader),
}

impl SummaryLoader {
    /// Create a loader for the backend selected in the configuration
    pub fn from_config(config: &Config) -> Result<Self, LoaderError> {
        match config.backend {
            BackendType::Sqlite => {
                let loader =
                    SqliteSummaryLoader::new(&config.dest_db_path, config.summary_table.clone())?
                        .with_batch_size(config.batch_size);
                Ok(SummaryLoader::Sqlite(loader))
            }
            BackendType::Jsonl => {
                let loader = JsonlSummaryLoader::new(config.jsonl_output_path.clone())?;
                Ok(SummaryLoader::Jsonl(loader))
            }
        }
    }

    /// Replace the destination with the given rows
    pub fn load(&mut self, rows: &[SummaryRow]) -> Result<usize, LoaderError> {
        match self {
            SummaryLoader::Sqlite(l) => l.load(rows),
            SummaryLoader::Jsonl(l) => l.load(rows),
        }
    }

    /// Get backend type for logging
    pub fn backend_type(&self) -> &'static str {
        match self {
            SummaryLoader::Sqlite(l) => l.backend_type(),
            SummaryLoader::Jsonl(l) => l.backend_type(),
        }
    }
}
