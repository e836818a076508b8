//! Loader backend trait for persisting the cleaned summary table

use super::table::SummaryRow;

#[derive(Debug)]
pub enum LoaderError {
    Connection(rusqlite::Error),
    Write(rusqlite::Error),
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::Io(err)
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::Serialization(err)
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::Connection(e) => write!(f, "Destination store connection error: {}", e),
            LoaderError::Write(e) => write!(f, "Bulk write error: {}", e),
            LoaderError::Io(e) => write!(f, "IO error: {}", e),
            LoaderError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::Connection(e) | LoaderError::Write(e) => Some(e),
            LoaderError::Io(e) => Some(e),
            LoaderError::Serialization(e) => Some(e),
        }
    }
}

/// Backend trait for the load stage
///
/// `load` replaces the destination with `rows` in its entirety and returns
/// the number of rows written. A mid-write failure may leave the destination
/// partially written; the run is reported as failed either way.
pub trait SummaryLoaderBackend {
    fn load(&mut self, rows: &[SummaryRow]) -> Result<usize, LoaderError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
