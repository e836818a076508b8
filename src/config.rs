use std::env;
use std::path::PathBuf;

/// Destination backend for the load stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Sqlite,
    Jsonl,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Sqlite => "SQLite",
            BackendType::Jsonl => "JSONL",
        }
    }
}

fn parse_backend_from_args() -> BackendType {
    let args: Vec<String> = env::args().collect();
    if let Some(idx) = args.iter().position(|x| x == "--backend") {
        match args.get(idx + 1).map(|s| s.as_str()) {
            Some("sqlite") => return BackendType::Sqlite,
            Some("jsonl") => return BackendType::Jsonl,
            _ => {}
        }
    }
    BackendType::Sqlite
}

/// Configuration loaded from environment variables
///
/// All parameters have defaults; the destination database defaults to the
/// source database so the reporting table lands next to the inventory data.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendType,
    pub source_db_path: PathBuf,
    pub dest_db_path: PathBuf,
    pub summary_table: String,
    pub batch_size: usize,
    pub jsonl_output_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// - INVENTORY_DB_PATH - source database (default: data/inventory.db)
    /// - SUMMARY_DB_PATH - destination database (default: same as source)
    /// - SUMMARY_TABLE - destination table name (default: vendor_sales_summary)
    /// - LOAD_BATCH_SIZE - rows per insert transaction (default: 50000)
    /// - SUMMARY_EXPORT_PATH - JSONL export file, used with --backend jsonl
    pub fn from_env() -> Self {
        let backend = parse_backend_from_args();

        let source_db_path: PathBuf = env::var("INVENTORY_DB_PATH")
            .unwrap_or_else(|_| "data/inventory.db".to_string())
            .into();

        let dest_db_path: PathBuf = env::var("SUMMARY_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| source_db_path.clone());

        Self {
            backend,
            source_db_path,
            dest_db_path,
            summary_table: env::var("SUMMARY_TABLE")
                .unwrap_or_else(|_| "vendor_sales_summary".to_string()),
            batch_size: env::var("LOAD_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(50_000),
            jsonl_output_path: env::var("SUMMARY_EXPORT_PATH")
                .unwrap_or_else(|_| "exports/vendor_sales_summary.jsonl".to_string())
                .into(),
        }
    }
}
