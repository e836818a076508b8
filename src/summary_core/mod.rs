//! Summary Core - Vendor Sales Summary Pipeline
//!
//! Infrastructure for building the per-(vendor, brand) sales-and-purchasing
//! summary from an inventory database and persisting it as a reporting table.
//!
//! # Architecture
//!
//! ```text
//! Inventory SQLite DB → SqliteSummaryReader (join/aggregate query)
//!     ↓
//! clean_summary (numeric coercion + derived profitability metrics)
//!     ↓
//! SummaryLoader → SQLite table replace or JSONL export
//! ```

pub mod aggregator;
pub mod jsonl_loader;
pub mod loader;
pub mod loader_backend;
pub mod sqlite_loader;
pub mod table;
pub mod transformer;

pub use aggregator::{SqliteSummaryReader, SummaryQueryError, VENDOR_SUMMARY_QUERY};
pub use jsonl_loader::JsonlSummaryLoader;
pub use loader::SummaryLoader;
pub use loader_backend::{LoaderError, SummaryLoaderBackend};
pub use sqlite_loader::SqliteSummaryLoader;
pub use table::{RawSummaryRow, SummaryRow};
pub use transformer::clean_summary;
