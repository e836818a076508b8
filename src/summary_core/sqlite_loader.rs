//! SQLite loader - full-replace bulk write of the reporting table
//!
//! Drops and recreates the destination table, then inserts in batches of
//! 50,000 rows with one transaction per batch to bound payload size. Batch
//! boundaries are not observable in the final table.

use super::loader_backend::{LoaderError, SummaryLoaderBackend};
use super::table::SummaryRow;
use crate::sqlite_pragma::apply_optimized_pragmas;
use rusqlite::{params, Connection};
use std::path::Path;

/// Default rows per insert transaction.
pub const DEFAULT_BATCH_SIZE: usize = 50_000;

pub struct SqliteSummaryLoader {
    conn: Connection,
    table_name: String,
    batch_size: usize,
}

impl SqliteSummaryLoader {
    pub fn new(
        db_path: impl AsRef<Path>,
        table_name: impl Into<String>,
    ) -> Result<Self, LoaderError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LoaderError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!(
                            "Failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ),
                    ))
                })?;
            }
        }

        let conn = Connection::open(db_path).map_err(LoaderError::Connection)?;
        apply_optimized_pragmas(&conn).map_err(LoaderError::Connection)?;

        Ok(Self {
            conn,
            table_name: table_name.into(),
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Override the rows-per-transaction bound (tests use small batches).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn recreate_table(&self) -> Result<(), LoaderError> {
        self.conn
            .execute_batch(&format!(
                "DROP TABLE IF EXISTS {table};
                 CREATE TABLE {table} (
                    VendorNumber INTEGER NOT NULL,
                    VendorName TEXT NOT NULL,
                    Brand INTEGER NOT NULL,
                    ActualPricePerProduct REAL,
                    PurPricePerProduct REAL,
                    TotalQuantityPurchased REAL,
                    TotalAmountSpent REAL,
                    Volume REAL,
                    SalesPricePerQuantity REAL,
                    TotalQuantitySold REAL,
                    TotalEarned REAL,
                    TotalExcise REAL,
                    TotalFreight REAL,
                    GrossProfit REAL,
                    ProfitMargin REAL,
                    StockTurnOver REAL,
                    SalesToPurchaseRatio REAL
                 );",
                table = self.table_name
            ))
            .map_err(LoaderError::Write)
    }

    fn insert_batch(&mut self, rows: &[SummaryRow]) -> Result<(), LoaderError> {
        let tx = self.conn.transaction().map_err(LoaderError::Write)?;
        {
            let mut stmt = tx
                .prepare_cached(&format!(
                    "INSERT INTO {} (
                        VendorNumber, VendorName, Brand, ActualPricePerProduct,
                        PurPricePerProduct, TotalQuantityPurchased, TotalAmountSpent,
                        Volume, SalesPricePerQuantity, TotalQuantitySold, TotalEarned,
                        TotalExcise, TotalFreight, GrossProfit, ProfitMargin,
                        StockTurnOver, SalesToPurchaseRatio)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                             ?14, ?15, ?16, ?17)",
                    self.table_name
                ))
                .map_err(LoaderError::Write)?;

            for row in rows {
                stmt.execute(params![
                    row.vendor_number,
                    row.vendor_name,
                    row.brand,
                    row.actual_price_per_product,
                    row.pur_price_per_product,
                    row.total_quantity_purchased,
                    row.total_amount_spent,
                    row.volume,
                    row.sales_price_per_quantity,
                    row.total_quantity_sold,
                    row.total_earned,
                    row.total_excise,
                    row.total_freight,
                    row.gross_profit,
                    row.profit_margin,
                    row.stock_turnover,
                    row.sales_to_purchase_ratio,
                ])
                .map_err(LoaderError::Write)?;
            }
        }
        tx.commit().map_err(LoaderError::Write)
    }
}

impl SummaryLoaderBackend for SqliteSummaryLoader {
    fn load(&mut self, rows: &[SummaryRow]) -> Result<usize, LoaderError> {
        self.recreate_table()?;

        for batch in rows.chunks(self.batch_size) {
            self.insert_batch(batch)?;
            log::debug!("✅ Flushed {} summary rows to {}", batch.len(), self.table_name);
        }

        Ok(rows.len())
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_row(vendor: i64, brand: i64) -> SummaryRow {
        SummaryRow {
            vendor_number: vendor,
            vendor_name: format!("Vendor {}", vendor),
            brand,
            actual_price_per_product: Some(12.5),
            pur_price_per_product: Some(5.0),
            total_quantity_purchased: Some(100.0),
            total_amount_spent: Some(500.0),
            volume: Some(750.0),
            sales_price_per_quantity: Some(8.0),
            total_quantity_sold: Some(80.0),
            total_earned: Some(640.0),
            total_excise: Some(3.0),
            total_freight: Some(0.0),
            gross_profit: Some(140.0),
            profit_margin: Some(28.0),
            stock_turnover: Some(0.8),
            sales_to_purchase_ratio: Some(1.28),
        }
    }

    fn count_rows(db_path: &std::path::Path, table: &str) -> i64 {
        let conn = Connection::open(db_path).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_load_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("summary.db");

        let mut loader = SqliteSummaryLoader::new(&db_path, "vendor_sales_summary").unwrap();
        loader
            .load(&[sample_row(1, 101), sample_row(2, 102), sample_row(3, 103)])
            .unwrap();
        assert_eq!(count_rows(&db_path, "vendor_sales_summary"), 3);

        loader.load(&[sample_row(9, 901)]).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let (count, vendor): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), MAX(VendorNumber) FROM vendor_sales_summary",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(vendor, 9);
    }

    #[test]
    fn test_load_replaces_foreign_table_of_same_name() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("summary.db");

        // A leftover table with an unrelated schema must disappear entirely.
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE vendor_sales_summary (junk TEXT);
             INSERT INTO vendor_sales_summary VALUES ('stale');",
        )
        .unwrap();
        drop(conn);

        let mut loader = SqliteSummaryLoader::new(&db_path, "vendor_sales_summary").unwrap();
        loader.load(&[sample_row(1, 101)]).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let vendor: i64 = conn
            .query_row("SELECT VendorNumber FROM vendor_sales_summary", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(vendor, 1);
    }

    #[test]
    fn test_batch_boundaries_are_invisible() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("summary.db");

        let rows: Vec<SummaryRow> = (1..=5).map(|v| sample_row(v, 100 + v)).collect();

        let mut loader = SqliteSummaryLoader::new(&db_path, "vendor_sales_summary")
            .unwrap()
            .with_batch_size(2);
        let written = loader.load(&rows).unwrap();

        assert_eq!(written, 5);
        assert_eq!(count_rows(&db_path, "vendor_sales_summary"), 5);
    }

    #[test]
    fn test_missing_metrics_persist_as_null() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("summary.db");

        let mut row = sample_row(1, 101);
        row.total_amount_spent = Some(0.0);
        row.profit_margin = None;
        row.sales_to_purchase_ratio = None;

        let mut loader = SqliteSummaryLoader::new(&db_path, "vendor_sales_summary").unwrap();
        loader.load(&[row]).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let (margin, ratio): (Option<f64>, Option<f64>) = conn
            .query_row(
                "SELECT ProfitMargin, SalesToPurchaseRatio FROM vendor_sales_summary",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(margin, None);
        assert_eq!(ratio, None);
    }

    #[test]
    fn test_empty_input_leaves_empty_table() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("summary.db");

        let mut loader = SqliteSummaryLoader::new(&db_path, "vendor_sales_summary").unwrap();
        let written = loader.load(&[]).unwrap();

        assert_eq!(written, 0);
        assert_eq!(count_rows(&db_path, "vendor_sales_summary"), 0);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("out").join("summary.db");

        let mut loader = SqliteSummaryLoader::new(&db_path, "vendor_sales_summary").unwrap();
        loader.load(&[sample_row(1, 101)]).unwrap();

        assert_eq!(count_rows(&db_path, "vendor_sales_summary"), 1);
    }
}
