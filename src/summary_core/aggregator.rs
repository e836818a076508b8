//! Extraction stage - joins purchase, sales, and freight aggregates
//!
//! Issues one static CTE query against the inventory store and materializes
//! the whole (vendor, brand) summary as an in-memory table. No pagination,
//! no retry: a rejected connection or query propagates to the caller.

use super::table::RawSummaryRow;
use crate::sqlite_pragma::apply_optimized_pragmas;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::Path;

/// Join/aggregation query producing one row per (vendor, brand, price tier).
///
/// Purchases are filtered to PurchasePrice > 0 before aggregation, sales are
/// inner-joined on (VendorNumber, Brand), and freight is left-joined with a
/// COALESCE to 0 so a vendor without invoices keeps its row.
pub const VENDOR_SUMMARY_QUERY: &str = "
WITH pur AS (
    SELECT
        p.VendorNumber,
        p.VendorName,
        p.Brand,
        pr.Volume,
        p.PurchasePrice,
        pr.Price,
        SUM(p.Quantity) AS TotalQuantityPurchased,
        SUM(p.Dollars)  AS TotalAmountSpent
    FROM purchase_prices AS pr
    JOIN purchases      AS p
      ON pr.Brand = p.Brand
    WHERE p.PurchasePrice > 0
    GROUP BY p.VendorNumber, p.VendorName, p.Brand, p.PurchasePrice, pr.Price, pr.Volume
),
sls AS (
    SELECT
        VendorNo,
        VendorName,
        Brand,
        SalesPrice,
        SUM(ExciseTax)     AS TotalExcise,
        SUM(SalesQuantity) AS TotalQuantitySold,
        SUM(SalesDollars)  AS TotalEarned
    FROM sales
    GROUP BY VendorNo, VendorName, Brand, SalesPrice
),
frg AS (
    SELECT
        VendorNumber,
        VendorName,
        ROUND(SUM(Freight), 2) AS TotalFreight
    FROM vendor_invoice
    GROUP BY VendorNumber, VendorName
)
SELECT
    pur.VendorNumber                AS VendorNumber,
    pur.VendorName                  AS VendorName,
    pur.Brand                       AS Brand,
    pur.Price                       AS ActualPricePerProduct,
    pur.PurchasePrice               AS PurPricePerProduct,
    pur.TotalQuantityPurchased      AS TotalQuantityPurchased,
    pur.TotalAmountSpent            AS TotalAmountSpent,
    pur.Volume                      AS Volume,
    sls.SalesPrice                  AS SalesPricePerQuantity,
    sls.TotalQuantitySold           AS TotalQuantitySold,
    sls.TotalEarned                 AS TotalEarned,
    sls.TotalExcise                 AS TotalExcise,
    COALESCE(frg.TotalFreight, 0)   AS TotalFreight
FROM pur
JOIN sls
  ON pur.VendorNumber = sls.VendorNo
 AND pur.Brand        = sls.Brand
LEFT JOIN frg
  ON pur.VendorNumber = frg.VendorNumber
";

#[derive(Debug)]
pub enum SummaryQueryError {
    Connection(rusqlite::Error),
    Query(rusqlite::Error),
}

impl std::fmt::Display for SummaryQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryQueryError::Connection(e) => write!(f, "Source store connection error: {}", e),
            SummaryQueryError::Query(e) => write!(f, "Summary query error: {}", e),
        }
    }
}

impl std::error::Error for SummaryQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SummaryQueryError::Connection(e) | SummaryQueryError::Query(e) => Some(e),
        }
    }
}

/// Read side of the pipeline: one short-lived connection scoped to the run.
pub struct SqliteSummaryReader {
    conn: Connection,
}

impl std::fmt::Debug for SqliteSummaryReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSummaryReader").finish_non_exhaustive()
    }
}

impl SqliteSummaryReader {
    /// Open the source database and prime the connection PRAGMAs.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, SummaryQueryError> {
        let conn = Connection::open(db_path).map_err(SummaryQueryError::Connection)?;

        apply_optimized_pragmas(&conn).map_err(SummaryQueryError::Connection)?;

        // Read-only mode prevents write locks on the inventory store (must be after PRAGMAs)
        conn.execute("PRAGMA query_only = ON", [])
            .map_err(SummaryQueryError::Connection)?;

        Ok(Self { conn })
    }

    /// Execute the summary query and materialize the entire result set.
    pub fn fetch_summary(&self) -> Result<Vec<RawSummaryRow>, SummaryQueryError> {
        let mut stmt = self
            .conn
            .prepare(VENDOR_SUMMARY_QUERY)
            .map_err(SummaryQueryError::Query)?;
        let column_count = stmt.column_count();

        let row_iter = stmt
            .query_map([], |row| {
                Ok(RawSummaryRow {
                    vendor_number: row.get(0)?,
                    vendor_name: row.get(1)?,
                    brand: row.get(2)?,
                    actual_price_per_product: row.get::<_, Value>(3)?,
                    pur_price_per_product: row.get::<_, Value>(4)?,
                    total_quantity_purchased: row.get::<_, Value>(5)?,
                    total_amount_spent: row.get::<_, Value>(6)?,
                    volume: row.get::<_, Value>(7)?,
                    sales_price_per_quantity: row.get::<_, Value>(8)?,
                    total_quantity_sold: row.get::<_, Value>(9)?,
                    total_earned: row.get::<_, Value>(10)?,
                    total_excise: row.get::<_, Value>(11)?,
                    total_freight: row.get::<_, Value>(12)?,
                })
            })
            .map_err(SummaryQueryError::Query)?;

        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row.map_err(SummaryQueryError::Query)?);
        }

        log::debug!("📥 Vendor summary loaded: {} rows, {} cols", rows.len(), column_count);

        Ok(rows)
    }
}
