//! Row types shared across the pipeline stages

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// One (vendor, brand) row as returned by the extraction query.
///
/// The numeric columns stay dynamically typed (`rusqlite::types::Value`)
/// until the transform applies its permissive coercion; the key columns are
/// decoded eagerly since the join guarantees they are present.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSummaryRow {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub actual_price_per_product: Value,
    pub pur_price_per_product: Value,
    pub total_quantity_purchased: Value,
    pub total_amount_spent: Value,
    pub volume: Value,
    pub sales_price_per_quantity: Value,
    pub total_quantity_sold: Value,
    pub total_earned: Value,
    pub total_excise: Value,
    pub total_freight: Value,
}

impl RawSummaryRow {
    /// Number of columns produced by the extraction query.
    pub const COLUMN_COUNT: usize = 13;
}

/// One cleaned summary row with derived profitability metrics.
///
/// `None` means "missing" (unparseable input or an undefined metric) and is
/// persisted as SQL NULL - it is never collapsed to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "VendorNumber")]
    pub vendor_number: i64,
    #[serde(rename = "VendorName")]
    pub vendor_name: String,
    #[serde(rename = "Brand")]
    pub brand: i64,
    #[serde(rename = "ActualPricePerProduct")]
    pub actual_price_per_product: Option<f64>,
    #[serde(rename = "PurPricePerProduct")]
    pub pur_price_per_product: Option<f64>,
    #[serde(rename = "TotalQuantityPurchased")]
    pub total_quantity_purchased: Option<f64>,
    #[serde(rename = "TotalAmountSpent")]
    pub total_amount_spent: Option<f64>,
    #[serde(rename = "Volume")]
    pub volume: Option<f64>,
    #[serde(rename = "SalesPricePerQuantity")]
    pub sales_price_per_quantity: Option<f64>,
    #[serde(rename = "TotalQuantitySold")]
    pub total_quantity_sold: Option<f64>,
    #[serde(rename = "TotalEarned")]
    pub total_earned: Option<f64>,
    #[serde(rename = "TotalExcise")]
    pub total_excise: Option<f64>,
    #[serde(rename = "TotalFreight")]
    pub total_freight: Option<f64>,
    #[serde(rename = "GrossProfit")]
    pub gross_profit: Option<f64>,
    #[serde(rename = "ProfitMargin")]
    pub profit_margin: Option<f64>,
    #[serde(rename = "StockTurnOver")]
    pub stock_turnover: Option<f64>,
    #[serde(rename = "SalesToPurchaseRatio")]
    pub sales_to_purchase_ratio: Option<f64>,
}

impl SummaryRow {
    /// Number of columns in the persisted reporting table.
    pub const COLUMN_COUNT: usize = 17;
}
