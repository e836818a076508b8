//! Cleaning stage - numeric coercion and derived profitability metrics
//!
//! Pure table-to-table transform: the caller's rows are never mutated, and
//! the same input always produces an identical output. Unparseable numeric
//! cells become missing values, and a missing or zero denominator makes the
//! dependent metric missing instead of raising a division error.

use super::table::{RawSummaryRow, SummaryRow};
use rusqlite::types::Value;

/// Permissive numeric coercion: integers and reals pass through, text is
/// trimmed and parsed, everything else (NULL, blobs, garbage text) becomes
/// missing - never zero, never an error.
fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Real(r) => Some(*r),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Blob(_) => None,
    }
}

/// Divide treating a zero or missing denominator as "undefined metric".
fn guarded_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match denominator {
        Some(d) if d != 0.0 => numerator.map(|n| n / d),
        _ => None,
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Clean one extracted table into the final reporting shape.
pub fn clean_summary(rows: &[RawSummaryRow]) -> Vec<SummaryRow> {
    rows.iter().map(clean_row).collect()
}

fn clean_row(raw: &RawSummaryRow) -> SummaryRow {
    let total_quantity_purchased = coerce_numeric(&raw.total_quantity_purchased);
    let total_amount_spent = coerce_numeric(&raw.total_amount_spent);
    let total_quantity_sold = coerce_numeric(&raw.total_quantity_sold);
    let total_earned = coerce_numeric(&raw.total_earned);

    let gross_profit = match (total_earned, total_amount_spent) {
        (Some(earned), Some(spent)) => Some(earned - spent),
        _ => None,
    };

    // StockTurnOver is reported to four places; ProfitMargin and
    // SalesToPurchaseRatio stay unrounded.
    let profit_margin = guarded_div(gross_profit, total_amount_spent).map(|m| m * 100.0);
    let stock_turnover = guarded_div(total_quantity_sold, total_quantity_purchased).map(round4);
    let sales_to_purchase_ratio = guarded_div(total_earned, total_amount_spent);

    SummaryRow {
        vendor_number: raw.vendor_number,
        vendor_name: raw.vendor_name.trim().to_string(),
        brand: raw.brand,
        actual_price_per_product: coerce_numeric(&raw.actual_price_per_product),
        pur_price_per_product: coerce_numeric(&raw.pur_price_per_product),
        total_quantity_purchased,
        total_amount_spent,
        volume: coerce_numeric(&raw.volume),
        sales_price_per_quantity: coerce_numeric(&raw.sales_price_per_quantity),
        total_quantity_sold,
        total_earned,
        total_excise: coerce_numeric(&raw.total_excise),
        total_freight: coerce_numeric(&raw.total_freight),
        gross_profit,
        profit_margin,
        stock_turnover,
        sales_to_purchase_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> RawSummaryRow {
        RawSummaryRow {
            vendor_number: 1,
            vendor_name: "Vendor A".to_string(),
            brand: 101,
            actual_price_per_product: Value::Real(12.5),
            pur_price_per_product: Value::Real(5.0),
            total_quantity_purchased: Value::Real(100.0),
            total_amount_spent: Value::Real(500.0),
            volume: Value::Real(750.0),
            sales_price_per_quantity: Value::Real(8.0),
            total_quantity_sold: Value::Real(80.0),
            total_earned: Value::Real(640.0),
            total_excise: Value::Real(3.0),
            total_freight: Value::Integer(0),
        }
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a defined metric");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_derived_metrics_for_reference_row() {
        let rows = clean_summary(&[raw_row()]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_close(row.gross_profit, 140.0);
        assert_close(row.profit_margin, 28.0);
        assert_close(row.stock_turnover, 0.8);
        assert_close(row.sales_to_purchase_ratio, 1.28);
        assert_eq!(row.total_freight, Some(0.0));
    }

    #[test]
    fn test_zero_spend_leaves_ratios_undefined_but_profit_defined() {
        let mut raw = raw_row();
        raw.total_amount_spent = Value::Real(0.0);

        let rows = clean_summary(&[raw]);
        let row = &rows[0];

        assert_eq!(row.profit_margin, None);
        assert_eq!(row.sales_to_purchase_ratio, None);
        // GrossProfit is a plain difference and still computes.
        assert_close(row.gross_profit, 640.0);
    }

    #[test]
    fn test_missing_spend_behaves_like_zero_for_the_guard() {
        let mut raw = raw_row();
        raw.total_amount_spent = Value::Null;

        let rows = clean_summary(&[raw]);
        let row = &rows[0];

        assert_eq!(row.profit_margin, None);
        assert_eq!(row.sales_to_purchase_ratio, None);
        assert_eq!(row.gross_profit, None);
    }

    #[test]
    fn test_zero_or_missing_purchases_leave_turnover_undefined() {
        let mut zero = raw_row();
        zero.total_quantity_purchased = Value::Real(0.0);
        let mut missing = raw_row();
        missing.total_quantity_purchased = Value::Null;

        assert_eq!(clean_summary(&[zero])[0].stock_turnover, None);
        assert_eq!(clean_summary(&[missing])[0].stock_turnover, None);
    }

    #[test]
    fn test_stock_turnover_rounded_to_four_places() {
        let mut raw = raw_row();
        raw.total_quantity_sold = Value::Real(1.0);
        raw.total_quantity_purchased = Value::Real(3.0);

        let rows = clean_summary(&[raw]);
        let row = &rows[0];

        assert_eq!(row.stock_turnover, Some(0.3333));
    }

    #[test]
    fn test_text_cells_coerce_permissively() {
        let mut raw = raw_row();
        raw.total_earned = Value::Text("  640.0 ".to_string());
        raw.total_excise = Value::Text("not-a-number".to_string());

        let rows = clean_summary(&[raw]);
        let row = &rows[0];

        assert_eq!(row.total_earned, Some(640.0));
        assert_eq!(row.total_excise, None);
    }

    #[test]
    fn test_vendor_name_whitespace_stripped() {
        let mut raw = raw_row();
        raw.vendor_name = "  Vendor A  ".to_string();

        let rows = clean_summary(&[raw]);
        let row = &rows[0];

        assert_eq!(row.vendor_name, "Vendor A");
    }

    #[test]
    fn test_transform_is_deterministic_and_nonmutating() {
        let input = vec![raw_row()];
        let before = input.clone();

        let first = clean_summary(&input);
        let second = clean_summary(&input);

        assert_eq!(first, second);
        assert_eq!(input, before);
    }

    #[test]
    fn test_integer_cells_coerce_to_float() {
        let mut raw = raw_row();
        raw.total_quantity_purchased = Value::Integer(100);
        raw.total_amount_spent = Value::Integer(500);

        let rows = clean_summary(&[raw]);
        let row = &rows[0];

        assert_eq!(row.total_quantity_purchased, Some(100.0));
        assert_close(row.profit_margin, 28.0);
    }
}
