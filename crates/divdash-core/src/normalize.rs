//! Exchange payload normalization.
//!
//! MOEX ISS listings arrive as a table of positional rows:
//!
//! ```text
//! {"securities": {"columns": ["SECID", ...], "data": [["SBER", 250.5, ...], ...]}}
//! ```
//!
//! Rows are read by fixed column positions ([`RecordLayout`]); the `columns`
//! header is not consulted. Missing or mistyped cells fall back to `0.0` for
//! numbers and [`PLACEHOLDER`] for strings.

use serde_json::Value;

use crate::domain::{BondRecord, StockRecord, TOP_N};
use crate::error::NormalizeError;

/// Display value for a missing string cell.
pub const PLACEHOLDER: &str = "-";

const TABLE: &str = "securities";

/// Column positions of the fields read from each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub ticker: usize,
    pub price: usize,
    pub yield_value: usize,
    pub date: usize,
    pub amount: usize,
}

impl RecordLayout {
    pub const fn new(ticker: usize, price: usize, yield_value: usize, date: usize, amount: usize) -> Self {
        Self {
            ticker,
            price,
            yield_value,
            date,
            amount,
        }
    }
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self::new(0, 1, 2, 3, 4)
    }
}

/// Turns raw listing payloads into top-N display records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    pub stock_layout: RecordLayout,
    pub bond_layout: RecordLayout,
    /// Substring a ticker must contain to be kept as a bond.
    pub bond_marker: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            stock_layout: RecordLayout::default(),
            bond_layout: RecordLayout::default(),
            bond_marker: String::from("SU"),
        }
    }
}

impl Normalizer {
    /// Keeps rows with a present, positive yield, sorted descending, capped at [`TOP_N`].
    pub fn stocks(&self, payload: &Value) -> Result<Vec<StockRecord>, NormalizeError> {
        let layout = self.stock_layout;
        let mut records = rows(payload)?
            .iter()
            .filter_map(|row| {
                let dividend_yield = number_cell(row, layout.yield_value).filter(|y| *y > 0.0)?;
                Some(StockRecord {
                    ticker: text_cell(row, layout.ticker),
                    price: number_cell(row, layout.price).unwrap_or(0.0),
                    dividend_yield,
                    next_payment: text_cell(row, layout.date),
                    dividend: number_cell(row, layout.amount).unwrap_or(0.0),
                })
            })
            .collect::<Vec<_>>();

        records.sort_by(|a, b| b.dividend_yield.total_cmp(&a.dividend_yield));
        records.truncate(TOP_N);
        Ok(records)
    }

    /// Keeps rows whose ticker contains the bond marker, sorted descending by yield.
    pub fn bonds(&self, payload: &Value) -> Result<Vec<BondRecord>, NormalizeError> {
        let layout = self.bond_layout;
        let mut records = rows(payload)?
            .iter()
            .filter(|row| {
                row.get(layout.ticker)
                    .and_then(Value::as_str)
                    .is_some_and(|ticker| ticker.contains(self.bond_marker.as_str()))
            })
            .map(|row| BondRecord {
                ticker: text_cell(row, layout.ticker),
                price: number_cell(row, layout.price).unwrap_or(0.0),
                yield_pct: number_cell(row, layout.yield_value).unwrap_or(0.0),
                maturity: text_cell(row, layout.date),
                coupon: number_cell(row, layout.amount).unwrap_or(0.0),
            })
            .collect::<Vec<_>>();

        records.sort_by(|a, b| b.yield_pct.total_cmp(&a.yield_pct));
        records.truncate(TOP_N);
        Ok(records)
    }
}

fn rows(payload: &Value) -> Result<&Vec<Value>, NormalizeError> {
    let table = payload
        .get(TABLE)
        .ok_or(NormalizeError::MissingTable { table: TABLE })?;
    table
        .get("data")
        .and_then(Value::as_array)
        .ok_or(NormalizeError::MalformedTable { table: TABLE })
}

fn number_cell(row: &Value, index: usize) -> Option<f64> {
    let value = match row.get(index)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

fn text_cell(row: &Value, index: usize) -> String {
    match row.get(index) {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::from(PLACEHOLDER),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stocks_drop_missing_and_non_positive_yields() {
        let payload = json!({"securities": {"data": [
            ["SBER", 250.5, 8.5, "20.12.2023", 21.3],
            ["NOYD", 100.0, null, "01.01.2024", 0.0],
            ["ZERO", 100.0, 0, "01.01.2024", 0.0],
            ["NEG", 100.0, -1.5, "01.01.2024", 0.0],
        ]}});

        let stocks = Normalizer::default().stocks(&payload).expect("valid table");

        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].ticker, "SBER");
    }

    #[test]
    fn missing_cells_default_to_zero_and_placeholder() {
        let payload = json!({"securities": {"data": [["GAZP", null, "9.2"]]}});

        let stocks = Normalizer::default().stocks(&payload).expect("valid table");

        assert_eq!(
            stocks,
            vec![StockRecord::new("GAZP", 0.0, 9.2, PLACEHOLDER, 0.0)]
        );
    }

    #[test]
    fn bonds_are_selected_by_ticker_marker() {
        let payload = json!({"securities": {"data": [
            ["SU26240RMFS0", 980.5, 8.2, "2033-05-15", 80.4],
            ["RU000A0JX0J2", 1001.0, 12.0, "2030-01-01", 40.0],
            [null, 990.0, 9.0, "2031-01-01", 40.0],
            ["SU26230RMFS1", 972.8, 8.5, "2036-03-22", 82.7],
        ]}});

        let bonds = Normalizer::default().bonds(&payload).expect("valid table");

        let tickers = bonds.iter().map(|b| b.ticker.as_str()).collect::<Vec<_>>();
        assert_eq!(tickers, vec!["SU26230RMFS1", "SU26240RMFS0"]);
    }

    #[test]
    fn custom_layout_reads_other_positions() {
        let normalizer = Normalizer {
            stock_layout: RecordLayout::new(0, 3, 5, 1, 2),
            ..Normalizer::default()
        };
        let payload = json!({"securities": {"data": [
            ["LKOH", "10.12.2023", 455.5, 5840.0, "ignored", 7.8],
        ]}});

        let stocks = normalizer.stocks(&payload).expect("valid table");

        assert_eq!(
            stocks,
            vec![StockRecord::new("LKOH", 5840.0, 7.8, "10.12.2023", 455.5)]
        );
    }

    #[test]
    fn payload_without_table_is_rejected() {
        let error = Normalizer::default()
            .stocks(&json!({"marketdata": {}}))
            .expect_err("no securities table");
        assert_eq!(error, NormalizeError::MissingTable { table: "securities" });

        let error = Normalizer::default()
            .bonds(&json!({"securities": {"data": "nope"}}))
            .expect_err("data is not an array");
        assert_eq!(error, NormalizeError::MalformedTable { table: "securities" });
    }
}
