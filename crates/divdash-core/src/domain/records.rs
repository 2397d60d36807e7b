use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in a top-N listing.
pub const TOP_N: usize = 10;

/// Shares per lot used when computing affordable stock purchases.
pub const LOT_SIZE: u32 = 10;

/// Dividend-paying share as shown in the stock table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub ticker: String,
    pub price: f64,
    pub dividend_yield: f64,
    pub next_payment: String,
    pub dividend: f64,
}

impl StockRecord {
    pub fn new(
        ticker: impl Into<String>,
        price: f64,
        dividend_yield: f64,
        next_payment: impl Into<String>,
        dividend: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            dividend_yield,
            next_payment: next_payment.into(),
            dividend,
        }
    }

    /// Whole lots affordable with `amount`. Non-positive prices buy nothing.
    pub fn affordable_lots(&self, amount: f64) -> u64 {
        affordable_units(amount, self.price * f64::from(LOT_SIZE))
    }
}

/// Federal loan bond as shown in the bond table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    pub ticker: String,
    pub price: f64,
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub maturity: String,
    pub coupon: f64,
}

impl BondRecord {
    pub fn new(
        ticker: impl Into<String>,
        price: f64,
        yield_pct: f64,
        maturity: impl Into<String>,
        coupon: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            yield_pct,
            maturity: maturity.into(),
            coupon,
        }
    }

    /// Whole bonds affordable with `amount`.
    pub fn affordable_quantity(&self, amount: f64) -> u64 {
        affordable_units(amount, self.price)
    }
}

fn affordable_units(amount: f64, unit_cost: f64) -> u64 {
    if !(unit_cost > 0.0) || !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    let units = (amount / unit_cost).floor();
    if units.is_finite() {
        units as u64
    } else {
        0
    }
}
