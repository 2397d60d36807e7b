//! View model built from [`AppState`].
//!
//! [`build_view`] is a pure function: it recomputes purchase counts from the
//! current investment amount and the stock/bond comparison on every call.
//! Output layers map the view to text or JSON; nothing here produces markup.

use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::domain::{BondRecord, StockRecord};
use crate::notice::Locale;
use crate::state::AppState;

/// Share of a yield kept after the 13% personal income tax.
pub const AFTER_TAX_FACTOR: f64 = 0.87;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: StatsView,
    pub stocks: Vec<StockRow>,
    pub bonds: Vec<BondRow>,
    pub comparison: ComparisonView,
    pub portfolio: Vec<PortfolioRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub key_rate: f64,
    pub inflation: f64,
    pub investment_amount: f64,
    pub last_refresh: Option<String>,
    pub refresh_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow {
    pub ticker: String,
    pub price: f64,
    pub dividend_yield: f64,
    pub next_payment: String,
    pub lots: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondRow {
    pub ticker: String,
    pub price: f64,
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub maturity: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioRow {
    pub index: usize,
    pub ticker: String,
    pub quantity: u32,
}

/// Sign of a real yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::High, Locale::En) => "High",
            (Self::Low, Locale::En) => "Low",
            (Self::High, Locale::Ru) => "Высокий",
            (Self::Low, Locale::Ru) => "Низкий",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    /// Percentage; `None` when the underlying list is empty.
    Percent { value: Option<f64>, tone: Tone },
    Level { level: Level },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AfterTaxYield,
    Inflation,
    RealYield,
    Risk,
    Volatility,
}

impl Metric {
    pub const fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::AfterTaxYield => "Yield (after tax)",
                Self::Inflation => "Inflation",
                Self::RealYield => "Real yield",
                Self::Risk => "Risk",
                Self::Volatility => "Volatility",
            },
            Locale::Ru => match self {
                Self::AfterTaxYield => "Доходность (после налогов)",
                Self::Inflation => "Инфляция",
                Self::RealYield => "Реальная доходность",
                Self::Risk => "Риск",
                Self::Volatility => "Волатильность",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub metric: Metric,
    pub stocks: Cell,
    pub bonds: Cell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub stock_mean_yield: Option<f64>,
    pub bond_mean_yield: Option<f64>,
    pub rows: Vec<ComparisonRow>,
}

pub fn build_view(state: &AppState) -> DashboardView {
    let amount = state.settings.investment_amount;

    DashboardView {
        stats: StatsView {
            key_rate: state.settings.key_rate,
            inflation: state.settings.inflation,
            investment_amount: amount,
            last_refresh: state
                .last_refresh
                .and_then(|ts| ts.format(&Rfc3339).ok()),
            refresh_enabled: !state.refreshing,
        },
        stocks: state.stocks.iter().map(|s| stock_row(s, amount)).collect(),
        bonds: state.bonds.iter().map(|b| bond_row(b, amount)).collect(),
        comparison: build_comparison(state),
        portfolio: state
            .portfolio
            .iter()
            .enumerate()
            .map(|(index, entry)| PortfolioRow {
                index,
                ticker: entry.ticker.clone(),
                quantity: entry.quantity,
            })
            .collect(),
    }
}

fn stock_row(stock: &StockRecord, amount: f64) -> StockRow {
    StockRow {
        ticker: stock.ticker.clone(),
        price: stock.price,
        dividend_yield: stock.dividend_yield,
        next_payment: stock.next_payment.clone(),
        lots: stock.affordable_lots(amount),
    }
}

fn bond_row(bond: &BondRecord, amount: f64) -> BondRow {
    BondRow {
        ticker: bond.ticker.clone(),
        price: bond.price,
        yield_pct: bond.yield_pct,
        maturity: bond.maturity.clone(),
        quantity: bond.affordable_quantity(amount),
    }
}

fn build_comparison(state: &AppState) -> ComparisonView {
    let inflation = state.settings.inflation;
    let stock_mean = mean(state.stocks.iter().map(|s| s.dividend_yield));
    let bond_mean = mean(state.bonds.iter().map(|b| b.yield_pct));

    let after_tax = |m: Option<f64>| Cell::Percent {
        value: m.map(|m| m * AFTER_TAX_FACTOR),
        tone: Tone::Neutral,
    };
    let real = |m: Option<f64>| {
        let value = m.map(|m| m - inflation);
        let tone = match value {
            Some(v) if v >= 0.0 => Tone::Positive,
            Some(_) => Tone::Negative,
            None => Tone::Neutral,
        };
        Cell::Percent { value, tone }
    };
    let inflation_cell = Cell::Percent {
        value: Some(inflation),
        tone: Tone::Neutral,
    };

    let rows = vec![
        ComparisonRow {
            metric: Metric::AfterTaxYield,
            stocks: after_tax(stock_mean),
            bonds: after_tax(bond_mean),
        },
        ComparisonRow {
            metric: Metric::Inflation,
            stocks: inflation_cell,
            bonds: inflation_cell,
        },
        ComparisonRow {
            metric: Metric::RealYield,
            stocks: real(stock_mean),
            bonds: real(bond_mean),
        },
        ComparisonRow {
            metric: Metric::Risk,
            stocks: Cell::Level { level: Level::High },
            bonds: Cell::Level { level: Level::Low },
        },
        ComparisonRow {
            metric: Metric::Volatility,
            stocks: Cell::Level { level: Level::High },
            bonds: Cell::Level { level: Level::Low },
        },
    ];

    ComparisonView {
        stock_mean_yield: stock_mean,
        bond_mean_yield: bond_mean,
        rows,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
