use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Holding tracked in the user's portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub ticker: String,
    pub quantity: u32,
}

impl PortfolioEntry {
    /// Builds an entry from raw form input.
    ///
    /// The ticker is trimmed and upper-cased; the quantity must parse as a
    /// positive integer.
    pub fn parse(ticker: &str, quantity: &str) -> Result<Self, ValidationError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        let quantity = quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or_else(|| ValidationError::InvalidQuantity {
                value: quantity.to_owned(),
            })?;

        Ok(Self { ticker, quantity })
    }
}
