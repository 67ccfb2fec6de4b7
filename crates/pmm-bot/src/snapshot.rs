//! Replay input: one order-book snapshot plus target prices.

use crate::error::{AppError, AppResult};
use pmm_core::{Balances, CoreError, Order, OrderBookSnapshot, PerToken, Price, Token};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything one strategy cycle consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInput {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub balances: Balances,
    pub target_prices: PerToken<Price>,
}

impl CycleInput {
    /// Load and validate a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Snapshot(format!("Failed to read snapshot {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a snapshot from JSON text.
    pub fn from_json_str(content: &str) -> AppResult<Self> {
        let input: Self = serde_json::from_str(content)?;
        input.validate()?;
        Ok(input)
    }

    /// Reject inputs the engine would silently misread.
    pub fn validate(&self) -> AppResult<()> {
        for token in Token::ALL {
            Price::try_probability(self.target_prices[token].inner())?;
        }

        for order in &self.orders {
            Price::try_probability(order.price.inner())?;
            if !order.size.is_positive() {
                return Err(CoreError::InvalidSize(format!(
                    "resting order {order} has non-positive size"
                ))
                .into());
            }
        }

        if self.balances.collateral < Decimal::ZERO {
            return Err(AppError::Snapshot(format!(
                "collateral {} is negative",
                self.balances.collateral
            )));
        }
        for (token, held) in self.balances.tokens.iter() {
            if held.inner() < Decimal::ZERO {
                return Err(AppError::Snapshot(format!("{token} balance {held} is negative")));
            }
        }

        Ok(())
    }

    pub fn book(&self) -> OrderBookSnapshot {
        OrderBookSnapshot::new(self.orders.clone(), self.balances.clone())
    }
}
