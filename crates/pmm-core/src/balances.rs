//! Per-cycle inputs supplied by the order-book provider.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Size;
use crate::order::Order;
use crate::token::{PerToken, Token};

/// Held balances: collateral plus one quantity per outcome token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    /// Total collateral, including any locked by resting BUYs.
    #[serde(default)]
    pub collateral: Decimal,
    /// Total token holdings, including any locked by resting SELLs.
    #[serde(default)]
    pub tokens: PerToken<Size>,
}

impl Balances {
    pub fn new(collateral: Decimal, tokens: PerToken<Size>) -> Self {
        Self { collateral, tokens }
    }

    #[inline]
    pub fn token(&self, token: Token) -> Size {
        self.tokens[token]
    }
}

/// Resting orders and balances observed at the start of a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    #[serde(default)]
    pub orders: Vec<Order>,
    pub balances: Balances,
}

impl OrderBookSnapshot {
    pub fn new(orders: Vec<Order>, balances: Balances) -> Self {
        Self { orders, balances }
    }
}
