//! Order side and resting/proposed order values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Price, Size};
use crate::token::Token;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// A limit order on one outcome token.
///
/// Orders carry no identifier; two orders with the same token, side,
/// price and size are the same order for set-membership purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub token: Token,
    pub side: OrderSide,
    pub price: Price,
    pub size: Size,
}

impl Order {
    pub fn new(token: Token, side: OrderSide, price: Price, size: Size) -> Self {
        Self {
            token,
            side,
            price,
            size,
        }
    }

    pub fn buy(token: Token, price: Price, size: Size) -> Self {
        Self::new(token, OrderSide::Buy, price, size)
    }

    pub fn sell(token: Token, price: Price, size: Size) -> Self {
        Self::new(token, OrderSide::Sell, price, size)
    }

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }

    #[inline]
    pub fn is_sell(&self) -> bool {
        self.side == OrderSide::Sell
    }

    /// Collateral value: price * size.
    #[inline]
    pub fn notional(&self) -> Decimal {
        self.size.notional(self.price)
    }

    /// Price expressed in the buy-token price space of this order's pair.
    ///
    /// A BUY keeps its price; a SELL rests on the complement, so its price
    /// maps to `1 - price`.
    #[inline]
    pub fn effective_price(&self) -> Price {
        match self.side {
            OrderSide::Buy => self.price,
            OrderSide::Sell => self.price.complement(),
        }
    }

    /// Buy token of the pair this order belongs to.
    #[inline]
    pub fn pair_token(&self) -> Token {
        match self.side {
            OrderSide::Buy => self.token,
            OrderSide::Sell => self.token.complement(),
        }
    }

    /// BUYs on `buy_token` and SELLs on its complement form one pair.
    #[inline]
    pub fn belongs_to_pair(&self, buy_token: Token) -> bool {
        self.pair_token() == buy_token
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {}",
            self.side, self.size, self.token, self.price
        )
    }
}
