//! Core domain types for the binary-outcome market maker.
//!
//! This crate provides fundamental types used throughout the quoting system:
//! - `Token`, `PerToken`: The two complementary outcome tokens
//! - `Price`, `Size`: Precision-safe numeric types and price normalization
//! - `Order`, `OrderSide`: Resting and proposed orders
//! - `Balances`, `OrderBookSnapshot`: Per-cycle inputs from the order-book provider

pub mod balances;
pub mod decimal;
pub mod error;
pub mod order;
pub mod token;

pub use balances::{Balances, OrderBookSnapshot};
pub use decimal::{round_price, round_size, Price, Size, MAX_DECIMALS, MIN_SIZE, MIN_TICK};
pub use error::{CoreError, Result};
pub use order::{Order, OrderSide};
pub use token::{PerToken, Token};
