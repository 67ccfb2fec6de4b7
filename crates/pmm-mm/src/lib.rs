//! Inventory-capped two-sided quoting for binary-outcome markets.
//!
//! Provides:
//! - Quote calculation around an inventory-skewed midpoint
//! - Cancellation of stale and excess resting quotes
//! - Sizing against free collateral, sellable inventory and caps
//! - Per-cycle orchestration across both outcome tokens
//!
//! # Architecture
//!
//! ```text
//! Refresh trigger → SafeSpreadStrategy.get_orders()
//!                    ├─ orders_for_pair: BUYs on T + SELLs on T'
//!                    ├─ SafeSpread.cancellable_orders_for (both pairs)
//!                    ├─ FreeBalances: collateral/inventory after cancels
//!                    └─ SafeSpread.new_orders (pair A, then pair B,
//!                       free collateral threaded through)
//!                         ↓
//!                    CycleDecision { to_cancel, to_place } → transport
//! ```

pub mod config;
pub mod inventory;
pub mod quote_engine;
pub mod strategy;

pub use config::{SafeSpreadConfig, StrategyConfigDocument};
pub use inventory::{FreeBalances, InventoryContext};
pub use quote_engine::{Placement, QuoteSkip, QuoteTargets, SafeSpread};
pub use strategy::{orders_for_pair, remaining_after_cancels, CycleDecision, SafeSpreadStrategy};
