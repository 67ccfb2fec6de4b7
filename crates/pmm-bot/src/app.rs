//! Application wiring around the strategy.

use crate::config::AppConfig;
use crate::snapshot::CycleInput;
use pmm_mm::{CycleDecision, SafeSpreadStrategy};
use tracing::info;

/// Owns the strategy for the lifetime of the process.
pub struct Application {
    strategy: SafeSpreadStrategy,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        info!(
            target_spread = %config.strategy.target_spread,
            order_size = %config.strategy.order_size,
            max_bids = config.strategy.max_bids,
            max_asks = config.strategy.max_asks,
            "Strategy configured"
        );
        Self {
            strategy: SafeSpreadStrategy::new(config.strategy),
        }
    }

    /// Run one cycle against a snapshot.
    pub fn run_cycle(&mut self, input: &CycleInput) -> CycleDecision {
        let book = input.book();
        info!(
            resting = book.orders.len(),
            collateral = %book.balances.collateral,
            "Running cycle"
        );
        self.strategy.get_orders(&book, &input.target_prices)
    }

    pub fn strategy(&self) -> &SafeSpreadStrategy {
        &self.strategy
    }
}
