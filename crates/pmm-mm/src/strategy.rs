//! Per-cycle orchestration across both outcome-token pairs.
//!
//! One pass per refresh trigger:
//! 1. Partition resting orders into the two pairs
//! 2. Collect cancellations for every pair
//! 3. Derive free collateral and free inventory as if the cancels had landed
//! 4. Publish the inventory context, then place pair by pair, threading the
//!    remaining free collateral so the second pair cannot spend what the first
//!    already reserved

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use pmm_core::{Order, OrderBookSnapshot, PerToken, Price, Token};

use crate::config::{SafeSpreadConfig, StrategyConfigDocument};
use crate::inventory::{FreeBalances, InventoryContext};
use crate::quote_engine::SafeSpread;

/// Orders to cancel and orders to submit for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDecision {
    pub to_cancel: Vec<Order>,
    pub to_place: Vec<Order>,
}

impl CycleDecision {
    pub fn is_empty(&self) -> bool {
        self.to_cancel.is_empty() && self.to_place.is_empty()
    }
}

/// BUYs on `buy_token` plus SELLs on its complement.
pub fn orders_for_pair(orders: &[Order], buy_token: Token) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| o.belongs_to_pair(buy_token))
        .copied()
        .collect()
}

/// `orders` minus `cancels`, one resting instance removed per cancel entry.
///
/// Identical orders are indistinguishable, so cancelling one of two equal
/// orders leaves the other resting.
pub fn remaining_after_cancels(orders: &[Order], cancels: &[Order]) -> Vec<Order> {
    let mut pending: HashMap<Order, usize> = HashMap::new();
    for order in cancels {
        *pending.entry(*order).or_default() += 1;
    }

    orders
        .iter()
        .filter(|o| match pending.get_mut(*o) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .copied()
        .collect()
}

/// Safe-spread strategy over the two outcome tokens of one market.
#[derive(Debug, Clone)]
pub struct SafeSpreadStrategy {
    engine: SafeSpread,
}

impl SafeSpreadStrategy {
    pub fn new(config: SafeSpreadConfig) -> Self {
        Self {
            engine: SafeSpread::new(config),
        }
    }

    /// Build from either a nested `safe_spread` table or a flat one.
    pub fn from_document(document: StrategyConfigDocument) -> Self {
        Self::new(document.into_config())
    }

    pub fn engine(&self) -> &SafeSpread {
        &self.engine
    }

    /// Run one cycle over the current book and per-token target prices.
    pub fn get_orders(
        &mut self,
        book: &OrderBookSnapshot,
        target_prices: &PerToken<Price>,
    ) -> CycleDecision {
        for (token, price) in target_prices.iter() {
            debug!(token = %token, target_price = %price, "Target price");
        }

        let by_pair = PerToken::from_fn(|t| orders_for_pair(&book.orders, t));

        let mut to_cancel = Vec::new();
        for token in Token::ALL {
            to_cancel.extend(self.engine.cancellable_orders_for(
                token,
                &by_pair[token],
                target_prices[token],
            ));
        }

        let remaining = remaining_after_cancels(&book.orders, &to_cancel);
        let free = FreeBalances::derive(&remaining, &book.balances);
        debug!(
            free_collateral = %free.collateral,
            free_a = %free.tokens[Token::A],
            free_b = %free.tokens[Token::B],
            "Free balances after cancellation"
        );

        self.engine.set_context(InventoryContext::new(
            book.balances.tokens,
            free.collateral,
        ));

        let mut to_place = Vec::new();
        let mut free_collateral = free.collateral;
        for token in Token::ALL {
            let placement = self.engine.new_orders(
                &by_pair[token],
                free_collateral,
                free.tokens[token.complement()],
                target_prices[token],
                token,
            );
            free_collateral = placement.remaining_collateral;
            to_place.extend(placement.orders);
        }

        if !to_cancel.is_empty() || !to_place.is_empty() {
            info!(
                cancels = to_cancel.len(),
                places = to_place.len(),
                free_collateral = %free_collateral,
                "Cycle decision"
            );
        }

        CycleDecision {
            to_cancel,
            to_place,
        }
    }
}
