//! Safe-spread quoting engine.
//!
//! For one outcome-token pair, quotes a BID on the buy token and an ASK on
//! its complement around an inventory-skewed midpoint:
//! - Cancels quotes that drifted too far from target, and trims each side
//!   to its maximum count keeping the closest quotes
//! - Places at most one new bid and one new ask per call, sized against
//!   free collateral, sellable inventory, notional and per-token caps
//!
//! All comparisons happen in buy-token price space: a SELL resting on the
//! complement at `p` is an ask at `1 - p`.

use std::fmt;

use rust_decimal::Decimal;
use tracing::debug;

use pmm_core::{
    round_price, round_size, Order, OrderSide, Price, Size, Token, MIN_SIZE, MIN_TICK,
};

use crate::config::SafeSpreadConfig;
use crate::inventory::InventoryContext;

/// Desired bid and ask, both in buy-token price space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteTargets {
    pub bid: Price,
    pub ask: Price,
}

impl QuoteTargets {
    /// Target for the side an order rests on.
    #[inline]
    pub fn for_side(&self, side: OrderSide) -> Price {
        match side {
            OrderSide::Buy => self.bid,
            OrderSide::Sell => self.ask,
        }
    }

    /// Distance of an order's effective price from its side's target.
    #[inline]
    pub fn distance(&self, order: &Order) -> Decimal {
        order.effective_price().distance(self.for_side(order.side))
    }
}

/// Result of one placement call.
///
/// `remaining_collateral` is the input collateral minus the notional of any
/// BUY placed, ready to be threaded into the next pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub orders: Vec<Order>,
    pub remaining_collateral: Decimal,
}

/// Why a side was not quoted. Not an error: skipping is steady-state behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSkip {
    /// A resting quote already sits within one tick of target.
    NearDuplicate,
    /// Sellable inventory below the minimum placeable size.
    InsufficientInventory,
    /// Free collateral cannot fund the minimum placeable size.
    InsufficientCollateral,
    /// A standard-size bid would exceed the per-side notional cap.
    NotionalCapExceeded,
    /// Holdings of the buy token already at or above the cap.
    InventoryCapReached,
    /// Computed size fell below the minimum placeable size.
    BelowMinimumSize,
}

impl fmt::Display for QuoteSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearDuplicate => write!(f, "NEAR_DUPLICATE"),
            Self::InsufficientInventory => write!(f, "INSUFFICIENT_INVENTORY"),
            Self::InsufficientCollateral => write!(f, "INSUFFICIENT_COLLATERAL"),
            Self::NotionalCapExceeded => write!(f, "NOTIONAL_CAP_EXCEEDED"),
            Self::InventoryCapReached => write!(f, "INVENTORY_CAP_REACHED"),
            Self::BelowMinimumSize => write!(f, "BELOW_MINIMUM_SIZE"),
        }
    }
}

/// Inventory-capped symmetric quoting engine.
#[derive(Debug, Clone)]
pub struct SafeSpread {
    config: SafeSpreadConfig,
    context: InventoryContext,
}

impl SafeSpread {
    /// Create an engine with an empty inventory context.
    pub fn new(config: SafeSpreadConfig) -> Self {
        Self {
            config,
            context: InventoryContext::default(),
        }
    }

    pub fn config(&self) -> &SafeSpreadConfig {
        &self.config
    }

    pub fn context(&self) -> &InventoryContext {
        &self.context
    }

    /// Replace the inventory context for the coming cycle.
    pub fn set_context(&mut self, context: InventoryContext) {
        self.context = context;
    }

    /// Midpoint shifted down by held inventory of `token`.
    pub fn mid_with_skew(&self, base_mid: Price, token: Token) -> Price {
        let skew = self.context.holdings(token) * self.config.skew_per_unit;
        round_price(base_mid.inner() - skew)
    }

    /// Symmetric bid/ask around `mid`. Always returns `ask > bid`.
    pub fn desired_quotes(&self, mid: Price) -> QuoteTargets {
        let half = self.config.half_spread();
        let mut bid = round_price(mid.inner() - half);
        let mut ask = round_price(mid.inner() + half);
        if ask <= bid {
            ask = round_price(bid.inner() + MIN_TICK);
            // bid pinned at the upper clamp: open the gap downward instead
            if ask <= bid {
                bid = round_price(ask.inner() - MIN_TICK);
            }
        }
        QuoteTargets { bid, ask }
    }

    /// Targets for a pair. Both phases of a cycle go through here.
    pub fn quote_targets(&self, target_price: Price, buy_token: Token) -> QuoteTargets {
        let mid = self.mid_with_skew(target_price, buy_token);
        self.desired_quotes(mid)
    }

    /// Orders to cancel from one pair's order set, inferring the buy token.
    ///
    /// The buy token is the first BUY's token, else the complement of the
    /// first SELL's token. An empty set yields nothing to cancel.
    pub fn cancellable_orders(&self, orders: &[Order], target_price: Price) -> Vec<Order> {
        match infer_buy_token(orders) {
            Some(buy_token) => self.cancellable_orders_for(buy_token, orders, target_price),
            None => Vec::new(),
        }
    }

    /// Orders to cancel from the order set of the pair whose buy token is `buy_token`.
    ///
    /// `orders` is expected to hold BUYs on `buy_token` and SELLs on its
    /// complement. Returns far orders first, then excess bids, then excess
    /// asks; far orders never enter the excess ranking.
    pub fn cancellable_orders_for(
        &self,
        buy_token: Token,
        orders: &[Order],
        target_price: Price,
    ) -> Vec<Order> {
        if orders.is_empty() {
            return Vec::new();
        }

        let targets = self.quote_targets(target_price, buy_token);

        let (far, near): (Vec<Order>, Vec<Order>) = orders
            .iter()
            .copied()
            .partition(|o| targets.distance(o) > self.config.cancel_if_away_by);

        let excess_bids =
            excess_by_distance(&near, OrderSide::Buy, &targets, self.config.max_bids);
        let excess_asks =
            excess_by_distance(&near, OrderSide::Sell, &targets, self.config.max_asks);

        debug!(
            buy_token = %buy_token,
            bid_target = %targets.bid,
            ask_target = %targets.ask,
            far = far.len(),
            excess_bids = excess_bids.len(),
            excess_asks = excess_asks.len(),
            "Cancellation decision"
        );

        let mut cancels = far;
        cancels.extend(excess_bids);
        cancels.extend(excess_asks);
        cancels
    }

    /// New quotes for one pair: at most one SELL on the complement, then at
    /// most one BUY on `buy_token`.
    ///
    /// `sellable` is the free balance of the complement token, the inventory
    /// that can back the SELL.
    pub fn new_orders(
        &self,
        orders: &[Order],
        free_collateral: Decimal,
        sellable: Decimal,
        target_price: Price,
        buy_token: Token,
    ) -> Placement {
        let targets = self.quote_targets(target_price, buy_token);
        let sell_token = buy_token.complement();

        let mut placed = Vec::with_capacity(2);
        let mut remaining_collateral = free_collateral;

        match self.plan_ask(orders, &targets, sellable, sell_token) {
            Ok(order) => placed.push(order),
            Err(skip) => debug!(token = %sell_token, reason = %skip, "Ask not quoted"),
        }

        match self.plan_bid(orders, &targets, free_collateral, buy_token) {
            Ok(order) => {
                remaining_collateral -= order.notional();
                placed.push(order);
            }
            Err(skip) => debug!(token = %buy_token, reason = %skip, "Bid not quoted"),
        }

        Placement {
            orders: placed,
            remaining_collateral,
        }
    }

    fn plan_ask(
        &self,
        orders: &[Order],
        targets: &QuoteTargets,
        sellable: Decimal,
        sell_token: Token,
    ) -> Result<Order, QuoteSkip> {
        if has_near(orders, OrderSide::Sell, targets.ask) {
            return Err(QuoteSkip::NearDuplicate);
        }
        let min_size = self.config.min_placeable_size();
        if sellable < min_size {
            return Err(QuoteSkip::InsufficientInventory);
        }

        let size = self.ask_size(sellable, sell_token);
        if size.inner() < min_size {
            return Err(QuoteSkip::BelowMinimumSize);
        }

        // back from buy-token space to the complement's own price
        let price = round_price(Decimal::ONE - targets.ask.inner());
        Ok(Order::sell(sell_token, price, size))
    }

    /// Standard size, raised to the excess over the cap when over-inventoried.
    fn ask_size(&self, sellable: Decimal, token: Token) -> Size {
        let mut size = self.config.order_size.min(sellable);
        let held = self.context.holdings(token);
        if held > self.config.max_inventory_per_token {
            let over = held - self.config.max_inventory_per_token;
            size = size.max(over.min(sellable));
        }
        round_size(size.max(MIN_SIZE).min(sellable))
    }

    fn plan_bid(
        &self,
        orders: &[Order],
        targets: &QuoteTargets,
        free_collateral: Decimal,
        buy_token: Token,
    ) -> Result<Order, QuoteSkip> {
        if has_near(orders, OrderSide::Buy, targets.bid) {
            return Err(QuoteSkip::NearDuplicate);
        }

        let price = targets.bid.inner();
        let min_size = self.config.min_placeable_size();
        if free_collateral < price * min_size {
            return Err(QuoteSkip::InsufficientCollateral);
        }
        if price * self.config.order_size > self.config.max_notional_per_side {
            return Err(QuoteSkip::NotionalCapExceeded);
        }
        if self.context.holdings(buy_token) >= self.config.max_inventory_per_token {
            return Err(QuoteSkip::InventoryCapReached);
        }

        let size = self.bid_size(free_collateral, targets.bid, buy_token);
        if size.inner() < min_size {
            return Err(QuoteSkip::BelowMinimumSize);
        }
        Ok(Order::buy(buy_token, targets.bid, size))
    }

    /// Largest size allowed by cash, notional cap and inventory headroom,
    /// capped at `order_size`. Raised to `MIN_SIZE` only within those bounds.
    fn bid_size(&self, free_collateral: Decimal, price: Price, buy_token: Token) -> Size {
        let price = price.inner();
        let by_cash = free_collateral / price;
        let by_notional = self.config.max_notional_per_side / price;
        let headroom = (self.config.max_inventory_per_token - self.context.holdings(buy_token))
            .max(Decimal::ZERO);

        let upper = by_cash.min(by_notional).min(headroom);
        round_size(self.config.order_size.min(upper).max(MIN_SIZE).min(upper))
    }
}

fn infer_buy_token(orders: &[Order]) -> Option<Token> {
    orders
        .iter()
        .find(|o| o.is_buy())
        .or_else(|| orders.iter().find(|o| o.is_sell()))
        .map(Order::pair_token)
}

/// Orders on `side` ranked beyond `keep` by distance to target.
fn excess_by_distance(
    pool: &[Order],
    side: OrderSide,
    targets: &QuoteTargets,
    keep: usize,
) -> Vec<Order> {
    let mut ranked: Vec<Order> = pool.iter().filter(|o| o.side == side).copied().collect();
    // stable: equal distances keep input order
    ranked.sort_by_key(|o| targets.distance(o));
    ranked.into_iter().skip(keep).collect()
}

fn has_near(orders: &[Order], side: OrderSide, target: Price) -> bool {
    orders
        .iter()
        .filter(|o| o.side == side)
        .any(|o| o.effective_price().distance(target) <= MIN_TICK)
}
