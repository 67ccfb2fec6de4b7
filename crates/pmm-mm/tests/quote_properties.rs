//! Property-based tests for the safe-spread quoting engine.
//!
//! Uses proptest to verify invariants that should hold for all inputs.
//!
//! Run with: cargo test -p pmm-mm --test quote_properties

use pmm_core::{
    round_price, Balances, Order, OrderBookSnapshot, OrderSide, PerToken, Price, Size, Token,
    MAX_DECIMALS, MIN_TICK,
};
use pmm_mm::{InventoryContext, SafeSpread, SafeSpreadConfig, SafeSpreadStrategy};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn test_config() -> SafeSpreadConfig {
    SafeSpreadConfig {
        target_spread: dec!(0.04),
        max_bids: 2,
        max_asks: 2,
        ..Default::default()
    }
}

/// Decimal with four fractional digits from a scaled integer.
fn scaled(units: i64) -> Decimal {
    Decimal::new(units, 4)
}

/// Pair-A order set. Prices and sizes are drawn from narrow pools as well
/// as wide ranges, so identical orders show up regularly.
fn pair_a_orders() -> impl Strategy<Value = Vec<Order>> {
    let price_units = prop_oneof![100i64..9900, Just(4800i64), Just(5200i64)];
    prop::collection::vec((any::<bool>(), price_units, 5i64..8), 0..12).prop_map(|raw| {
        raw.into_iter()
            .map(|(is_buy, price_units, size)| {
                let price = Price::new(scaled(price_units));
                let size = Size::new(Decimal::from(size));
                if is_buy {
                    Order::buy(Token::A, price, size)
                } else {
                    Order::sell(Token::B, price, size)
                }
            })
            .collect()
    })
}

/// Multiset difference, one instance removed per cancel.
fn survivors(orders: &[Order], cancels: &[Order]) -> Vec<Order> {
    let mut left = orders.to_vec();
    for cancel in cancels {
        if let Some(pos) = left.iter().position(|o| o == cancel) {
            left.remove(pos);
        }
    }
    left
}

fn count_of(orders: &[Order], order: &Order) -> usize {
    orders.iter().filter(|o| *o == order).count()
}

proptest! {
    /// Normalized prices stay inside the tradable band with bounded precision.
    #[test]
    fn round_price_bounded(units in -50_000i64..150_000) {
        let price = round_price(scaled(units)).inner();
        prop_assert!(price >= MIN_TICK, "{} below MIN_TICK", price);
        prop_assert!(price <= Decimal::ONE - MIN_TICK, "{} above 1 - MIN_TICK", price);
        prop_assert!(price.scale() <= MAX_DECIMALS, "{} has scale {}", price, price.scale());
    }

    /// Quotes never cross or coincide.
    #[test]
    fn desired_quotes_never_crossed(mid in 0i64..=10_000, half in 0i64..3_000) {
        let config = SafeSpreadConfig {
            half_spread_override: Some(scaled(half)),
            ..test_config()
        };
        let targets = SafeSpread::new(config).desired_quotes(Price::new(scaled(mid)));
        prop_assert!(targets.ask > targets.bid, "bid {} ask {}", targets.bid, targets.ask);
    }

    /// Same input, same cancellations.
    #[test]
    fn cancellation_deterministic(orders in pair_a_orders(), target in 500i64..9500) {
        let mm = SafeSpread::new(test_config());
        let target = Price::new(scaled(target));
        let first = mm.cancellable_orders(&orders, target);
        let second = mm.cancellable_orders(&orders, target);
        prop_assert_eq!(first, second);
    }

    /// Cancelling leaves a set with nothing further to cancel.
    #[test]
    fn cancellation_idempotent(orders in pair_a_orders(), target in 500i64..9500) {
        let mm = SafeSpread::new(test_config());
        let target = Price::new(scaled(target));
        let cancels = mm.cancellable_orders(&orders, target);
        let left = survivors(&orders, &cancels);
        prop_assert!(mm.cancellable_orders(&left, target).is_empty());
    }

    /// Cancel list never names an order more often than it rests, and leaves
    /// at most `max_bids` bids and `max_asks` asks resting.
    #[test]
    fn cancellation_respects_count_caps(
        orders in pair_a_orders(),
        target in 500i64..9500,
        max_bids in 0usize..4,
        max_asks in 0usize..4,
    ) {
        let config = SafeSpreadConfig { max_bids, max_asks, ..test_config() };
        let mm = SafeSpread::new(config);
        let cancels = mm.cancellable_orders(&orders, Price::new(scaled(target)));

        for cancel in &cancels {
            prop_assert!(count_of(&cancels, cancel) <= count_of(&orders, cancel));
        }

        let surviving = survivors(&orders, &cancels);
        prop_assert_eq!(surviving.len(), orders.len() - cancels.len());
        let bids = surviving.iter().filter(|o| o.side == OrderSide::Buy).count();
        let asks = surviving.iter().filter(|o| o.side == OrderSide::Sell).count();
        prop_assert!(bids <= max_bids, "{} bids survive, max {}", bids, max_bids);
        prop_assert!(asks <= max_asks, "{} asks survive, max {}", asks, max_asks);
    }

    /// A bid is never placed at or above the cap, and never sized past it.
    #[test]
    fn bid_respects_inventory_cap(
        held in 0i64..60,
        collateral in 0i64..500,
        target in 500i64..9500,
    ) {
        let config = test_config();
        let cap = config.max_inventory_per_token;
        let mut mm = SafeSpread::new(config);
        let held = Decimal::from(held);
        mm.set_context(InventoryContext::new(
            PerToken::new(Size::new(held), Size::ZERO),
            Decimal::from(collateral),
        ));

        let placement = mm.new_orders(
            &[],
            Decimal::from(collateral),
            Decimal::ZERO,
            Price::new(scaled(target)),
            Token::A,
        );
        for bid in placement.orders.iter().filter(|o| o.is_buy()) {
            prop_assert!(held < cap);
            prop_assert!(held + bid.size.inner() <= cap, "held {} + {} > cap", held, bid.size);
        }
    }

    /// BUY notional placed across both pairs never exceeds the collateral
    /// left unlocked by the orders that keep resting.
    #[test]
    fn cycle_conserves_collateral(
        collateral in 0i64..40_000,
        held_a in 0i64..80,
        held_b in 0i64..80,
        target in 500i64..9500,
        resting in pair_a_orders(),
    ) {
        let mut strategy = SafeSpreadStrategy::new(test_config());
        let balances = Balances::new(
            scaled(collateral * 100),
            PerToken::new(Size::new(Decimal::from(held_a)), Size::new(Decimal::from(held_b))),
        );
        let collateral = balances.collateral;
        let book = OrderBookSnapshot::new(resting.clone(), balances);
        let a = scaled(target);
        let targets = PerToken::new(Price::new(a), Price::new(Decimal::ONE - a));

        let decision = strategy.get_orders(&book, &targets);

        let spent: Decimal = decision
            .to_place
            .iter()
            .filter(|o| o.is_buy())
            .map(Order::notional)
            .sum();
        let available = strategy.engine().context().free_collateral.max(Decimal::ZERO);
        prop_assert!(spent <= available, "spent {} of {}", spent, available);

        let still_locked: Decimal = survivors(&resting, &decision.to_cancel)
            .iter()
            .filter(|o| o.is_buy())
            .map(Order::notional)
            .sum();
        let unlocked = (collateral - still_locked).max(Decimal::ZERO);
        prop_assert!(spent <= unlocked, "spent {} of {} unlocked", spent, unlocked);
    }
}
