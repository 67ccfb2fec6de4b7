//! Inventory and collateral accounting for one cycle.
//!
//! Derives what is actually free to quote with once the collateral
//! locked by resting BUYs and the tokens locked by resting SELLs are
//! taken out of the held balances.

use rust_decimal::Decimal;

use pmm_core::{Balances, Order, PerToken, Size, Token};

/// Read-only context the engine quotes against during one cycle.
///
/// Replaced wholesale at the start of every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryContext {
    /// Total holdings per token (locked or not), used for skew and caps.
    pub balances: PerToken<Size>,
    /// Collateral not locked by resting BUYs.
    pub free_collateral: Decimal,
}

impl InventoryContext {
    pub fn new(balances: PerToken<Size>, free_collateral: Decimal) -> Self {
        Self {
            balances,
            free_collateral,
        }
    }

    #[inline]
    pub fn holdings(&self, token: Token) -> Decimal {
        self.balances[token].inner()
    }
}

/// Collateral locked by BUY orders: sum of price * size.
pub fn locked_collateral<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Decimal {
    orders
        .into_iter()
        .filter(|o| o.is_buy())
        .map(Order::notional)
        .sum()
}

/// Tokens locked by SELL orders, per token they rest on.
pub fn locked_inventory<'a>(orders: impl IntoIterator<Item = &'a Order>) -> PerToken<Decimal> {
    let mut locked = PerToken::new(Decimal::ZERO, Decimal::ZERO);
    for order in orders.into_iter().filter(|o| o.is_sell()) {
        locked[order.token] += order.size.inner();
    }
    locked
}

/// Free collateral and free inventory after accounting for resting orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBalances {
    pub collateral: Decimal,
    pub tokens: PerToken<Decimal>,
}

impl FreeBalances {
    /// Derive from the orders that will still be resting and the held balances.
    ///
    /// Values can go negative when the provider reports more locked than held;
    /// the sizing rules then simply decline to quote.
    pub fn derive(remaining: &[Order], balances: &Balances) -> Self {
        let collateral = balances.collateral - locked_collateral(remaining);
        let locked = locked_inventory(remaining);
        let tokens = PerToken::from_fn(|t| balances.token(t).inner() - locked[t]);
        Self { collateral, tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmm_core::Price;
    use rust_decimal_macros::dec;

    fn buy(token: Token, price: Decimal, size: Decimal) -> Order {
        Order::buy(token, Price::new(price), Size::new(size))
    }

    fn sell(token: Token, price: Decimal, size: Decimal) -> Order {
        Order::sell(token, Price::new(price), Size::new(size))
    }

    #[test]
    fn test_locked_collateral_counts_buys_only() {
        let orders = vec![
            buy(Token::A, dec!(0.40), dec!(10)),
            buy(Token::B, dec!(0.50), dec!(6)),
            sell(Token::B, dec!(0.55), dec!(100)),
        ];
        assert_eq!(locked_collateral(&orders), dec!(7));
    }

    #[test]
    fn test_locked_inventory_per_token() {
        let orders = vec![
            sell(Token::A, dec!(0.60), dec!(4)),
            sell(Token::A, dec!(0.61), dec!(3)),
            sell(Token::B, dec!(0.40), dec!(5)),
            buy(Token::B, dec!(0.30), dec!(50)),
        ];
        let locked = locked_inventory(&orders);
        assert_eq!(locked[Token::A], dec!(7));
        assert_eq!(locked[Token::B], dec!(5));
    }

    #[test]
    fn test_free_balances_derive() {
        let remaining = vec![
            buy(Token::A, dec!(0.45), dec!(10)),
            sell(Token::B, dec!(0.52), dec!(8)),
        ];
        let balances = Balances::new(
            dec!(100),
            PerToken::new(Size::new(dec!(2)), Size::new(dec!(20))),
        );
        let free = FreeBalances::derive(&remaining, &balances);
        assert_eq!(free.collateral, dec!(95.5));
        assert_eq!(free.tokens[Token::A], dec!(2));
        assert_eq!(free.tokens[Token::B], dec!(12));
    }

    #[test]
    fn test_context_holdings() {
        let ctx = InventoryContext::new(
            PerToken::new(Size::new(dec!(41)), Size::ZERO),
            dec!(10),
        );
        assert_eq!(ctx.holdings(Token::A), dec!(41));
        assert_eq!(ctx.holdings(Token::B), Decimal::ZERO);
    }
}
