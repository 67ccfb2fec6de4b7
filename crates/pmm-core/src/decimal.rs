//! Precision-safe decimal types for outcome-token trading.
//!
//! Uses `rust_decimal` for exact decimal arithmetic. Every price the
//! engine computes goes through [`round_price`] before it is compared or
//! emitted, so targets derived in different phases of a cycle are identical.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Smallest price increment, also the distance kept from the 0/1 bounds.
pub const MIN_TICK: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Smallest order size the venue accepts.
pub const MIN_SIZE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Maximum fractional digits for prices and sizes.
pub const MAX_DECIMALS: u32 = 2;

/// Clamp to `[MIN_TICK, 1 - MIN_TICK]` and round to `MAX_DECIMALS`.
#[inline]
pub fn round_price(value: Decimal) -> Price {
    let clamped = value.max(MIN_TICK).min(Decimal::ONE - MIN_TICK);
    Price(clamped.round_dp_with_strategy(MAX_DECIMALS, RoundingStrategy::MidpointNearestEven))
}

/// Round a size down to `MAX_DECIMALS`.
///
/// Rounding toward zero keeps a size within the balance or collateral
/// bound it was derived from.
#[inline]
pub fn round_size(value: Decimal) -> Size {
    Size(value.round_dp_with_strategy(MAX_DECIMALS, RoundingStrategy::ToZero))
}

/// Price with exact decimal precision.
///
/// For outcome tokens a price lives in the open interval (0, 1).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Validate that `value` is a usable outcome-token price in (0, 1).
    pub fn try_probability(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO || value >= Decimal::ONE {
            return Err(CoreError::InvalidPrice(format!(
                "{value} is outside the open interval (0, 1)"
            )));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    /// Price of the complementary token: `1 - self`, rounded to `MAX_DECIMALS`.
    ///
    /// Not clamped, so a raw order price maps back exactly.
    #[inline]
    pub fn complement(&self) -> Self {
        Self(
            (Decimal::ONE - self.0)
                .round_dp_with_strategy(MAX_DECIMALS, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Absolute distance to another price.
    #[inline]
    pub fn distance(&self, other: Price) -> Decimal {
        (self.0 - other.0).abs()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size/quantity of outcome tokens with exact decimal precision.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Size(pub Decimal);

impl Size {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Calculate notional value in collateral: size * price.
    #[inline]
    pub fn notional(&self, price: Price) -> Decimal {
        self.0 * price.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
