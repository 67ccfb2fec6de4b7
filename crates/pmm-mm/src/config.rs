//! Safe-spread quoting configuration.
//!
//! Every key is accepted in snake_case or camelCase. Both dialects are
//! folded into one typed struct at deserialization time.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use pmm_core::{CoreError, MIN_SIZE, MIN_TICK};

/// Safe-spread quoting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSpreadConfig {
    /// Full bid/ask spread in price units.
    #[serde(default = "default_target_spread", alias = "targetSpread")]
    pub target_spread: Decimal,

    /// Explicit half-spread. Takes precedence over `target_spread / 2`.
    #[serde(default, alias = "halfSpreadOverride")]
    pub half_spread_override: Option<Decimal>,

    /// Standard quote size in tokens.
    #[serde(default = "default_order_size", alias = "orderSize")]
    pub order_size: Decimal,

    /// Maximum resting bids per pair.
    #[serde(default = "default_max_quotes", alias = "maxBids")]
    pub max_bids: usize,

    /// Maximum resting asks per pair.
    #[serde(default = "default_max_quotes", alias = "maxAsks")]
    pub max_asks: usize,

    /// Cancel a resting quote whose price drifted further than this from target.
    #[serde(default = "default_cancel_if_away_by", alias = "cancelIfAwayBy")]
    pub cancel_if_away_by: Decimal,

    /// Holdings cap per outcome token.
    #[serde(
        default = "default_max_inventory_per_token",
        alias = "maxInventoryPerToken"
    )]
    pub max_inventory_per_token: Decimal,

    /// Collateral cap for a single bid.
    #[serde(default = "default_max_notional_per_side", alias = "maxNotionalPerSide")]
    pub max_notional_per_side: Decimal,

    /// Midpoint shift per unit held. Long inventory moves the mid down.
    #[serde(default = "default_skew_per_unit", alias = "skewPerUnit")]
    pub skew_per_unit: Decimal,

    /// Smallest size worth placing (never below the venue minimum).
    #[serde(default = "default_min_place_size", alias = "minPlaceSize")]
    pub min_place_size: Decimal,
}

impl Default for SafeSpreadConfig {
    fn default() -> Self {
        Self {
            target_spread: default_target_spread(),
            half_spread_override: None,
            order_size: default_order_size(),
            max_bids: default_max_quotes(),
            max_asks: default_max_quotes(),
            cancel_if_away_by: default_cancel_if_away_by(),
            max_inventory_per_token: default_max_inventory_per_token(),
            max_notional_per_side: default_max_notional_per_side(),
            skew_per_unit: default_skew_per_unit(),
            min_place_size: default_min_place_size(),
        }
    }
}

impl SafeSpreadConfig {
    /// Half-spread actually quoted, floored at one tick.
    pub fn half_spread(&self) -> Decimal {
        self.half_spread_override
            .unwrap_or(self.target_spread / Decimal::TWO)
            .max(MIN_TICK)
    }

    /// Minimum placeable size: `max(min_place_size, MIN_SIZE)`.
    pub fn min_placeable_size(&self) -> Decimal {
        self.min_place_size.max(MIN_SIZE)
    }

    /// Reject values that would make the quoting math meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.order_size <= Decimal::ZERO {
            return Err(CoreError::InvalidConfig(format!(
                "order_size must be positive, got {}",
                self.order_size
            )));
        }
        if self.max_notional_per_side <= Decimal::ZERO {
            return Err(CoreError::InvalidConfig(format!(
                "max_notional_per_side must be positive, got {}",
                self.max_notional_per_side
            )));
        }
        let non_negative = [
            ("target_spread", self.target_spread),
            ("cancel_if_away_by", self.cancel_if_away_by),
            ("max_inventory_per_token", self.max_inventory_per_token),
            ("skew_per_unit", self.skew_per_unit),
            ("min_place_size", self.min_place_size),
        ];
        for (name, value) in non_negative {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if let Some(half) = self.half_spread_override {
            if half <= Decimal::ZERO {
                return Err(CoreError::InvalidConfig(format!(
                    "half_spread_override must be positive, got {half}"
                )));
            }
        }
        Ok(())
    }
}

/// A strategy config table, either nested under `safe_spread` or flat.
///
/// When the nested table is present its values are used. A bad value for
/// a strategy key is an error and never falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyConfigDocument {
    Nested { safe_spread: SafeSpreadConfig },
    Flat(SafeSpreadConfig),
}

#[derive(Deserialize)]
struct RawStrategyDocument {
    #[serde(default, alias = "safeSpread")]
    safe_spread: Option<SafeSpreadConfig>,
    #[serde(flatten)]
    flat: SafeSpreadConfig,
}

impl<'de> Deserialize<'de> for StrategyConfigDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStrategyDocument::deserialize(deserializer)?;
        Ok(match raw.safe_spread {
            Some(safe_spread) => Self::Nested { safe_spread },
            None => Self::Flat(raw.flat),
        })
    }
}

impl StrategyConfigDocument {
    pub fn into_config(self) -> SafeSpreadConfig {
        match self {
            Self::Nested { safe_spread } => safe_spread,
            Self::Flat(config) => config,
        }
    }
}

fn default_target_spread() -> Decimal {
    Decimal::new(3, 2) // 0.03
}
fn default_order_size() -> Decimal {
    Decimal::new(10, 0)
}
fn default_max_quotes() -> usize {
    2
}
fn default_cancel_if_away_by() -> Decimal {
    Decimal::new(2, 2) // 0.02
}
fn default_max_inventory_per_token() -> Decimal {
    Decimal::new(40, 0)
}
fn default_max_notional_per_side() -> Decimal {
    Decimal::new(120, 0)
}
fn default_skew_per_unit() -> Decimal {
    Decimal::new(5, 4) // 0.0005
}
fn default_min_place_size() -> Decimal {
    Decimal::new(1, 1) // 0.1
}
