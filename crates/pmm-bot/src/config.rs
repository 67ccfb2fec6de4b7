//! Application configuration.

use crate::error::{AppError, AppResult};
use pmm_mm::{SafeSpreadConfig, StrategyConfigDocument};
use std::path::Path;

/// Application configuration.
///
/// The file holds the strategy keys either under a `[safe_spread]` table or
/// at the top level, in snake_case or camelCase.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub strategy: SafeSpreadConfig,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let document: StrategyConfigDocument = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;

        let strategy = document.into_config();
        strategy.validate()?;
        Ok(Self { strategy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nested_config() {
        let config = AppConfig::from_toml_str(
            r#"
[safe_spread]
target_spread = 0.05
maxBids = 3
"#,
        )
        .unwrap();
        assert_eq!(config.strategy.target_spread, dec!(0.05));
        assert_eq!(config.strategy.max_bids, 3);
        assert_eq!(config.strategy.order_size, dec!(10));
    }

    #[test]
    fn test_flat_config() {
        let config = AppConfig::from_toml_str("orderSize = 20\nmax_asks = 1").unwrap();
        assert_eq!(config.strategy.order_size, dec!(20));
        assert_eq!(config.strategy.max_asks, 1);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.strategy, SafeSpreadConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = AppConfig::from_toml_str("order_size = 0").unwrap_err();
        assert!(matches!(err, AppError::Core(_)));

        let err = AppConfig::from_toml_str("order_size = \"ten\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_bad_nested_value_rejected() {
        let err = AppConfig::from_toml_str("[safe_spread]\norder_size = \"ten\"\nmax_bids = 7")
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = AppConfig::from_toml_str("[safe_spread]\nmax_asks = 2.5").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/nonexistent/pmm.toml").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
