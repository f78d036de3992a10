use crate::constants::*;
use crate::utils::config_loader::{ConfigLoader, ConfigLoaderSync, LoadConfigError, load_from_file, load_from_file_sync};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterConfigError {
    #[error("min_hops must be at least 1")]
    ZeroMinHops,
    #[error("max_hops ({max_hops}) must not be below min_hops ({min_hops})")]
    HopRange { min_hops: u8, max_hops: u8 },
    #[error("top_k must be at least 1")]
    ZeroTopK,
    #[error("max_start_tokens must be at least 1")]
    ZeroStartTokens,
    #[error("{field} must be finite and not negative, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("liquidity_reference_depth must be positive, got {0}")]
    InvalidReferenceDepth(f64),
}

impl From<RouterConfigError> for LoadConfigError {
    fn from(error: RouterConfigError) -> Self {
        LoadConfigError::Invalid(error.to_string())
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct RouterConfigRoot {
    pub router: RouterConfig,
}

/// `[router]` section. Every field is optional in TOML and falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Fewest hops per cycle
    pub min_hops: u8,
    /// Most hops per cycle
    pub max_hops: u8,
    /// Net profit an opportunity must exceed to be reported
    pub min_profit_usd: f64,
    pub gas_units_per_hop: u64,
    pub gas_price_gwei: f64,
    pub native_token_price_usd: f64,
    pub liquidity_reference_depth: f64,
    pub priority_tokens: Vec<String>,
    pub max_start_tokens: usize,
    pub top_k: usize,
    pub slippage_estimate_pct: f64,
    pub execution_time_per_hop_ms: u64,
    /// Search start tokens on the rayon pool
    pub parallel_search: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            min_hops: DEFAULT_MIN_HOPS,
            max_hops: DEFAULT_MAX_HOPS,
            min_profit_usd: DEFAULT_MIN_PROFIT_USD,
            gas_units_per_hop: DEFAULT_GAS_UNITS_PER_HOP,
            gas_price_gwei: DEFAULT_GAS_PRICE_GWEI,
            native_token_price_usd: DEFAULT_NATIVE_TOKEN_PRICE_USD,
            liquidity_reference_depth: DEFAULT_LIQUIDITY_REFERENCE_DEPTH,
            priority_tokens: DEFAULT_PRIORITY_TOKENS.iter().map(|token| token.to_string()).collect(),
            max_start_tokens: DEFAULT_MAX_START_TOKENS,
            top_k: DEFAULT_TOP_K,
            slippage_estimate_pct: DEFAULT_SLIPPAGE_ESTIMATE_PCT,
            execution_time_per_hop_ms: DEFAULT_EXECUTION_TIME_PER_HOP_MS,
            parallel_search: false,
        }
    }
}

impl RouterConfig {
    pub fn with_hops(self, min_hops: u8, max_hops: u8) -> Self {
        Self { min_hops, max_hops, ..self }
    }

    pub fn with_min_profit_usd(self, min_profit_usd: f64) -> Self {
        Self { min_profit_usd, ..self }
    }

    pub fn with_top_k(self, top_k: usize) -> Self {
        Self { top_k, ..self }
    }

    pub fn with_parallel_search(self, parallel_search: bool) -> Self {
        Self { parallel_search, ..self }
    }

    pub fn validate(&self) -> Result<(), RouterConfigError> {
        if self.min_hops == 0 {
            return Err(RouterConfigError::ZeroMinHops);
        }
        if self.max_hops < self.min_hops {
            return Err(RouterConfigError::HopRange { min_hops: self.min_hops, max_hops: self.max_hops });
        }
        if self.top_k == 0 {
            return Err(RouterConfigError::ZeroTopK);
        }
        if self.max_start_tokens == 0 {
            return Err(RouterConfigError::ZeroStartTokens);
        }

        let amounts = [
            ("min_profit_usd", self.min_profit_usd),
            ("gas_price_gwei", self.gas_price_gwei),
            ("native_token_price_usd", self.native_token_price_usd),
            ("slippage_estimate_pct", self.slippage_estimate_pct),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(RouterConfigError::InvalidAmount { field, value });
            }
        }

        if !self.liquidity_reference_depth.is_finite() || self.liquidity_reference_depth <= 0.0 {
            return Err(RouterConfigError::InvalidReferenceDepth(self.liquidity_reference_depth));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigLoader for RouterConfig {
    type SectionType = RouterConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: RouterConfigRoot = load_from_file(file_name).await?;
        root.router.validate()?;
        Ok(root.router)
    }
}

impl ConfigLoaderSync for RouterConfig {
    type SectionType = RouterConfig;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: RouterConfigRoot = load_from_file_sync(file_name)?;
        root.router.validate()?;
        Ok(root.router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config_loader::load_from_str;
    use std::path::PathBuf;

    fn write_temp_config(name: &str, contents: &str) -> eyre::Result<String> {
        let path: PathBuf = std::env::temp_dir().join(format!("multihop_router_{}_{}.toml", name, std::process::id()));
        std::fs::write(&path, contents)?;
        Ok(path.to_string_lossy().to_string())
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = RouterConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.min_hops, 2);
        assert_eq!(config.max_hops, 4);
        assert_eq!(config.priority_tokens, vec!["USDC", "USDT", "WETH", "DAI", "USDC.e"]);
        assert_eq!(config.top_k, 50);
        assert!(!config.parallel_search);
    }

    #[test]
    fn test_validate() {
        assert_eq!(RouterConfig::default().with_hops(0, 3).validate(), Err(RouterConfigError::ZeroMinHops));
        assert_eq!(
            RouterConfig::default().with_hops(4, 3).validate(),
            Err(RouterConfigError::HopRange { min_hops: 4, max_hops: 3 })
        );
        assert_eq!(RouterConfig::default().with_top_k(0).validate(), Err(RouterConfigError::ZeroTopK));
        assert_eq!(
            RouterConfig { max_start_tokens: 0, ..RouterConfig::default() }.validate(),
            Err(RouterConfigError::ZeroStartTokens)
        );
        assert!(matches!(
            RouterConfig { gas_price_gwei: f64::NAN, ..RouterConfig::default() }.validate(),
            Err(RouterConfigError::InvalidAmount { field: "gas_price_gwei", .. })
        ));
        assert!(matches!(
            RouterConfig::default().with_min_profit_usd(-1.0).validate(),
            Err(RouterConfigError::InvalidAmount { field: "min_profit_usd", .. })
        ));
        assert_eq!(
            RouterConfig { liquidity_reference_depth: 0.0, ..RouterConfig::default() }.validate(),
            Err(RouterConfigError::InvalidReferenceDepth(0.0))
        );
    }

    #[test]
    fn test_partial_section_uses_defaults() -> eyre::Result<()> {
        let root: RouterConfigRoot = load_from_str("[router]\nmax_hops = 3\nparallel_search = true\n")?;
        assert_eq!(root.router, RouterConfig::default().with_hops(2, 3).with_parallel_search(true));
        Ok(())
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<RouterConfigRoot, _> = load_from_str("[router]\nmax_hopz = 3\n");
        assert!(matches!(result, Err(LoadConfigError::Toml(_))));
    }

    #[test]
    fn test_load_section_sync() -> eyre::Result<()> {
        let file = write_temp_config("sync", "[router]\nmin_profit_usd = 0.25\npriority_tokens = [\"WETH\"]\n")?;
        let config = RouterConfig::load_section_from_file_sync(file)?;

        assert_eq!(config.min_profit_usd, 0.25);
        assert_eq!(config.priority_tokens, vec!["WETH"]);
        Ok(())
    }

    #[test]
    fn test_load_section_rejects_invalid() -> eyre::Result<()> {
        let file = write_temp_config("invalid", "[router]\nmin_hops = 3\nmax_hops = 2\n")?;
        let result = RouterConfig::load_section_from_file_sync(file);

        assert!(matches!(result, Err(LoadConfigError::Invalid(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_section_async() -> eyre::Result<()> {
        let file = write_temp_config("async", "[router]\ntop_k = 5\n")?;
        let config = RouterConfig::load_section_from_file(file).await?;

        assert_eq!(config.top_k, 5);
        Ok(())
    }
}
