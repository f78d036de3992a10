use super::VenueQuoteSource;
use crate::utils::config_loader::{ConfigLoader, ConfigLoaderSync, LoadConfigError, load_from_file, load_from_file_sync};
use crate::venues::VenueWrapper;
use async_trait::async_trait;
use serde::Deserialize;

fn default_probe_amount_in() -> f64 {
    1.0
}

#[derive(Deserialize)]
pub struct QuoteSourceConfigRoot {
    pub quote_source: QuoteSourceConfigSection,
}

/// `[quote_source]` section: the venue set quoted by [`VenueQuoteSource`].
///
/// ```toml
/// [quote_source]
/// probe_amount_in = 1.0
///
/// [[quote_source.venues]]
/// type = "ConstantProductVenue"
/// name = "sushiswap"
/// token0 = "WETH"
/// token1 = "USDC"
/// reserve0 = 1000.0
/// reserve1 = 3000000.0
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteSourceConfigSection {
    #[serde(default = "default_probe_amount_in")]
    pub probe_amount_in: f64,
    #[serde(default)]
    pub venues: Vec<VenueWrapper>,
}

impl QuoteSourceConfigSection {
    pub fn validate(&self) -> Result<(), LoadConfigError> {
        if !self.probe_amount_in.is_finite() || self.probe_amount_in <= 0.0 {
            return Err(LoadConfigError::Invalid(format!("probe_amount_in must be positive, got {}", self.probe_amount_in)));
        }
        Ok(())
    }

    pub fn into_source(self) -> VenueQuoteSource {
        VenueQuoteSource::new(self.venues, self.probe_amount_in)
    }
}

#[async_trait]
impl ConfigLoader for QuoteSourceConfigSection {
    type SectionType = QuoteSourceConfigSection;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: QuoteSourceConfigRoot = load_from_file(file_name).await?;
        root.quote_source.validate()?;
        Ok(root.quote_source)
    }
}

impl ConfigLoaderSync for QuoteSourceConfigSection {
    type SectionType = QuoteSourceConfigSection;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: QuoteSourceConfigRoot = load_from_file_sync(file_name)?;
        root.quote_source.validate()?;
        Ok(root.quote_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config_loader::load_from_str;
    use crate::venues::VenueClass;

    const VENUES_TOML: &str = r#"
[quote_source]
probe_amount_in = 2.0

[[quote_source.venues]]
type = "ConstantProductVenue"
name = "sushiswap"
address = "0x905dfcd5649217c42684f23958568e533c711aa3"
token0 = "WETH"
token1 = "USDC"
reserve0 = 1000.0
reserve1 = 3000000.0

[[quote_source.venues]]
type = "ConcentratedLiquidityVenue"
name = "uniswap_v3"
token0 = "WETH"
token1 = "ARB"
liquidity = 1000000.0
sqrt_price = 44.72
fee_ppm = 500

[[quote_source.venues]]
type = "WeightedVaultVenue"
name = "balancer"
tokens = ["USDC", "ARB", "WETH"]
balances = [100000.0, 250000.0, 33.0]
weights = [0.4, 0.3, 0.3]
"#;

    #[test]
    fn test_parse_venue_set() -> eyre::Result<()> {
        let root: QuoteSourceConfigRoot = load_from_str(VENUES_TOML)?;
        let section = root.quote_source;
        section.validate()?;

        assert_eq!(section.probe_amount_in, 2.0);
        assert_eq!(section.venues.len(), 3);
        assert_eq!(section.venues[0].get_class(), VenueClass::ConstantProduct);
        assert_eq!(section.venues[0].get_fee_ppm(), 3000);
        assert_eq!(section.venues[1].get_class(), VenueClass::ConcentratedLiquidity);
        assert_eq!(section.venues[1].get_fee_ppm(), 500);
        assert_eq!(section.venues[2].get_class(), VenueClass::WeightedVault);
        assert_eq!(section.venues[2].get_swap_directions().len(), 6);
        Ok(())
    }

    #[test]
    fn test_into_source() -> eyre::Result<()> {
        let root: QuoteSourceConfigRoot = load_from_str(VENUES_TOML)?;
        let source = root.quote_source.into_source();

        assert_eq!(source.probe_amount_in(), 2.0);
        assert_eq!(source.collect_quotes().len(), 2 + 2 + 6);
        Ok(())
    }

    #[test]
    fn test_reject_bad_probe_amount() -> eyre::Result<()> {
        let root: QuoteSourceConfigRoot = load_from_str("[quote_source]\nprobe_amount_in = 0.0\n")?;
        assert!(matches!(root.quote_source.validate(), Err(LoadConfigError::Invalid(_))));
        Ok(())
    }

    #[test]
    fn test_reject_unknown_venue_type() {
        let result: Result<QuoteSourceConfigRoot, _> =
            load_from_str("[[quote_source.venues]]\ntype = \"OrderBookVenue\"\nname = \"x\"\n");
        assert!(result.is_err());
    }
}
