use super::venue::{QuoteError, Venue, VenueClass, constant_product_out, token_positions};
use serde::{Deserialize, Serialize};

fn default_fee_ppm() -> u32 {
    3000
}

/// Uniswap-V2 style pool: `x * y = k` over the two reserves.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConstantProductVenue {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub token0: String,
    pub token1: String,
    pub reserve0: f64,
    pub reserve1: f64,
    #[serde(default = "default_fee_ppm")]
    pub fee_ppm: u32,
}

impl ConstantProductVenue {
    pub fn new<S: Into<String>>(name: S, token0: S, token1: S, reserve0: f64, reserve1: f64) -> Self {
        Self {
            name: name.into(),
            address: None,
            token0: token0.into(),
            token1: token1.into(),
            reserve0,
            reserve1,
            fee_ppm: default_fee_ppm(),
        }
    }

    pub fn with_fee_ppm(mut self, fee_ppm: u32) -> Self {
        self.fee_ppm = fee_ppm;
        self
    }

    pub fn with_pool_address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = Some(address.into());
        self
    }
}

#[typetag::serde]
impl Venue for ConstantProductVenue {
    fn get_class(&self) -> VenueClass {
        VenueClass::ConstantProduct
    }

    fn get_name(&self) -> String {
        self.name.clone()
    }

    fn get_pool_address(&self) -> Option<String> {
        self.address.clone()
    }

    fn get_tokens(&self) -> Vec<String> {
        vec![self.token0.clone(), self.token1.clone()]
    }

    fn get_fee_ppm(&self) -> u32 {
        self.fee_ppm
    }

    fn get_liquidity(&self) -> f64 {
        (self.reserve0 * self.reserve1).sqrt()
    }

    fn calculate_out_amount(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<f64, QuoteError> {
        let (index_in, _) = token_positions(&[&self.token0, &self.token1], token_in, token_out, amount_in)?;
        let (reserve_in, reserve_out) = if index_in == 0 { (self.reserve0, self.reserve1) } else { (self.reserve1, self.reserve0) };

        if reserve_in <= 0.0 || reserve_out <= 0.0 {
            return Err(QuoteError::EmptyReserves(self.name.clone()));
        }

        constant_product_out(amount_in, reserve_in, reserve_out, self.fee_ppm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_out_with_fee() -> eyre::Result<()> {
        let venue = ConstantProductVenue::new("uniswap_v2", "A", "B", 1_000.0, 2_000.0);

        // 10 * 0.997 * 2000 / (1000 + 9.97)
        let amount_out = venue.calculate_out_amount("A", "B", 10.0)?;
        assert!((amount_out - 19.743_160_7).abs() < 1e-6);

        let reverse = venue.calculate_out_amount("B", "A", 10.0)?;
        assert!((reverse - 4.960_273_0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_zero_fee_matches_spot_for_small_amounts() -> eyre::Result<()> {
        let venue = ConstantProductVenue::new("uniswap_v2", "A", "B", 1e12, 2e12).with_fee_ppm(0);
        let amount_out = venue.calculate_out_amount("A", "B", 1.0)?;
        assert!((amount_out - 2.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_empty_reserves() {
        let venue = ConstantProductVenue::new("dead_pool", "A", "B", 0.0, 2_000.0);
        assert_eq!(
            venue.calculate_out_amount("A", "B", 1.0),
            Err(QuoteError::EmptyReserves("dead_pool".to_string()))
        );
    }

    #[test]
    fn test_quote_record() -> eyre::Result<()> {
        let venue = ConstantProductVenue::new("sushiswap", "WETH", "USDC", 100.0, 300_000.0).with_pool_address("0xabc");
        let quote = venue.quote("WETH", "USDC", 0.5)?;

        assert_eq!(quote.dex, "sushiswap");
        assert_eq!(quote.pool_address.as_deref(), Some("0xabc"));
        assert_eq!(quote.amount_in, 0.5);
        assert!((quote.price - quote.amount_out / 0.5).abs() < 1e-12);
        assert!((quote.liquidity - (100.0f64 * 300_000.0).sqrt()).abs() < 1e-9);
        Ok(())
    }
}
