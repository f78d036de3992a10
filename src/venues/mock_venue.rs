use super::venue::{QuoteError, Venue, token_positions};
use serde::{Deserialize, Serialize};

/// Fixed-price venue for tests and demos. Quotes never move with size.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MockVenue {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub token0: String,
    pub token1: String,
    /// token1 received per token0
    pub price0to1: f64,
    /// token0 received per token1
    pub price1to0: f64,
    #[serde(default)]
    pub liquidity: f64,
}

impl MockVenue {
    pub fn new<S: Into<String>>(name: S, token0: S, token1: S, price0to1: f64, price1to0: f64) -> Self {
        Self { name: name.into(), address: None, token0: token0.into(), token1: token1.into(), price0to1, price1to0, liquidity: 0.0 }
    }

    pub fn with_liquidity(mut self, liquidity: f64) -> Self {
        self.liquidity = liquidity;
        self
    }

    pub fn with_pool_address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = Some(address.into());
        self
    }
}

#[typetag::serde]
impl Venue for MockVenue {
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
        0
    }

    fn get_liquidity(&self) -> f64 {
        self.liquidity
    }

    fn calculate_out_amount(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<f64, QuoteError> {
        let (index_in, _) = token_positions(&[&self.token0, &self.token1], token_in, token_out, amount_in)?;
        let price = if index_in == 0 { self.price0to1 } else { self.price1to0 };
        if !price.is_finite() || price <= 0.0 {
            return Err(QuoteError::InvalidState(format!("{} has no price for {token_in}->{token_out}", self.name)));
        }
        Ok(amount_in * price)
    }
}
