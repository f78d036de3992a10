use super::venue::{QuoteError, Venue, VenueClass, constant_product_out, token_positions};
use serde::{Deserialize, Serialize};

fn default_fee_ppm() -> u32 {
    3000
}

/// Uniswap-V3 style pool priced inside its current active range.
///
/// The active liquidity `L` and `sqrt_price` (sqrt of token1 per token0) define the virtual
/// reserves `x = L / sqrt_price` and `y = L * sqrt_price`. Swaps that would cross a tick are
/// not modelled; quotes are only meaningful for amounts small relative to `L`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConcentratedLiquidityVenue {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub token0: String,
    pub token1: String,
    pub liquidity: f64,
    pub sqrt_price: f64,
    #[serde(default = "default_fee_ppm")]
    pub fee_ppm: u32,
}

impl ConcentratedLiquidityVenue {
    pub fn new<S: Into<String>>(name: S, token0: S, token1: S, liquidity: f64, sqrt_price: f64) -> Self {
        Self {
            name: name.into(),
            address: None,
            token0: token0.into(),
            token1: token1.into(),
            liquidity,
            sqrt_price,
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

    /// Virtual (token0, token1) reserves of the active range
    pub fn virtual_reserves(&self) -> (f64, f64) {
        (self.liquidity / self.sqrt_price, self.liquidity * self.sqrt_price)
    }
}

#[typetag::serde]
impl Venue for ConcentratedLiquidityVenue {
    fn get_class(&self) -> VenueClass {
        VenueClass::ConcentratedLiquidity
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
        self.liquidity
    }

    fn calculate_out_amount(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<f64, QuoteError> {
        let (index_in, _) = token_positions(&[&self.token0, &self.token1], token_in, token_out, amount_in)?;

        if !self.sqrt_price.is_finite() || self.sqrt_price <= 0.0 {
            return Err(QuoteError::InvalidState(format!("sqrt_price must be positive, got {}", self.sqrt_price)));
        }
        if self.liquidity <= 0.0 {
            return Err(QuoteError::EmptyReserves(self.name.clone()));
        }

        let (reserve0, reserve1) = self.virtual_reserves();
        let (reserve_in, reserve_out) = if index_in == 0 { (reserve0, reserve1) } else { (reserve1, reserve0) };

        constant_product_out(amount_in, reserve_in, reserve_out, self.fee_ppm)
    }
}
