use super::venue::{QuoteError, Venue, VenueClass, fee_multiplier, token_positions};
use serde::{Deserialize, Serialize};

fn default_swap_fee_ppm() -> u32 {
    3000
}

/// Balancer style weighted pool held in a vault. Any token of the pool can be swapped
/// for any other.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeightedVaultVenue {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub tokens: Vec<String>,
    pub balances: Vec<f64>,
    pub weights: Vec<f64>,
    #[serde(default = "default_swap_fee_ppm")]
    pub swap_fee_ppm: u32,
}

impl WeightedVaultVenue {
    pub fn new<S: Into<String>>(name: S, tokens: Vec<S>, balances: Vec<f64>, weights: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            address: None,
            tokens: tokens.into_iter().map(Into::into).collect(),
            balances,
            weights,
            swap_fee_ppm: default_swap_fee_ppm(),
        }
    }

    pub fn with_swap_fee_ppm(mut self, swap_fee_ppm: u32) -> Self {
        self.swap_fee_ppm = swap_fee_ppm;
        self
    }

    pub fn with_pool_address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = Some(address.into());
        self
    }

    fn check_state(&self) -> Result<(), QuoteError> {
        if self.tokens.len() < 2 || self.tokens.len() != self.balances.len() || self.tokens.len() != self.weights.len() {
            return Err(QuoteError::InvalidState(format!(
                "tokens/balances/weights length mismatch: {}/{}/{}",
                self.tokens.len(),
                self.balances.len(),
                self.weights.len()
            )));
        }
        if self.weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(QuoteError::InvalidState("weights must be positive".to_string()));
        }
        Ok(())
    }
}

#[typetag::serde]
impl Venue for WeightedVaultVenue {
    fn get_class(&self) -> VenueClass {
        VenueClass::WeightedVault
    }

    fn get_name(&self) -> String {
        self.name.clone()
    }

    fn get_pool_address(&self) -> Option<String> {
        self.address.clone()
    }

    fn get_tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn get_fee_ppm(&self) -> u32 {
        self.swap_fee_ppm
    }

    fn get_liquidity(&self) -> f64 {
        if self.balances.is_empty() || self.balances.iter().any(|b| *b <= 0.0) {
            return 0.0;
        }
        let mean_log = self.balances.iter().map(|b| b.ln()).sum::<f64>() / self.balances.len() as f64;
        mean_log.exp()
    }

    fn calculate_out_amount(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<f64, QuoteError> {
        self.check_state()?;
        let tokens: Vec<&str> = self.tokens.iter().map(String::as_str).collect();
        let (index_in, index_out) = token_positions(&tokens, token_in, token_out, amount_in)?;

        let balance_in = self.balances[index_in];
        let balance_out = self.balances[index_out];
        if balance_in <= 0.0 || balance_out <= 0.0 {
            return Err(QuoteError::EmptyReserves(self.name.clone()));
        }

        let amount_in_with_fee = amount_in * fee_multiplier(self.swap_fee_ppm)?;
        let base = balance_in / (balance_in + amount_in_with_fee);
        let exponent = self.weights[index_in] / self.weights[index_out];

        Ok(balance_out * (1.0 - base.powf(exponent)))
    }
}
