use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A priced exchange-rate observation for one ordered token pair on one venue.
///
/// `price` is the amount of `token_out` received per unit of `token_in`, with the
/// venue fee already applied by whoever produced the quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub token_in: String,
    pub token_out: String,
    /// Venue label, e.g. "uniswap_v3" or "sushiswap"
    pub dex: String,
    pub price: f64,
    pub amount_in: f64,
    pub amount_out: f64,
    /// Venue depth metric, used only for the confidence score
    pub liquidity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_address: Option<String>,
}

impl Quote {
    pub fn new<S: Into<String>>(
        token_in: S,
        token_out: S,
        dex: S,
        price: f64,
        amount_in: f64,
        amount_out: f64,
        liquidity: f64,
    ) -> Self {
        Self {
            token_in: token_in.into(),
            token_out: token_out.into(),
            dex: dex.into(),
            price,
            amount_in,
            amount_out,
            liquidity,
            pool_address: None,
        }
    }

    /// Quote for one unit in, where `amount_out == price`. Mostly used by tests and fixtures.
    pub fn unit<S: Into<String>>(token_in: S, token_out: S, dex: S, price: f64, liquidity: f64) -> Self {
        Self::new(token_in, token_out, dex, price, 1.0, price, liquidity)
    }

    pub fn with_pool_address<S: Into<String>>(mut self, pool_address: S) -> Self {
        self.pool_address = Some(pool_address.into());
        self
    }

    /// Ordered pair key used by the liquidity graph
    pub fn pair(&self) -> (&str, &str) {
        (&self.token_in, &self.token_out)
    }

    /// Effective rate derived from the quoted amounts. Infinite when nothing was sent in.
    pub fn effective_rate(&self) -> f64 {
        if self.amount_in > 0.0 { self.amount_out / self.amount_in } else { f64::INFINITY }
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}@{}({:.8})", self.token_in, self.token_out, self.dex, self.price)
    }
}
