use crate::data_sync::Quote;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString, VariantNames};

const PPM_PER_UNIT: u32 = 1_000_000;

#[derive(Copy, Clone, Debug, Display, PartialEq, Hash, Eq, EnumString, VariantNames, Default, Deserialize, Serialize, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VenueClass {
    #[default]
    Unknown,
    ConstantProduct,
    ConcentratedLiquidity,
    WeightedVault,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    #[error("token {0} is not traded on this venue")]
    UnknownToken(String),
    #[error("token_in and token_out must be different, got {0}")]
    SameToken(String),
    #[error("amount_in must be positive and finite, got {0}")]
    NonPositiveAmount(f64),
    #[error("venue has an empty reserve for {0}")]
    EmptyReserves(String),
    #[error("invalid venue state: {0}")]
    InvalidState(String),
}

/// A quote provider for one pool of one venue family.
///
/// Implementations only do the pricing math over state they already hold; fetching that
/// state from a chain or an API is the caller's job.
#[typetag::serde(tag = "type")]
pub trait Venue: Sync + Send {
    fn get_class(&self) -> VenueClass {
        VenueClass::Unknown
    }

    /// Venue label written into every quote, e.g. "sushiswap"
    fn get_name(&self) -> String;

    fn get_pool_address(&self) -> Option<String>;

    fn get_tokens(&self) -> Vec<String>;

    /// Every ordered pair this venue can quote
    fn get_swap_directions(&self) -> Vec<(String, String)> {
        let tokens = self.get_tokens();
        let mut directions = Vec::with_capacity(tokens.len() * tokens.len().saturating_sub(1));
        for token_in in &tokens {
            for token_out in &tokens {
                if token_in != token_out {
                    directions.push((token_in.clone(), token_out.clone()));
                }
            }
        }
        directions
    }

    /// Swap fee in parts per million (3000 = 0.30%)
    fn get_fee_ppm(&self) -> u32;

    /// Depth metric reported as `Quote::liquidity`
    fn get_liquidity(&self) -> f64;

    fn calculate_out_amount(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<f64, QuoteError>;

    fn quote(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<Quote, QuoteError> {
        let amount_out = self.calculate_out_amount(token_in, token_out, amount_in)?;
        if !amount_out.is_finite() || amount_out <= 0.0 {
            return Err(QuoteError::InvalidState(format!("{} quoted amount_out {amount_out} for {token_in}->{token_out}", self.get_name())));
        }
        let quote = Quote::new(
            token_in.to_string(),
            token_out.to_string(),
            self.get_name(),
            amount_out / amount_in,
            amount_in,
            amount_out,
            self.get_liquidity(),
        );
        Ok(match self.get_pool_address() {
            Some(address) => quote.with_pool_address(address),
            None => quote,
        })
    }
}

/// Validate a swap request against the venue tokens and return the (in, out) token positions.
pub(crate) fn token_positions(tokens: &[&str], token_in: &str, token_out: &str, amount_in: f64) -> Result<(usize, usize), QuoteError> {
    if token_in == token_out {
        return Err(QuoteError::SameToken(token_in.to_string()));
    }
    if !amount_in.is_finite() || amount_in <= 0.0 {
        return Err(QuoteError::NonPositiveAmount(amount_in));
    }
    let position = |token: &str| tokens.iter().position(|t| *t == token).ok_or_else(|| QuoteError::UnknownToken(token.to_string()));
    Ok((position(token_in)?, position(token_out)?))
}

/// Share of the input left after a fee given in parts per million.
pub(crate) fn fee_multiplier(fee_ppm: u32) -> Result<f64, QuoteError> {
    if fee_ppm > PPM_PER_UNIT {
        return Err(QuoteError::InvalidState(format!("fee of {fee_ppm} ppm exceeds {PPM_PER_UNIT}")));
    }
    Ok(1.0 - f64::from(fee_ppm) / f64::from(PPM_PER_UNIT))
}

/// Constant product output with the fee applied to the input amount.
pub(crate) fn constant_product_out(amount_in: f64, reserve_in: f64, reserve_out: f64, fee_ppm: u32) -> Result<f64, QuoteError> {
    let amount_in_with_fee = amount_in * fee_multiplier(fee_ppm)?;
    Ok(amount_in_with_fee * reserve_out / (reserve_in + amount_in_with_fee))
}

pub struct VenueWrapper {
    pub venue: Arc<dyn Venue>,
}

impl VenueWrapper {
    pub fn new(venue: Arc<dyn Venue>) -> Self {
        VenueWrapper { venue }
    }

    pub fn from_boxed(venue: Box<dyn Venue>) -> Self {
        VenueWrapper { venue: Arc::from(venue) }
    }

    /// Identity used for equality and ordering: venue name plus pool address
    pub fn get_venue_id(&self) -> String {
        match self.get_pool_address() {
            Some(address) => format!("{}@{}", self.get_name(), address),
            None => self.get_name(),
        }
    }
}

impl PartialOrd for VenueWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for VenueWrapper {}

impl Ord for VenueWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get_venue_id().cmp(&other.get_venue_id())
    }
}

impl PartialEq for VenueWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.get_venue_id() == other.get_venue_id()
    }
}

impl Hash for VenueWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get_venue_id().hash(state)
    }
}

impl Display for VenueWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(fee={})@{}", self.get_class(), self.get_fee_ppm(), self.get_venue_id())
    }
}

impl Debug for VenueWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(fee={})@{:?}", self.get_class(), self.get_fee_ppm(), self.get_venue_id())
    }
}

impl Clone for VenueWrapper {
    fn clone(&self) -> Self {
        Self { venue: self.venue.clone() }
    }
}

impl Deref for VenueWrapper {
    type Target = dyn Venue;

    fn deref(&self) -> &Self::Target {
        self.venue.deref()
    }
}

impl<T: 'static + Venue + Clone> From<T> for VenueWrapper {
    fn from(venue: T) -> Self {
        Self { venue: Arc::new(venue) }
    }
}

impl Serialize for VenueWrapper {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.venue.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VenueWrapper {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let venue = Box::<dyn Venue>::deserialize(deserializer)?;
        Ok(VenueWrapper::from_boxed(venue))
    }
}
