use super::Quote;
use crate::venues::VenueWrapper;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Produces the quote batch for one scan.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quotes(&self) -> eyre::Result<Vec<Quote>>;
}

/// A batch collected elsewhere, handed out unchanged on every fetch.
#[derive(Clone, Debug, Default)]
pub struct StaticQuoteSource {
    quotes: Vec<Quote>,
}

impl StaticQuoteSource {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl From<Vec<Quote>> for StaticQuoteSource {
    fn from(quotes: Vec<Quote>) -> Self {
        Self::new(quotes)
    }
}

#[async_trait]
impl QuoteSource for StaticQuoteSource {
    async fn fetch_quotes(&self) -> eyre::Result<Vec<Quote>> {
        Ok(self.quotes.clone())
    }
}

/// Quotes every swap direction of every venue at a fixed probe amount.
///
/// A venue that cannot quote a direction is skipped, never failing the whole batch.
#[derive(Clone, Debug)]
pub struct VenueQuoteSource {
    venues: Vec<VenueWrapper>,
    probe_amount_in: f64,
}

impl VenueQuoteSource {
    pub fn new(venues: Vec<VenueWrapper>, probe_amount_in: f64) -> Self {
        Self { venues, probe_amount_in }
    }

    pub fn venues(&self) -> &[VenueWrapper] {
        &self.venues
    }

    pub fn probe_amount_in(&self) -> f64 {
        self.probe_amount_in
    }

    /// Synchronous body of `fetch_quotes`, venues are already in memory.
    pub fn collect_quotes(&self) -> Vec<Quote> {
        let mut quotes = Vec::new();
        let mut skipped = 0usize;

        for venue in &self.venues {
            for (token_in, token_out) in venue.get_swap_directions() {
                match venue.quote(&token_in, &token_out, self.probe_amount_in) {
                    Ok(quote) => quotes.push(quote),
                    Err(error) => {
                        skipped += 1;
                        warn!(venue = %venue.get_venue_id(), %token_in, %token_out, %error, "Skipping venue direction");
                    }
                }
            }
        }

        debug!(venues = self.venues.len(), quotes = quotes.len(), skipped, "Collected venue quotes");
        quotes
    }
}

#[async_trait]
impl QuoteSource for VenueQuoteSource {
    async fn fetch_quotes(&self) -> eyre::Result<Vec<Quote>> {
        Ok(self.collect_quotes())
    }
}
