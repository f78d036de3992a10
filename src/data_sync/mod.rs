//! Data layer: the uniform quote record and the sources that produce a scan's quote batch.
pub mod config;
pub mod quote;
pub mod source;

pub use config::{QuoteSourceConfigRoot, QuoteSourceConfigSection};
pub use quote::Quote;
pub use source::{QuoteSource, StaticQuoteSource, VenueQuoteSource};
