// Data layer: quotes, quote sources and venue pricing
pub mod data_sync;
pub mod venues;
// Logic layer: graph, cycle search, validation, routing
pub mod logic;

pub mod config;
pub mod constants;
pub mod utils;

pub use config::{RouterConfig, RouterConfigError};
pub use data_sync::{Quote, QuoteSource, QuoteSourceConfigSection, StaticQuoteSource, VenueQuoteSource};
pub use logic::{
    CycleFinder, CycleValidator, LiquidityGraph, MultiHopRouter, MultiHopRouterBuilder, Priority, RouteHash, RouteHop, ScanReport,
    TriangularOpportunity, ValidationFailure,
};
pub use utils::{ConfigLoader, ConfigLoaderSync, LoadConfigError};
pub use venues::{ConcentratedLiquidityVenue, ConstantProductVenue, MockVenue, QuoteError, Venue, VenueClass, VenueWrapper, WeightedVaultVenue};
