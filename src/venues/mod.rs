pub mod concentrated;
pub mod constant_product;
pub mod mock_venue;
pub mod venue;
pub mod weighted_vault;

pub use concentrated::ConcentratedLiquidityVenue;
pub use constant_product::ConstantProductVenue;
pub use mock_venue::MockVenue;
pub use venue::{QuoteError, Venue, VenueClass, VenueWrapper};
pub use weighted_vault::WeightedVaultVenue;
