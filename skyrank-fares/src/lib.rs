pub mod models;
pub mod warnings;
pub mod combiner;
pub mod ranking;
pub mod analysis;
pub mod search;

use skyrank_core::CoreError;

pub use analysis::{analyze_round_trip_pricing, MixedCarrierAnalysis};
pub use combiner::{combine_mixed_carrier_fares, FareCombiner};
pub use models::{BadgedFareOption, CombinedPrice, FareOption, MixedCarrierFare, PriceBadge, Savings, WarningCode};
pub use ranking::{add_cheapest_badges, merge_and_sort_by_price, rank_mixed_fares};
pub use search::{
    should_search_mixed_carriers, CachedOneWay, MixedCarrierSearch, OneWaySearchClient, SearchDecision,
    SmartMixedCarrierResult,
};

#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("Invalid search: {0}")]
    InvalidSearch(#[from] CoreError),
}
