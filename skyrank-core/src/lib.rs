pub mod models;
pub mod price;
pub mod time;
pub mod search;
pub mod app_config;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use models::{FlightEndpoint, FlightItinerary, FlightOffer, FlightSegment, Fee, Price};
pub use time::{departure_convenience_score, parse_interval_to_minutes, parse_local_timestamp};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
