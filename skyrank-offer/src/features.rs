use serde::{Deserialize, Serialize};
use skyrank_core::time::{departure_convenience_score, departure_hour};
use skyrank_core::FlightOffer;

/// Per-offer metrics the scoring engine works from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightMetadata {
    // Duration features
    pub total_duration_minutes: u32,
    pub stop_count: u32,

    // Price features
    pub price: f64,
    pub price_per_hour: f64,

    // Temporal features
    pub departure_hour: Option<u32>,
    pub departure_convenience: u8,

    pub bookable_seats: Option<u32>,
}

impl FlightMetadata {
    pub fn extract(offer: &FlightOffer) -> Self {
        // 1. Duration and stops across every itinerary
        let total_duration_minutes = offer
            .itineraries
            .iter()
            .map(|i| i.duration_minutes())
            .fold(0u32, u32::saturating_add);
        let stop_count = offer.itineraries.iter().map(|i| i.stop_count()).sum();

        // 2. Price; zero duration leaves price-per-hour undefined (0.0)
        let price = offer.total_price();
        let price_per_hour = if total_duration_minutes > 0 {
            price / (total_duration_minutes as f64 / 60.0)
        } else {
            0.0
        };

        // 3. Departure time of the very first segment
        let departure_at = offer.first_segment().map(|s| s.departure.at.as_str()).unwrap_or("");

        Self {
            total_duration_minutes,
            stop_count,
            price,
            price_per_hour,
            departure_hour: departure_hour(departure_at),
            departure_convenience: departure_convenience_score(departure_at),
            bookable_seats: offer.number_of_bookable_seats,
        }
    }
}
