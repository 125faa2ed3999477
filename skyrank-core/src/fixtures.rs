//! Offer builders shared by the workspace test suites.

use crate::models::{FlightEndpoint, FlightItinerary, FlightOffer, FlightSegment, Price};
use crate::time::parse_local_timestamp;

pub fn segment(from: &str, to: &str, departs_at: &str, arrives_at: &str, carrier: &str) -> FlightSegment {
    FlightSegment {
        departure: FlightEndpoint { iata_code: from.to_string(), at: departs_at.to_string() },
        arrival: FlightEndpoint { iata_code: to.to_string(), at: arrives_at.to_string() },
        carrier_code: carrier.to_string(),
        operating_carrier_code: None,
        duration: None,
    }
}

/// Itinerary whose duration string spans first departure to last arrival
pub fn itinerary(segments: Vec<FlightSegment>) -> FlightItinerary {
    let minutes = match (
        segments.first().and_then(FlightSegment::departure_time),
        segments.last().and_then(FlightSegment::arrival_time),
    ) {
        (Some(dep), Some(arr)) => (arr - dep).num_minutes().max(0),
        _ => 0,
    };
    FlightItinerary {
        duration: format!("PT{}H{}M", minutes / 60, minutes % 60),
        segments,
    }
}

pub fn offer(id: &str, total: f64, legs: Vec<Vec<FlightSegment>>) -> FlightOffer {
    FlightOffer {
        id: id.to_string(),
        itineraries: legs.into_iter().map(itinerary).collect(),
        price: Price::new("USD", total),
        number_of_bookable_seats: None,
        validating_airline_codes: Vec::new(),
        last_ticketing_date: None,
    }
}

/// Direct one-way JFK -> LHR on 2025-06-15 departing at `departs` (HH:MM), `hours` long
pub fn outbound(id: &str, total: f64, carrier: &str, departs: &str, hours: u32) -> FlightOffer {
    let dep = format!("2025-06-15T{departs}:00");
    let arr = shift(&dep, hours);
    let mut o = offer(id, total, vec![vec![segment("JFK", "LHR", &dep, &arr, carrier)]]);
    o.validating_airline_codes = vec![carrier.to_string()];
    o
}

/// Direct one-way LHR -> JFK on 2025-06-22
pub fn inbound(id: &str, total: f64, carrier: &str, departs: &str, hours: u32) -> FlightOffer {
    let dep = format!("2025-06-22T{departs}:00");
    let arr = shift(&dep, hours);
    let mut o = offer(id, total, vec![vec![segment("LHR", "JFK", &dep, &arr, carrier)]]);
    o.validating_airline_codes = vec![carrier.to_string()];
    o
}

/// Direct JFK <-> LHR round-trip on one carrier
pub fn round_trip(id: &str, total: f64, carrier: &str) -> FlightOffer {
    let out = outbound(id, total, carrier, "08:00", 7);
    let back = inbound(id, total, carrier, "11:00", 8);
    let mut o = out.clone();
    o.itineraries.push(back.itineraries[0].clone());
    o
}

fn shift(timestamp: &str, hours: u32) -> String {
    parse_local_timestamp(timestamp)
        .map(|t| (t + chrono::Duration::hours(hours as i64)).format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
