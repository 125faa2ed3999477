use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::price::normalize_price;
use crate::time::{parse_interval_to_minutes, parse_local_timestamp};

/// Airport and local wall-clock time at one end of a segment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub iata_code: String,
    /// Local time as supplied upstream, e.g. `2025-06-15T08:00:00`
    pub at: String,
}

/// One flown leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightSegment {
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    /// Marketing carrier
    pub carrier_code: String,
    #[serde(default)]
    pub operating_carrier_code: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl FlightSegment {
    pub fn departure_time(&self) -> Option<NaiveDateTime> {
        parse_local_timestamp(&self.departure.at)
    }

    pub fn arrival_time(&self) -> Option<NaiveDateTime> {
        parse_local_timestamp(&self.arrival.at)
    }
}

/// One direction of travel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightItinerary {
    #[serde(default)]
    pub duration: String,
    pub segments: Vec<FlightSegment>,
}

impl FlightItinerary {
    pub fn duration_minutes(&self) -> u32 {
        parse_interval_to_minutes(&self.duration)
    }

    pub fn stop_count(&self) -> u32 {
        self.segments.len().saturating_sub(1) as u32
    }

    pub fn first_segment(&self) -> Option<&FlightSegment> {
        self.segments.first()
    }

    pub fn last_segment(&self) -> Option<&FlightSegment> {
        self.segments.last()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    #[serde(deserialize_with = "normalize_price")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub fee_type: String,
}

/// Price record of an offer. Totals arrive either as numbers or numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: String,
    #[serde(deserialize_with = "normalize_price")]
    pub total: f64,
    #[serde(default, deserialize_with = "crate::price::normalize_optional_price")]
    pub base: Option<f64>,
    #[serde(default)]
    pub fees: Vec<Fee>,
}

impl Price {
    pub fn new(currency: impl Into<String>, total: f64) -> Self {
        Self {
            currency: currency.into(),
            total,
            base: None,
            fees: Vec::new(),
        }
    }
}

/// A bookable flight offer as delivered by the upstream search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    pub itineraries: Vec<FlightItinerary>,
    pub price: Price,
    #[serde(default)]
    pub number_of_bookable_seats: Option<u32>,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    #[serde(default)]
    pub last_ticketing_date: Option<NaiveDate>,
}

impl FlightOffer {
    pub fn total_price(&self) -> f64 {
        self.price.total
    }

    pub fn is_one_way(&self) -> bool {
        self.itineraries.len() == 1
    }

    pub fn outbound(&self) -> Option<&FlightItinerary> {
        self.itineraries.first()
    }

    pub fn inbound(&self) -> Option<&FlightItinerary> {
        self.itineraries.get(1)
    }

    pub fn first_segment(&self) -> Option<&FlightSegment> {
        self.outbound().and_then(FlightItinerary::first_segment)
    }

    pub fn last_segment(&self) -> Option<&FlightSegment> {
        self.itineraries.last().and_then(FlightItinerary::last_segment)
    }

    /// Validating airline, falling back to the first marketing carrier
    pub fn primary_airline(&self) -> Option<&str> {
        self.validating_airline_codes
            .first()
            .map(String::as_str)
            .or_else(|| self.first_segment().map(|s| s.carrier_code.as_str()))
    }

    /// Validating codes plus every marketing and operating carrier, deduplicated
    pub fn airline_codes(&self) -> BTreeSet<String> {
        let mut codes: BTreeSet<String> = self.validating_airline_codes.iter().cloned().collect();
        for segment in self.itineraries.iter().flat_map(|i| i.segments.iter()) {
            codes.insert(segment.carrier_code.clone());
            if let Some(ref operating) = segment.operating_carrier_code {
                codes.insert(operating.clone());
            }
        }
        codes
    }
}
