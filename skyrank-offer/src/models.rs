use serde::{Deserialize, Serialize};
use skyrank_core::FlightOffer;
use std::fmt;

use crate::features::FlightMetadata;

/// Composite scores, each an integer in 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightScores {
    pub best: u8,
    pub cheapest: u8,
    pub fastest: u8,
    pub overall: u8,
}

/// Normalized per-axis sub-scores, each an integer in 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub price: u8,
    pub duration: u8,
    pub stops: u8,
    pub convenience: u8,
    pub seats: u8,
}

/// Descriptive labels attached to a ranked offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    BestValue,
    LowestPrice,
    FastestFlight,
    DirectFlight,
    ConvenientTime,
    HighAvailability,
    FewSeatsLeft { seats: u32 },
    TopPick,
    GreatValuePerHour,
    PremiumAirline,
    EarlyDeparture,
    RedEyeFlight,
}

impl Badge {
    pub fn label(&self) -> String {
        match self {
            Badge::BestValue => "Best Value".to_string(),
            Badge::LowestPrice => "Lowest Price".to_string(),
            Badge::FastestFlight => "Fastest Flight".to_string(),
            Badge::DirectFlight => "Direct Flight".to_string(),
            Badge::ConvenientTime => "Convenient Time".to_string(),
            Badge::HighAvailability => "High Availability".to_string(),
            Badge::FewSeatsLeft { seats: 1 } => "Only 1 Seat Left".to_string(),
            Badge::FewSeatsLeft { seats } => format!("Only {} Seats Left", seats),
            Badge::TopPick => "Top Pick".to_string(),
            Badge::GreatValuePerHour => "Great Value/Hour".to_string(),
            Badge::PremiumAirline => "Premium Airline".to_string(),
            Badge::EarlyDeparture => "Early Departure".to_string(),
            Badge::RedEyeFlight => "Red-Eye Flight".to_string(),
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// An offer with its scores, badges and derived metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredFlight {
    pub offer: FlightOffer,
    pub scores: FlightScores,
    pub sub_scores: SubScores,
    pub badges: Vec<Badge>,
    pub metadata: FlightMetadata,
}

impl ScoredFlight {
    pub fn has_badge(&self, badge: &Badge) -> bool {
        self.badges.contains(badge)
    }

    pub fn badge_labels(&self) -> Vec<String> {
        self.badges.iter().map(Badge::label).collect()
    }
}
