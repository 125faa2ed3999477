use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use skyrank_core::FlightOffer;
use std::cmp::Ordering;

use crate::models::ScoredFlight;
use crate::ranker::{score_flights, RankingError};

/// Orderings offered on a result page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Highest `best` composite first
    #[default]
    Best,
    /// Lowest price first
    Cheapest,
    /// Highest `fastest` composite first
    Fastest,
    /// Highest `overall` composite first
    Overall,
    /// Earliest departure first
    Departure,
    /// Earliest final arrival first
    Arrival,
    /// Shortest total duration first
    Duration,
}

fn departure_time(s: &ScoredFlight) -> Option<NaiveDateTime> {
    s.offer.first_segment().and_then(|seg| seg.departure_time())
}

fn arrival_time(s: &ScoredFlight) -> Option<NaiveDateTime> {
    s.offer.outbound().and_then(|i| i.last_segment()).and_then(|seg| seg.arrival_time())
}

/// Unknown times sort last
fn earliest_first(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort; equal keys keep their input order
pub fn sort_scored_flights(flights: &mut [ScoredFlight], option: SortOption) {
    flights.sort_by(|a, b| match option {
        SortOption::Best => b.scores.best.cmp(&a.scores.best),
        SortOption::Cheapest => a
            .metadata
            .price
            .partial_cmp(&b.metadata.price)
            .unwrap_or(Ordering::Equal),
        SortOption::Fastest => b.scores.fastest.cmp(&a.scores.fastest),
        SortOption::Overall => b.scores.overall.cmp(&a.scores.overall),
        SortOption::Departure => earliest_first(departure_time(a), departure_time(b)),
        SortOption::Arrival => earliest_first(arrival_time(a), arrival_time(b)),
        SortOption::Duration => a.metadata.total_duration_minutes.cmp(&b.metadata.total_duration_minutes),
    });
}

/// Score, badge and order a result set in one call
pub fn rank_flights(offers: &[FlightOffer], option: SortOption) -> Result<Vec<ScoredFlight>, RankingError> {
    let mut scored = score_flights(offers)?;
    sort_scored_flights(&mut scored, option);
    Ok(scored)
}
