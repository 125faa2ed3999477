use skyrank_core::FlightOffer;
use tracing::debug;

use crate::badges::assign_badges;
use crate::features::FlightMetadata;
use crate::models::{FlightScores, ScoredFlight, SubScores};

/// Seat count at which availability stops improving the score
const FULL_AVAILABILITY_SEATS: f64 = 9.0;
/// Seat score used when the supplier omits seat counts
const UNKNOWN_SEATS_SCORE: f64 = 50.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("Cannot score against an empty candidate set")]
    EmptyCandidateSet,
}

/// Weights of the composite scores, applied to 0-100 sub-scores
#[derive(Debug, Clone, Copy)]
struct Weights {
    price: f64,
    duration: f64,
    stops: f64,
    convenience: f64,
    seats: f64,
}

const BEST: Weights = Weights { price: 0.35, duration: 0.25, stops: 0.20, convenience: 0.15, seats: 0.05 };
const OVERALL: Weights = Weights { price: 0.40, duration: 0.30, stops: 0.20, convenience: 0.10, seats: 0.0 };
const FASTEST: Weights = Weights { price: 0.0, duration: 0.7, stops: 0.3, convenience: 0.0, seats: 0.0 };

#[derive(Debug, Clone, Copy)]
struct RawSubScores {
    price: f64,
    duration: f64,
    stops: f64,
    convenience: f64,
    seats: f64,
}

impl RawSubScores {
    fn weighted(&self, w: Weights) -> f64 {
        self.price * w.price
            + self.duration * w.duration
            + self.stops * w.stops
            + self.convenience * w.convenience
            + self.seats * w.seats
    }
}

/// Min/max of one lower-is-better axis across the candidate set
#[derive(Debug, Clone, Copy)]
struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            AxisRange { min: f64::INFINITY, max: f64::NEG_INFINITY },
            |r, v| AxisRange { min: r.min.min(v), max: r.max.max(v) },
        )
    }

    /// `100 * (max - v) / (max - min)`; a degenerate range scores 100 for everyone
    fn score(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return 100.0;
        }
        (100.0 * (self.max - value) / span).clamp(0.0, 100.0)
    }
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// A non-empty set of offers that individual offers are scored against
#[derive(Debug)]
pub struct CandidateSet<'a> {
    offers: &'a [FlightOffer],
    metadata: Vec<FlightMetadata>,
    price: AxisRange,
    duration: AxisRange,
    stops: AxisRange,
}

impl<'a> CandidateSet<'a> {
    pub fn new(offers: &'a [FlightOffer]) -> Result<Self, RankingError> {
        if offers.is_empty() {
            return Err(RankingError::EmptyCandidateSet);
        }

        let metadata: Vec<FlightMetadata> = offers.iter().map(FlightMetadata::extract).collect();
        let price = AxisRange::over(metadata.iter().map(|m| m.price));
        let duration = AxisRange::over(metadata.iter().map(|m| m.total_duration_minutes as f64));
        let stops = AxisRange::over(metadata.iter().map(|m| m.stop_count as f64));

        Ok(Self { offers, metadata, price, duration, stops })
    }

    /// Never zero; `new` rejects empty input
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Score one offer against this set. Badges need the whole set and are left empty.
    pub fn score(&self, target: &FlightOffer) -> ScoredFlight {
        self.score_with_metadata(target, FlightMetadata::extract(target))
    }

    /// Score every candidate and assign set-wide badges
    pub fn score_all(&self) -> Vec<ScoredFlight> {
        let mut scored: Vec<ScoredFlight> = self
            .offers
            .iter()
            .zip(self.metadata.iter())
            .map(|(offer, meta)| self.score_with_metadata(offer, *meta))
            .collect();

        assign_badges(&mut scored);
        scored
    }

    fn score_with_metadata(&self, offer: &FlightOffer, metadata: FlightMetadata) -> ScoredFlight {
        let raw = RawSubScores {
            price: self.price.score(metadata.price),
            duration: self.duration.score(metadata.total_duration_minutes as f64),
            stops: self.stops.score(metadata.stop_count as f64),
            convenience: metadata.departure_convenience as f64,
            seats: seat_score(metadata.bookable_seats),
        };

        ScoredFlight {
            offer: offer.clone(),
            scores: FlightScores {
                best: to_score(raw.weighted(BEST)),
                cheapest: to_score(raw.price),
                fastest: to_score(raw.weighted(FASTEST)),
                overall: to_score(raw.weighted(OVERALL)),
            },
            sub_scores: SubScores {
                price: to_score(raw.price),
                duration: to_score(raw.duration),
                stops: to_score(raw.stops),
                convenience: to_score(raw.convenience),
                seats: to_score(raw.seats),
            },
            badges: Vec::new(),
            metadata,
        }
    }
}

/// `min(seats / 9, 1) * 100`, 50 when unknown
fn seat_score(seats: Option<u32>) -> f64 {
    seats
        .map(|s| (s as f64 / FULL_AVAILABILITY_SEATS).min(1.0) * 100.0)
        .unwrap_or(UNKNOWN_SEATS_SCORE)
}

/// Score and badge a full result set
pub fn score_flights(offers: &[FlightOffer]) -> Result<Vec<ScoredFlight>, RankingError> {
    let candidates = CandidateSet::new(offers)?;
    let scored = candidates.score_all();
    debug!(
        offers = scored.len(),
        price_min = candidates.price.min,
        price_max = candidates.price.max,
        "scored flight offers"
    );
    Ok(scored)
}
