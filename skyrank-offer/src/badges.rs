use skyrank_core::time::{is_early_departure_hour, is_red_eye_hour};

use crate::models::{Badge, ScoredFlight};

/// Carriers that earn the Premium Airline badge
pub const PREMIUM_CARRIERS: [&str; 20] = [
    "DL", "AA", "UA", "BA", "LH", "AF", "EK", "QR", "SQ", "NH",
    "CX", "JL", "QF", "EY", "TK", "KL", "LX", "AY", "OS", "SK",
];

const CONVENIENT_TIME_MIN: u8 = 85;
const HIGH_AVAILABILITY_SEATS: u32 = 7;
const FEW_SEATS_MAX: u32 = 3;
const VALUE_PER_HOUR_RATIO: f64 = 0.85;
/// Top Pick goes to the best tenth of the set
const TOP_PICK_DIVISOR: usize = 10;

pub fn is_premium_carrier(code: &str) -> bool {
    PREMIUM_CARRIERS.contains(&code)
}

/// Index of the first element whose key is strictly better than all before it
fn first_extreme<F>(scored: &[ScoredFlight], key: F, prefer_lower: bool) -> Option<usize>
where
    F: Fn(&ScoredFlight) -> f64,
{
    let mut winner: Option<(usize, f64)> = None;
    for (idx, s) in scored.iter().enumerate() {
        let v = key(s);
        let better = match winner {
            None => true,
            Some((_, w)) if prefer_lower => v < w,
            Some((_, w)) => v > w,
        };
        if better {
            winner = Some((idx, v));
        }
    }
    winner.map(|(idx, _)| idx)
}

/// Lowest `best` score still inside the top decile (at least one offer)
fn top_pick_threshold(scored: &[ScoredFlight]) -> Option<u8> {
    let mut best: Vec<u8> = scored.iter().map(|s| s.scores.best).collect();
    best.sort_unstable_by(|a, b| b.cmp(a));
    let picks = best.len().div_ceil(TOP_PICK_DIVISOR).max(1);
    best.get(picks - 1).copied()
}

/// Average price-per-hour over offers with a known duration
fn average_price_per_hour(scored: &[ScoredFlight]) -> Option<f64> {
    let known: Vec<f64> = scored
        .iter()
        .map(|s| s.metadata.price_per_hour)
        .filter(|pph| *pph > 0.0)
        .collect();
    if known.is_empty() {
        None
    } else {
        Some(known.iter().sum::<f64>() / known.len() as f64)
    }
}

/// Attach badges derived from the scored set as a whole. Order of insertion is
/// presentation order only.
pub fn assign_badges(scored: &mut [ScoredFlight]) {
    if scored.is_empty() {
        return;
    }

    let best_value = first_extreme(scored, |s| s.scores.best as f64, false);
    let lowest_price = first_extreme(scored, |s| s.metadata.price, true);
    let fastest = first_extreme(scored, |s| s.metadata.total_duration_minutes as f64, true);
    let top_pick = top_pick_threshold(scored);
    let avg_pph = average_price_per_hour(scored);

    for (idx, flight) in scored.iter_mut().enumerate() {
        let meta = flight.metadata;
        let mut badges = Vec::new();

        if best_value == Some(idx) {
            badges.push(Badge::BestValue);
        }
        if lowest_price == Some(idx) {
            badges.push(Badge::LowestPrice);
        }
        if fastest == Some(idx) {
            badges.push(Badge::FastestFlight);
        }
        if meta.stop_count == 0 {
            badges.push(Badge::DirectFlight);
        }
        if meta.departure_convenience >= CONVENIENT_TIME_MIN {
            badges.push(Badge::ConvenientTime);
        }
        match meta.bookable_seats {
            Some(seats) if seats >= HIGH_AVAILABILITY_SEATS => badges.push(Badge::HighAvailability),
            Some(seats) if (1..=FEW_SEATS_MAX).contains(&seats) => {
                badges.push(Badge::FewSeatsLeft { seats })
            }
            _ => {}
        }
        if top_pick.is_some_and(|threshold| flight.scores.best >= threshold) {
            badges.push(Badge::TopPick);
        }
        if let Some(avg) = avg_pph {
            if meta.price_per_hour > 0.0 && meta.price_per_hour < avg * VALUE_PER_HOUR_RATIO {
                badges.push(Badge::GreatValuePerHour);
            }
        }
        if flight.offer.primary_airline().is_some_and(is_premium_carrier) {
            badges.push(Badge::PremiumAirline);
        }
        match meta.departure_hour {
            Some(hour) if is_early_departure_hour(hour) => badges.push(Badge::EarlyDeparture),
            Some(hour) if is_red_eye_hour(hour) => badges.push(Badge::RedEyeFlight),
            _ => {}
        }

        flight.badges = badges;
    }
}
