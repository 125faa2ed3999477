use serde::{Deserialize, Serialize};
use skyrank_core::FlightOffer;
use std::cmp::Ordering;

const UNKNOWN_AIRLINE: &str = "XX";
const TOP_AIRLINES_PER_LEG: usize = 3;

// Decision thresholds, checked in this order
const STRONG_SAVINGS_PERCENT: f64 = 8.0;
const STRONG_SAVINGS_AMOUNT: f64 = 30.0;
const MODERATE_SAVINGS_PERCENT: f64 = 5.0;
const MODERATE_SPREAD_PERCENT: f64 = 30.0;
const HIGH_SPREAD_PERCENT: f64 = 50.0;
const HIGH_SPREAD_MIN_OFFERS: usize = 5;
const MINIMAL_SAVINGS_PERCENT: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineLegPrice {
    pub airline: String,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatedSavings {
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub cheapest_round_trip: f64,
    pub cheapest_outbound_estimate: f64,
    pub cheapest_return_estimate: f64,
    pub combined_estimate: f64,
    /// (max - min) / min of round-trip prices, in percent
    pub airline_price_spread: f64,
    pub top_outbound: Vec<AirlineLegPrice>,
    pub top_return: Vec<AirlineLegPrice>,
}

/// Estimate of whether separate tickets are worth searching for, computed
/// from round-trip results alone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedCarrierAnalysis {
    pub should_search: bool,
    /// 0..=1
    pub confidence: f64,
    pub reason: String,
    /// Present only when a search is recommended, never negative
    pub estimated_savings: Option<EstimatedSavings>,
    pub breakdown: PricingBreakdown,
}

#[derive(Debug, Default)]
struct LegPrices {
    outbound: Vec<f64>,
    inbound: Vec<f64>,
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Share of a round-trip price attributed to the outbound leg. Longer legs
/// weigh more, squeezed into 0.05..=0.95.
fn outbound_share(offer: &FlightOffer) -> f64 {
    let out = offer.outbound().map_or(0, |i| i.duration_minutes()) as f64;
    let back = offer.inbound().map_or(0, |i| i.duration_minutes()) as f64;
    let total = out + back;
    if total > 0.0 {
        out / total * 0.9 + 0.05
    } else {
        0.5
    }
}

fn sorted_by_price(mut legs: Vec<AirlineLegPrice>) -> Vec<AirlineLegPrice> {
    legs.sort_by(|a, b| a.avg_price.partial_cmp(&b.avg_price).unwrap_or(Ordering::Equal));
    legs
}

pub fn analyze_round_trip_pricing(round_trips: &[FlightOffer]) -> MixedCarrierAnalysis {
    if round_trips.is_empty() {
        return MixedCarrierAnalysis {
            should_search: false,
            confidence: 0.0,
            reason: "No round-trip flights to analyze".to_string(),
            estimated_savings: None,
            breakdown: PricingBreakdown::default(),
        };
    }

    let prices: Vec<f64> = round_trips.iter().map(FlightOffer::total_price).collect();
    let cheapest_round_trip = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let dearest_round_trip = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Per-airline leg estimates, airlines kept in first-seen order
    let mut by_airline: Vec<(String, LegPrices)> = Vec::new();
    for offer in round_trips {
        let airline = offer.primary_airline().unwrap_or(UNKNOWN_AIRLINE).to_string();
        let slot = match by_airline.iter().position(|(code, _)| *code == airline) {
            Some(idx) => idx,
            None => {
                by_airline.push((airline, LegPrices::default()));
                by_airline.len() - 1
            }
        };
        if offer.itineraries.len() >= 2 {
            let total = offer.total_price();
            let share = outbound_share(offer);
            let legs = &mut by_airline[slot].1;
            legs.outbound.push(total * share);
            legs.inbound.push(total * (1.0 - share));
        }
    }

    let priced = by_airline.iter().filter(|(_, legs)| !legs.outbound.is_empty());
    let outbound_legs = sorted_by_price(
        priced
            .clone()
            .map(|(airline, legs)| AirlineLegPrice { airline: airline.clone(), avg_price: average(&legs.outbound) })
            .collect(),
    );
    let return_legs = sorted_by_price(
        priced
            .map(|(airline, legs)| AirlineLegPrice { airline: airline.clone(), avg_price: average(&legs.inbound) })
            .collect(),
    );

    let cheapest_outbound_estimate = outbound_legs.first().map_or(0.0, |l| l.avg_price);
    let cheapest_return_estimate = return_legs.first().map_or(0.0, |l| l.avg_price);
    let combined_estimate = cheapest_outbound_estimate + cheapest_return_estimate;

    let (spread_percent, savings_amount, savings_percent) = if cheapest_round_trip > 0.0 {
        let amount = cheapest_round_trip - combined_estimate;
        (
            (dearest_round_trip - cheapest_round_trip) / cheapest_round_trip * 100.0,
            amount,
            amount / cheapest_round_trip * 100.0,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    let split_airlines = outbound_legs.len() >= 2
        && return_legs.len() >= 2
        && outbound_legs[0].airline != return_legs[0].airline;

    let (should_search, confidence, reason) = if savings_percent >= STRONG_SAVINGS_PERCENT
        && savings_amount >= STRONG_SAVINGS_AMOUNT
    {
        (true, 0.85, format!("Strong savings potential: ~${:.0} ({:.0}%)", savings_amount, savings_percent))
    } else if savings_percent >= MODERATE_SAVINGS_PERCENT && spread_percent >= MODERATE_SPREAD_PERCENT {
        (
            true,
            0.7,
            format!("Moderate savings with diverse pricing: ~${:.0} ({:.0}%)", savings_amount, savings_percent),
        )
    } else if split_airlines {
        (
            true,
            0.6,
            format!(
                "Different airlines cheapest per leg: {} outbound, {} return",
                outbound_legs[0].airline, return_legs[0].airline
            ),
        )
    } else if spread_percent >= HIGH_SPREAD_PERCENT && round_trips.len() >= HIGH_SPREAD_MIN_OFFERS {
        (true, 0.5, format!("High price diversity ({:.0}% spread)", spread_percent))
    } else if savings_percent < MINIMAL_SAVINGS_PERCENT {
        (false, 0.8, "Minimal savings potential, round-trip prices already competitive".to_string())
    } else {
        (false, 0.8, "Same airline likely cheapest for both legs".to_string())
    };

    MixedCarrierAnalysis {
        should_search,
        confidence,
        reason,
        estimated_savings: should_search.then(|| EstimatedSavings {
            amount: savings_amount.max(0.0),
            percentage: savings_percent.max(0.0),
        }),
        breakdown: PricingBreakdown {
            cheapest_round_trip,
            cheapest_outbound_estimate,
            cheapest_return_estimate,
            combined_estimate,
            airline_price_spread: spread_percent,
            top_outbound: outbound_legs.into_iter().take(TOP_AIRLINES_PER_LEG).collect(),
            top_return: return_legs.into_iter().take(TOP_AIRLINES_PER_LEG).collect(),
        },
    }
}
