use skyrank_core::FlightOffer;
use std::cmp::Ordering;
use tracing::debug;

use crate::models::{BadgedFareOption, FareOption, MixedCarrierFare, PriceBadge, Savings};

/// Savings percentage from which a separate-ticket option is badged
pub const SAVINGS_BADGE_MIN_PERCENT: f64 = 5.0;

fn cheapest_price(offers: &[FlightOffer]) -> f64 {
    offers.iter().map(FlightOffer::total_price).fold(f64::INFINITY, f64::min)
}

/// Keep only fares strictly cheaper than every traditional round-trip and
/// re-base their savings on the cheapest one. With no traditional offers the
/// fares pass through untouched.
pub fn rank_mixed_fares(fares: Vec<MixedCarrierFare>, traditional: &[FlightOffer]) -> Vec<MixedCarrierFare> {
    let cheapest_traditional = cheapest_price(traditional);
    if !cheapest_traditional.is_finite() {
        debug!(fares = fares.len(), "no traditional offers to rank against");
        return fares;
    }

    let before = fares.len();
    let ranked: Vec<MixedCarrierFare> = fares
        .into_iter()
        .filter(|fare| fare.total_price() < cheapest_traditional)
        .map(|mut fare| {
            fare.savings = Some(Savings::against(cheapest_traditional, fare.total_price()));
            fare
        })
        .collect();

    debug!(
        cheapest_traditional,
        before,
        after = ranked.len(),
        "filtered mixed fares against round-trips"
    );
    ranked
}

/// Single price-ordered list of round-trips and separate-ticket fares. On equal
/// price the round-trip comes first.
pub fn merge_and_sort_by_price(round_trips: &[FlightOffer], mixed: &[MixedCarrierFare]) -> Vec<FareOption> {
    let mut options: Vec<FareOption> = round_trips
        .iter()
        .cloned()
        .map(FareOption::RoundTrip)
        .chain(mixed.iter().cloned().map(FareOption::SeparateTickets))
        .collect();

    options.sort_by(|a, b| {
        a.price()
            .partial_cmp(&b.price())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.is_separate_tickets().cmp(&b.is_separate_tickets()))
    });
    options
}

pub fn add_cheapest_badges(options: Vec<FareOption>) -> Vec<BadgedFareOption> {
    let cheapest = options.iter().map(FareOption::price).fold(f64::INFINITY, f64::min);

    options
        .into_iter()
        .enumerate()
        .map(|(idx, option)| {
            let mut badges = Vec::new();
            if idx == 0 && option.price() == cheapest {
                badges.push(PriceBadge::Cheapest);
            }
            if let Some(savings) = option.savings() {
                if savings.percentage >= SAVINGS_BADGE_MIN_PERCENT {
                    badges.push(PriceBadge::SeparateTicketSavings { percent: savings.percentage.round() as u32 });
                }
            }
            BadgedFareOption { option, badges }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::combine_mixed_carrier_fares;
    use skyrank_core::app_config::FareCombinerConfig;
    use skyrank_core::fixtures::{inbound, outbound, round_trip};

    fn mixed(reference: Option<f64>) -> Vec<MixedCarrierFare> {
        let outs = vec![
            outbound("o1", 120.0, "BA", "08:00", 7),
            outbound("o2", 200.0, "AA", "09:00", 7),
        ];
        let rets = vec![
            inbound("r1", 130.0, "VS", "11:00", 8),
            inbound("r2", 180.0, "DL", "12:00", 8),
        ];
        combine_mixed_carrier_fares(&outs, &rets, reference, &FareCombinerConfig::default())
    }

    #[test]
    fn test_only_strictly_cheaper_fares_survive() {
        // totals: 250, 300, 330, 380
        let traditional = vec![round_trip("rt1", 330.0, "BA"), round_trip("rt2", 500.0, "AA")];
        let ranked = rank_mixed_fares(mixed(Some(600.0)), &traditional);

        let totals: Vec<f64> = ranked.iter().map(|f| f.total_price()).collect();
        assert_eq!(totals, vec![250.0, 300.0]);
        for fare in &ranked {
            let savings = fare.savings.unwrap();
            assert_eq!(savings.reference_price, 330.0);
            assert_eq!(savings.amount, 330.0 - fare.total_price());
        }
    }

    #[test]
    fn test_savings_recomputed_even_without_provisional_reference() {
        let ranked = rank_mixed_fares(mixed(None), &[round_trip("rt", 500.0, "BA")]);
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].savings.unwrap().percentage, 50.0);
    }

    #[test]
    fn test_no_traditional_offers_keeps_fares() {
        let fares = mixed(None);
        let ranked = rank_mixed_fares(fares.clone(), &[]);
        assert_eq!(ranked, fares);
    }

    #[test]
    fn test_merge_orders_by_price_round_trip_first_on_tie() {
        let fares = mixed(None);
        let round_trips = vec![round_trip("rt-250", 250.0, "BA"), round_trip("rt-100", 100.0, "AA")];
        let merged = merge_and_sort_by_price(&round_trips, &fares);

        assert_eq!(merged.len(), 6);
        assert_eq!(merged[0].id(), "rt-100");
        assert_eq!(merged[1].id(), "rt-250");
        assert!(merged[2].is_separate_tickets());
        assert_eq!(merged[2].price(), 250.0);
        assert!(merged.windows(2).all(|w| w[0].price() <= w[1].price()));
    }

    #[test]
    fn test_cheapest_and_savings_badges() {
        let traditional = vec![round_trip("rt", 400.0, "BA")];
        let ranked = rank_mixed_fares(mixed(None), &traditional);
        let badged = add_cheapest_badges(merge_and_sort_by_price(&traditional, &ranked));

        assert_eq!(badged[0].badges[0], PriceBadge::Cheapest);
        // 250 against 400 saves 37.5%
        assert_eq!(badged[0].badges[1], PriceBadge::SeparateTicketSavings { percent: 38 });
        assert!(!badged[1].badges.contains(&PriceBadge::Cheapest));
        let last = badged.last().unwrap();
        assert_eq!(last.option.id(), "rt");
        assert!(last.badges.is_empty());
    }

    #[test]
    fn test_small_savings_are_not_badged() {
        let traditional = vec![round_trip("rt", 255.0, "BA")];
        let ranked = rank_mixed_fares(mixed(None), &traditional);
        assert_eq!(ranked.len(), 1);

        let badged = add_cheapest_badges(merge_and_sort_by_price(&traditional, &ranked));
        assert_eq!(badged[0].badges, vec![PriceBadge::Cheapest]);
        assert!(add_cheapest_badges(Vec::new()).is_empty());
    }
}
