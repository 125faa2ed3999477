use skyrank_core::app_config::FareCombinerConfig;
use skyrank_core::FlightOffer;
use std::cmp::Ordering;
use tracing::debug;

use crate::models::{CombinedPrice, MixedCarrierFare, Savings};
use crate::warnings::{generate_warnings, self_transfer_note};

/// Cheapest offers per direction considered for pairing. Tunable bound on work,
/// results outside the window are never seen.
pub const PAIR_WINDOW: usize = 15;

/// Markup applied to the two cheapest one-ways when no round-trip price is known.
/// Tunable heuristic.
pub const REFERENCE_PRICE_BUFFER: f64 = 1.1;

fn by_price(a: &&FlightOffer, b: &&FlightOffer) -> Ordering {
    a.total_price().partial_cmp(&b.total_price()).unwrap_or(Ordering::Equal)
}

/// Pairs one-way outbound and return offers into separately ticketed fares
#[derive(Debug, Clone, Default)]
pub struct FareCombiner {
    config: FareCombinerConfig,
}

impl FareCombiner {
    pub fn new(config: FareCombinerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FareCombinerConfig {
        &self.config
    }

    /// Cheapest combinations first, never more than `max_combinations`.
    /// Savings are only filled in when `reference_price` is supplied.
    pub fn combine(
        &self,
        outbound: &[FlightOffer],
        inbound: &[FlightOffer],
        reference_price: Option<f64>,
    ) -> Vec<MixedCarrierFare> {
        if outbound.is_empty() || inbound.is_empty() {
            debug!(outbound = outbound.len(), inbound = inbound.len(), "nothing to combine");
            return Vec::new();
        }

        let mut outs: Vec<&FlightOffer> = outbound.iter().collect();
        let mut rets: Vec<&FlightOffer> = inbound.iter().collect();
        outs.sort_by(by_price);
        rets.sort_by(by_price);

        let estimated_reference = reference_price
            .unwrap_or(REFERENCE_PRICE_BUFFER * (outs[0].total_price() + rets[0].total_price()));
        debug!(
            reference = estimated_reference,
            supplied = reference_price.is_some(),
            "combining one-way offers"
        );

        let max = self.config.max_combinations;
        let mut fares = Vec::new();
        let mut examined = 0usize;

        'pairs: for out in outs.iter().take(PAIR_WINDOW) {
            if fares.len() >= max {
                break;
            }
            let out_airlines = out.airline_codes();

            for ret in rets.iter().take(PAIR_WINDOW) {
                examined += 1;
                let total = out.total_price() + ret.total_price();

                let savings = reference_price.map(|reference| Savings::against(reference, total));
                if let Some(s) = savings {
                    if s.amount < self.config.min_savings_amount || s.percentage < self.config.min_savings_percent {
                        continue;
                    }
                }

                let ret_airlines = ret.airline_codes();
                if !self.config.include_same_airline && !out_airlines.is_disjoint(&ret_airlines) {
                    continue;
                }

                let warnings = generate_warnings(&out_airlines, &ret_airlines);
                let combined_price = CombinedPrice {
                    outbound: out.total_price(),
                    return_price: ret.total_price(),
                    total,
                    currency: self.config.currency.clone(),
                };

                fares.push(MixedCarrierFare::new(
                    (*out).clone(),
                    (*ret).clone(),
                    combined_price,
                    savings,
                    out_airlines.clone(),
                    ret_airlines,
                    warnings,
                    self_transfer_note(out, ret),
                ));

                if fares.len() >= max {
                    break 'pairs;
                }
            }
        }

        fares.sort_by(|a, b| a.total_price().partial_cmp(&b.total_price()).unwrap_or(Ordering::Equal));
        fares.truncate(max);

        debug!(examined, kept = fares.len(), "mixed-carrier combination done");
        fares
    }
}

pub fn combine_mixed_carrier_fares(
    outbound: &[FlightOffer],
    inbound: &[FlightOffer],
    reference_price: Option<f64>,
    config: &FareCombinerConfig,
) -> Vec<MixedCarrierFare> {
    FareCombiner::new(config.clone()).combine(outbound, inbound, reference_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WarningCode;
    use skyrank_core::fixtures::{inbound, outbound};

    fn outs(prices: &[f64], carrier: &str) -> Vec<FlightOffer> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| outbound(&format!("o{i}"), *p, carrier, "08:00", 7))
            .collect()
    }

    fn rets(prices: &[f64], carrier: &str) -> Vec<FlightOffer> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| inbound(&format!("r{i}"), *p, carrier, "11:00", 8))
            .collect()
    }

    #[test]
    fn test_cheapest_pair_against_reference() {
        let fares = combine_mixed_carrier_fares(
            &outs(&[150.0, 120.0], "BA"),
            &rets(&[200.0, 130.0], "VS"),
            Some(400.0),
            &FareCombinerConfig::default(),
        );

        assert_eq!(fares.len(), 4);
        let first = &fares[0];
        assert_eq!(first.id, "o1_r1");
        assert_eq!(first.combined_price.total, 250.0);
        assert_eq!(first.combined_price.outbound, 120.0);
        assert_eq!(first.combined_price.return_price, 130.0);
        assert_eq!(first.combined_price.currency, "USD");
        let savings = first.savings.unwrap();
        assert_eq!(savings.amount, 150.0);
        assert_eq!(savings.percentage, 37.5);
        assert_eq!(savings.reference_price, 400.0);
    }

    #[test]
    fn test_empty_side_yields_nothing() {
        let config = FareCombinerConfig::default();
        assert!(combine_mixed_carrier_fares(&outs(&[120.0], "BA"), &[], Some(400.0), &config).is_empty());
        assert!(combine_mixed_carrier_fares(&[], &rets(&[130.0], "VS"), None, &config).is_empty());
    }

    #[test]
    fn test_result_is_capped_and_sorted() {
        let prices: Vec<f64> = (0..20).map(|i| 300.0 - i as f64 * 7.0).collect();
        let combiner = FareCombiner::new(FareCombinerConfig { max_combinations: 5, ..Default::default() });
        let fares = combiner.combine(&outs(&prices, "BA"), &rets(&prices, "VS"), None);

        assert_eq!(fares.len(), 5);
        assert!(fares.windows(2).all(|w| w[0].total_price() <= w[1].total_price()));
        assert!(fares.iter().all(|f| f.savings.is_none()));
    }

    #[test]
    fn test_pairing_window_bounds_enumeration() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let combiner = FareCombiner::new(FareCombinerConfig { max_combinations: 1000, ..Default::default() });
        let fares = combiner.combine(&outs(&prices, "BA"), &rets(&[130.0], "VS"), None);

        assert_eq!(fares.len(), PAIR_WINDOW);
        assert!(fares.iter().all(|f| f.combined_price.outbound < 115.0));
    }

    #[test]
    fn test_minimum_savings_filters_pairs() {
        let config = FareCombinerConfig { min_savings_amount: 100.0, ..Default::default() };
        let fares = combine_mixed_carrier_fares(
            &outs(&[120.0, 150.0], "BA"),
            &rets(&[130.0, 200.0], "VS"),
            Some(400.0),
            &config,
        );

        // 250 and 280 save at least 100; 320 and 350 do not
        let totals: Vec<f64> = fares.iter().map(|f| f.total_price()).collect();
        assert_eq!(totals, vec![250.0, 280.0]);
    }

    #[test]
    fn test_minimum_savings_percent_filters_pairs() {
        let config = FareCombinerConfig { min_savings_percent: 25.0, ..Default::default() };
        let fares = combine_mixed_carrier_fares(
            &outs(&[120.0, 150.0], "BA"),
            &rets(&[130.0, 200.0], "VS"),
            Some(400.0),
            &config,
        );

        // 37.5% and 30% clear the bar; 20% and 12.5% do not
        let totals: Vec<f64> = fares.iter().map(|f| f.total_price()).collect();
        assert_eq!(totals, vec![250.0, 280.0]);
    }

    #[test]
    fn test_minimums_ignored_without_reference() {
        let config = FareCombinerConfig {
            min_savings_amount: 10_000.0,
            min_savings_percent: 99.0,
            ..Default::default()
        };
        let fares = combine_mixed_carrier_fares(
            &outs(&[120.0, 150.0], "BA"),
            &rets(&[130.0, 200.0], "VS"),
            None,
            &config,
        );

        assert_eq!(fares.len(), 4);
        assert!(fares.iter().all(|f| f.savings.is_none()));
    }

    #[test]
    fn test_pairs_dearer_than_reference_are_dropped() {
        let fares = combine_mixed_carrier_fares(
            &outs(&[250.0], "BA"),
            &rets(&[200.0], "VS"),
            Some(400.0),
            &FareCombinerConfig::default(),
        );
        assert!(fares.is_empty());
    }

    #[test]
    fn test_same_airline_pairs_can_be_excluded() {
        let mut out = outs(&[120.0], "BA");
        out.extend(outs(&[140.0], "AA").into_iter().map(|mut o| {
            o.id = "aa".to_string();
            o
        }));
        let ret = rets(&[130.0], "BA");

        let kept = combine_mixed_carrier_fares(&out, &ret, None, &FareCombinerConfig::default());
        assert_eq!(kept.len(), 2);
        assert!(!kept[0].is_mixed_carrier);

        let config = FareCombinerConfig { include_same_airline: false, ..Default::default() };
        let mixed_only = combine_mixed_carrier_fares(&out, &ret, None, &config);
        assert_eq!(mixed_only.len(), 1);
        assert_eq!(mixed_only[0].id, "aa_r0");
        assert!(mixed_only[0].is_mixed_carrier);
    }

    #[test]
    fn test_every_fare_carries_mandatory_warnings() {
        let mut ret = rets(&[130.0], "BA");
        ret.extend(rets(&[150.0], "VS").into_iter().map(|mut o| {
            o.id = "vs".to_string();
            o
        }));
        let fares = combine_mixed_carrier_fares(&outs(&[120.0], "BA"), &ret, None, &FareCombinerConfig::default());

        assert_eq!(fares.len(), 2);
        for fare in &fares {
            assert!(fare.is_separate_tickets());
            for code in [
                WarningCode::SeparateTickets,
                WarningCode::RebookingNotGuaranteed,
                WarningCode::NoProtectionMissedConnection,
                WarningCode::BaggageRecheckRequired,
            ] {
                assert!(fare.has_warning(code));
            }
            assert_eq!(fare.has_warning(WarningCode::DifferentAirlines), fare.is_mixed_carrier);
        }
        assert!(!fares[0].has_warning(WarningCode::DifferentAirlines));
        assert!(fares[1].has_warning(WarningCode::DifferentAirlines));
    }
}
