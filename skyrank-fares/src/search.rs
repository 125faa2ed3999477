use async_trait::async_trait;
use serde::Serialize;
use skyrank_core::app_config::{Config, MixedSearchConfig};
use skyrank_core::search::{OneWaySearchRequest, RoundTripSearchParams};
use skyrank_core::FlightOffer;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analysis::{analyze_round_trip_pricing, MixedCarrierAnalysis};
use crate::combiner::FareCombiner;
use crate::models::{BadgedFareOption, FareOption, MixedCarrierFare, Savings};
use crate::ranking::{add_cheapest_badges, merge_and_sort_by_price, rank_mixed_fares};
use crate::FareError;

/// Upstream calls counted for each one-way direction a lookup needs
const API_CALLS_PER_DIRECTION: u32 = 2;

/// Upstream one-way flight search
#[async_trait]
pub trait OneWaySearchClient: Send + Sync {
    async fn search_one_way(
        &self,
        request: &OneWaySearchRequest,
    ) -> Result<Vec<FlightOffer>, Box<dyn std::error::Error + Send + Sync>>;
}

/// One-way results the caller already holds, for example from its own cache
#[derive(Debug, Clone, Default)]
pub struct CachedOneWay {
    pub outbound: Option<Vec<FlightOffer>>,
    pub inbound: Option<Vec<FlightOffer>>,
}

impl CachedOneWay {
    fn is_complete(&self) -> bool {
        self.outbound.is_some() && self.inbound.is_some()
    }
}

/// One-way offers used for a lookup. Fresh directions can be cached by the caller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OneWayResults {
    pub outbound: Vec<FlightOffer>,
    pub inbound: Vec<FlightOffer>,
    pub outbound_from_cache: bool,
    pub inbound_from_cache: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchDecision {
    pub should_search: bool,
    pub reason: String,
    pub analysis: Option<MixedCarrierAnalysis>,
    /// Set when both directions were available from cache
    pub use_cached: bool,
}

impl SearchDecision {
    fn skip(reason: impl Into<String>, analysis: Option<MixedCarrierAnalysis>) -> Self {
        Self { should_search: false, reason: reason.into(), analysis, use_cached: false }
    }

    fn search(reason: impl Into<String>, analysis: Option<MixedCarrierAnalysis>) -> Self {
        Self { should_search: true, reason: reason.into(), analysis, use_cached: false }
    }
}

/// Decide whether extra one-way searches are worth their cost
pub fn should_search_mixed_carriers(
    round_trips: &[FlightOffer],
    params: &RoundTripSearchParams,
    cached: Option<&CachedOneWay>,
    config: &MixedSearchConfig,
) -> SearchDecision {
    match params.include_separate_tickets {
        Some(false) => return SearchDecision::skip("User disabled separate tickets", None),
        Some(true) => return SearchDecision::search("User enabled separate tickets", None),
        None => {}
    }

    if !config.auto_enable {
        return SearchDecision::skip("Auto-enable disabled in configuration", None);
    }

    let cabin = params.cabin();
    if !config.auto_enable_cabin_classes.iter().any(|c| c.eq_ignore_ascii_case(&cabin)) {
        return SearchDecision::skip(format!("Auto-enable not active for {} cabin", cabin), None);
    }

    if cached.is_some_and(CachedOneWay::is_complete) {
        return SearchDecision { use_cached: true, ..SearchDecision::search("Cached one-way data available", None) };
    }

    let analysis = analyze_round_trip_pricing(round_trips);
    if !analysis.should_search {
        return SearchDecision::skip(analysis.reason.clone(), Some(analysis));
    }

    if let Some(savings) = analysis.estimated_savings {
        if savings.percentage < config.min_estimated_savings_percent {
            return SearchDecision::skip(
                format!(
                    "Estimated savings ({:.1}%) below threshold ({}%)",
                    savings.percentage, config.min_estimated_savings_percent
                ),
                Some(analysis),
            );
        }
        if savings.amount < config.min_estimated_savings_amount {
            return SearchDecision::skip(
                format!(
                    "Estimated savings (${:.0}) below threshold (${})",
                    savings.amount, config.min_estimated_savings_amount
                ),
                Some(analysis),
            );
        }
    }

    SearchDecision::search(analysis.reason.clone(), Some(analysis))
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    pub total_round_trips: usize,
    pub total_mixed_fares: usize,
    pub cheapest_round_trip: Option<f64>,
    pub cheapest_mixed: Option<f64>,
    pub best_savings: Option<Savings>,
    /// Skipped lookup saves both directions; otherwise each cached direction counts
    pub api_calls_saved: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmartMixedCarrierResult {
    /// Round-trips and separate-ticket fares, cheapest first
    pub options: Vec<BadgedFareOption>,
    pub mixed_fares: Vec<MixedCarrierFare>,
    pub search_performed: bool,
    pub decision: SearchDecision,
    pub one_way: Option<OneWayResults>,
    pub stats: SearchStats,
}

/// Separate-ticket lookup layered on top of a finished round-trip search
pub struct MixedCarrierSearch {
    client: Arc<dyn OneWaySearchClient>,
    config: Config,
}

impl MixedCarrierSearch {
    pub fn new(client: Arc<dyn OneWaySearchClient>, config: Config) -> Self {
        Self { client, config }
    }

    pub async fn run(
        &self,
        round_trips: &[FlightOffer],
        params: &RoundTripSearchParams,
        cached: Option<CachedOneWay>,
    ) -> Result<SmartMixedCarrierResult, FareError> {
        params.validate()?;

        let decision = should_search_mixed_carriers(round_trips, params, cached.as_ref(), &self.config.mixed_search);
        info!(
            search = decision.should_search,
            reason = %decision.reason,
            round_trips = round_trips.len(),
            "mixed-carrier decision"
        );

        let cheapest_round_trip = round_trips
            .iter()
            .map(FlightOffer::total_price)
            .reduce(f64::min);

        if !decision.should_search {
            return Ok(SmartMixedCarrierResult {
                options: round_trips
                    .iter()
                    .cloned()
                    .map(|offer| BadgedFareOption { option: FareOption::RoundTrip(offer), badges: Vec::new() })
                    .collect(),
                mixed_fares: Vec::new(),
                search_performed: false,
                decision,
                one_way: None,
                stats: SearchStats {
                    total_round_trips: round_trips.len(),
                    cheapest_round_trip,
                    api_calls_saved: 2 * API_CALLS_PER_DIRECTION,
                    ..Default::default()
                },
            });
        }

        let one_way = self.fetch_one_way(params, cached.unwrap_or_default()).await;
        debug!(
            outbound = one_way.outbound.len(),
            inbound = one_way.inbound.len(),
            outbound_cached = one_way.outbound_from_cache,
            inbound_cached = one_way.inbound_from_cache,
            "one-way offers ready"
        );

        let reference = cheapest_round_trip.filter(|p| *p > 0.0);
        let combined = FareCombiner::new(self.config.combiner.clone()).combine(&one_way.outbound, &one_way.inbound, reference);
        let mixed_fares = rank_mixed_fares(combined, round_trips);

        let options = add_cheapest_badges(merge_and_sort_by_price(round_trips, &mixed_fares));
        debug!(
            round_trips = round_trips.len(),
            mixed = mixed_fares.len(),
            merged = options.len(),
            "merged fare options"
        );

        let stats = SearchStats {
            total_round_trips: round_trips.len(),
            total_mixed_fares: mixed_fares.len(),
            cheapest_round_trip,
            cheapest_mixed: mixed_fares.iter().map(MixedCarrierFare::total_price).reduce(f64::min),
            best_savings: mixed_fares.first().and_then(|f| f.savings),
            api_calls_saved: API_CALLS_PER_DIRECTION
                * (u32::from(one_way.outbound_from_cache) + u32::from(one_way.inbound_from_cache)),
        };
        if let Some(best) = stats.best_savings.filter(|s| s.amount > 0.0) {
            info!(amount = best.amount, percentage = best.percentage, "separate tickets beat round-trip");
        }

        Ok(SmartMixedCarrierResult {
            options,
            mixed_fares,
            search_performed: true,
            decision,
            one_way: Some(one_way),
            stats,
        })
    }

    /// Both directions concurrently; cached non-empty results are reused
    async fn fetch_one_way(&self, params: &RoundTripSearchParams, cached: CachedOneWay) -> OneWayResults {
        let outbound_request = params.outbound_request();
        let return_request = params.return_request();

        let ((outbound, outbound_from_cache), (inbound, inbound_from_cache)) = tokio::join!(
            self.fetch_direction(&outbound_request, cached.outbound),
            self.fetch_direction(&return_request, cached.inbound),
        );

        OneWayResults { outbound, inbound, outbound_from_cache, inbound_from_cache }
    }

    async fn fetch_direction(
        &self,
        request: &OneWaySearchRequest,
        cached: Option<Vec<FlightOffer>>,
    ) -> (Vec<FlightOffer>, bool) {
        if let Some(offers) = cached.filter(|o| !o.is_empty()) {
            return (offers, true);
        }

        match self.client.search_one_way(request).await {
            Ok(offers) => (offers, false),
            Err(e) => {
                warn!(
                    origin = %request.origin,
                    destination = %request.destination,
                    error = %e,
                    "one-way search failed, continuing without it"
                );
                (Vec::new(), false)
            }
        }
    }
}
