use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use skyrank_core::app_config::Config;
use skyrank_core::search::{OneWaySearchRequest, RoundTripSearchParams};
use skyrank_core::FlightOffer;
use skyrank_fares::{MixedCarrierSearch, OneWaySearchClient, PriceBadge, WarningCode};
use skyrank_offer::{rank_flights, Badge, SortOption};
use std::sync::Arc;

fn one_way_json(id: &str, from: &str, to: &str, departs: &str, arrives: &str, carrier: &str, total: &str) -> serde_json::Value {
    json!({
        "id": id,
        "itineraries": [{
            "duration": "PT7H",
            "segments": [{
                "departure": { "iataCode": from, "at": departs },
                "arrival": { "iataCode": to, "at": arrives },
                "carrierCode": carrier
            }]
        }],
        "price": { "currency": "USD", "total": total },
        "numberOfBookableSeats": 4,
        "validatingAirlineCodes": [carrier]
    })
}

fn parse(values: Vec<serde_json::Value>) -> Vec<FlightOffer> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).expect("valid offer"))
        .collect()
}

fn round_trips() -> Vec<FlightOffer> {
    parse(vec![json!({
        "id": "rt-ba",
        "itineraries": [
            {
                "duration": "PT7H",
                "segments": [{
                    "departure": { "iataCode": "JFK", "at": "2025-06-15T18:00:00" },
                    "arrival": { "iataCode": "LHR", "at": "2025-06-16T06:00:00" },
                    "carrierCode": "BA"
                }]
            },
            {
                "duration": "PT8H",
                "segments": [{
                    "departure": { "iataCode": "LHR", "at": "2025-06-22T11:00:00" },
                    "arrival": { "iataCode": "JFK", "at": "2025-06-22T14:00:00" },
                    "carrierCode": "BA"
                }]
            }
        ],
        "price": { "currency": "USD", "total": "400.00" },
        "validatingAirlineCodes": ["BA"]
    })])
}

struct StaticClient;

#[async_trait]
impl OneWaySearchClient for StaticClient {
    async fn search_one_way(
        &self,
        request: &OneWaySearchRequest,
    ) -> Result<Vec<FlightOffer>, Box<dyn std::error::Error + Send + Sync>> {
        assert_eq!(request.max_results, 30);
        let offers = if request.origin == "JFK" {
            vec![
                one_way_json("out-b6", "JFK", "LHR", "2025-06-15T08:00:00", "2025-06-15T20:00:00", "B6", "150.00"),
                one_way_json("out-vs", "JFK", "LHR", "2025-06-15T19:00:00", "2025-06-16T07:00:00", "VS", "120.00"),
            ]
        } else {
            vec![
                one_way_json("ret-ba", "LHR", "JFK", "2025-06-22T09:00:00", "2025-06-22T12:00:00", "BA", "130.00"),
                one_way_json("ret-dl", "LHR", "JFK", "2025-06-22T15:00:00", "2025-06-22T18:00:00", "DL", "200"),
            ]
        };
        Ok(parse(offers))
    }
}

#[tokio::test]
async fn test_separate_tickets_undercut_round_trip() {
    let search = MixedCarrierSearch::new(Arc::new(StaticClient), Config::default());
    let mut params = RoundTripSearchParams::new(
        "JFK",
        "LHR",
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 22).unwrap(),
    );
    params.include_separate_tickets = Some(true);

    let result = search.run(&round_trips(), &params, None).await.unwrap();

    assert!(result.search_performed);
    let cheapest = &result.mixed_fares[0];
    assert_eq!(cheapest.id, "out-vs_ret-ba");
    assert_eq!(cheapest.combined_price.total, 250.0);
    let savings = cheapest.savings.unwrap();
    assert_eq!(savings.amount, 150.0);
    assert_eq!(savings.percentage, 37.5);
    assert!(cheapest.has_warning(WarningCode::DifferentAirlines));

    assert!(result.mixed_fares.iter().all(|f| f.total_price() < 400.0));
    assert_eq!(result.options[0].badges[0], PriceBadge::Cheapest);
    assert_eq!(result.options.last().unwrap().option.id(), "rt-ba");

    let json = serde_json::to_value(&result.options[0]).unwrap();
    assert_eq!(json["option"]["type"], "SEPARATE_TICKETS");
    assert_eq!(json["option"]["isSeparateTickets"], true);
}

#[tokio::test]
async fn test_one_way_offers_rank_with_badges() {
    let outbound = StaticClient
        .search_one_way(&OneWaySearchRequest {
            origin: "JFK".to_string(),
            destination: "LHR".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            adults: 1,
            children: 0,
            infants: 0,
            cabin_class: None,
            non_stop: false,
            max_results: 30,
        })
        .await
        .unwrap();

    let ranked = rank_flights(&outbound, SortOption::Cheapest).unwrap();
    assert_eq!(ranked[0].offer.id, "out-vs");
    assert!(ranked[0].has_badge(&Badge::LowestPrice));
    // four seats is neither scarce nor plentiful
    assert!(!ranked[0].has_badge(&Badge::HighAvailability));
    assert!(!ranked[0].has_badge(&Badge::FewSeatsLeft { seats: 4 }));
    assert!(ranked.iter().all(|s| s.has_badge(&Badge::DirectFlight)));
    assert!(ranked[1].has_badge(&Badge::ConvenientTime));
}
