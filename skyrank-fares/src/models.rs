use serde::{Deserialize, Serialize};
use skyrank_core::FlightOffer;
use std::collections::BTreeSet;
use std::fmt;

/// Caveats attached to every separately ticketed itinerary, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    SeparateTickets,
    DifferentAirlines,
    RebookingNotGuaranteed,
    NoProtectionMissedConnection,
    BaggageRecheckRequired,
}

impl WarningCode {
    pub fn description(&self) -> &'static str {
        match self {
            WarningCode::SeparateTickets => "Outbound and return are booked as two separate tickets",
            WarningCode::DifferentAirlines => "Outbound and return are operated by different airlines",
            WarningCode::RebookingNotGuaranteed => "A schedule change on one ticket does not rebook the other",
            WarningCode::NoProtectionMissedConnection => "No protection if a delay causes a missed flight on the other ticket",
            WarningCode::BaggageRecheckRequired => "Checked baggage may need to be collected and re-checked",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPrice {
    pub outbound: f64,
    #[serde(rename = "return")]
    pub return_price: f64,
    pub total: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub amount: f64,
    /// Percent of the reference price, 0 when the reference is not positive
    pub percentage: f64,
    pub reference_price: f64,
}

impl Savings {
    pub fn against(reference_price: f64, combined_total: f64) -> Self {
        let amount = reference_price - combined_total;
        let percentage = if reference_price > 0.0 { amount / reference_price * 100.0 } else { 0.0 };
        Self { amount, percentage, reference_price }
    }
}

fn separate_tickets() -> bool {
    true
}

/// Two independently ticketed one-way offers sold together as a round-trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MixedCarrierFare {
    /// `{outbound.id}_{return.id}`; stable across calls for the same pair
    pub id: String,
    pub outbound: FlightOffer,
    #[serde(rename = "return")]
    pub return_flight: FlightOffer,
    pub combined_price: CombinedPrice,
    pub savings: Option<Savings>,
    /// True when no airline appears on both tickets
    pub is_mixed_carrier: bool,
    pub outbound_airlines: Vec<String>,
    pub return_airlines: Vec<String>,
    pub warnings: Vec<WarningCode>,
    pub self_transfer_risk: Option<String>,
    #[serde(skip_deserializing, default = "separate_tickets")]
    is_separate_tickets: bool,
}

impl MixedCarrierFare {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        outbound: FlightOffer,
        return_flight: FlightOffer,
        combined_price: CombinedPrice,
        savings: Option<Savings>,
        outbound_airlines: BTreeSet<String>,
        return_airlines: BTreeSet<String>,
        warnings: Vec<WarningCode>,
        self_transfer_risk: Option<String>,
    ) -> Self {
        Self {
            id: format!("{}_{}", outbound.id, return_flight.id),
            is_mixed_carrier: outbound_airlines.is_disjoint(&return_airlines),
            outbound,
            return_flight,
            combined_price,
            savings,
            outbound_airlines: outbound_airlines.into_iter().collect(),
            return_airlines: return_airlines.into_iter().collect(),
            warnings,
            self_transfer_risk,
            is_separate_tickets: true,
        }
    }

    pub fn is_separate_tickets(&self) -> bool {
        self.is_separate_tickets
    }

    pub fn total_price(&self) -> f64 {
        self.combined_price.total
    }

    /// Every airline involved in either ticket
    pub fn airline_codes(&self) -> BTreeSet<String> {
        self.outbound_airlines
            .iter()
            .chain(self.return_airlines.iter())
            .cloned()
            .collect()
    }

    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.contains(&code)
    }
}

/// One row of a unified result list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FareOption {
    RoundTrip(FlightOffer),
    SeparateTickets(MixedCarrierFare),
}

impl FareOption {
    pub fn id(&self) -> &str {
        match self {
            FareOption::RoundTrip(offer) => &offer.id,
            FareOption::SeparateTickets(fare) => &fare.id,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            FareOption::RoundTrip(offer) => offer.total_price(),
            FareOption::SeparateTickets(fare) => fare.total_price(),
        }
    }

    pub fn is_separate_tickets(&self) -> bool {
        matches!(self, FareOption::SeparateTickets(_))
    }

    pub fn savings(&self) -> Option<&Savings> {
        match self {
            FareOption::RoundTrip(_) => None,
            FareOption::SeparateTickets(fare) => fare.savings.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceBadge {
    /// Cheapest option on the page
    Cheapest,
    SeparateTicketSavings { percent: u32 },
}

impl PriceBadge {
    pub fn label(&self) -> String {
        match self {
            PriceBadge::Cheapest => "Cheapest".to_string(),
            PriceBadge::SeparateTicketSavings { percent } => {
                format!("Save {}% with Separate Tickets", percent)
            }
        }
    }
}

impl fmt::Display for PriceBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BadgedFareOption {
    pub option: FareOption,
    pub badges: Vec<PriceBadge>,
}
