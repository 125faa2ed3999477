use skyrank_core::FlightOffer;
use std::collections::BTreeSet;

use crate::models::WarningCode;

/// Warning list for a separately ticketed pair. `DifferentAirlines` appears
/// only when the two airline sets share no code.
pub fn generate_warnings(outbound_airlines: &BTreeSet<String>, return_airlines: &BTreeSet<String>) -> Vec<WarningCode> {
    let mut warnings = vec![WarningCode::SeparateTickets];
    if outbound_airlines.is_disjoint(return_airlines) {
        warnings.push(WarningCode::DifferentAirlines);
    }
    warnings.extend([
        WarningCode::RebookingNotGuaranteed,
        WarningCode::NoProtectionMissedConnection,
        WarningCode::BaggageRecheckRequired,
    ]);
    warnings
}

/// Describes a self-transfer the traveller has to manage between the two tickets
pub fn self_transfer_note(outbound: &FlightOffer, return_flight: &FlightOffer) -> Option<String> {
    let arrival = outbound.outbound().and_then(|i| i.last_segment())?;
    let departure = return_flight.outbound().and_then(|i| i.first_segment())?;

    if arrival.arrival.iata_code != departure.departure.iata_code {
        return Some(format!(
            "Outbound arrives at {} but return departs from {}",
            arrival.arrival.iata_code, departure.departure.iata_code
        ));
    }

    match (arrival.arrival_time(), departure.departure_time()) {
        (Some(landed), Some(leaves)) if leaves < landed => Some(format!(
            "Return departs {} before outbound lands {}",
            departure.departure.at, arrival.arrival.at
        )),
        _ => None,
    }
}
