use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Number of one-way results requested per direction for mixed-carrier pairing
pub const ONE_WAY_MAX_RESULTS: u32 = 30;

/// Parameters of the round-trip search a mixed-carrier lookup piggybacks on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTripSearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    pub cabin_class: Option<String>,
    #[serde(default)]
    pub non_stop: bool,
    /// Explicit user choice; `None` leaves it to auto-enable
    pub include_separate_tickets: Option<bool>,
}

fn default_adults() -> u32 { 1 }

impl RoundTripSearchParams {
    pub fn new(origin: &str, destination: &str, departure_date: NaiveDate, return_date: NaiveDate) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date,
            return_date,
            adults: 1,
            children: 0,
            infants: 0,
            cabin_class: None,
            non_stop: false,
            include_separate_tickets: None,
        }
    }

    /// Cabin class upper-cased, ECONOMY when unset
    pub fn cabin(&self) -> String {
        self.cabin_class
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "ECONOMY".to_string())
    }

    pub fn validate(&self) -> CoreResult<()> {
        for code in [&self.origin, &self.destination] {
            if !is_iata_airport_code(code) {
                return Err(CoreError::ValidationError(format!("invalid airport code: {code}")));
            }
        }
        if self.return_date < self.departure_date {
            return Err(CoreError::ValidationError(format!(
                "return date {} is before departure date {}",
                self.return_date, self.departure_date
            )));
        }
        if self.adults == 0 {
            return Err(CoreError::ValidationError("at least one adult is required".to_string()));
        }
        Ok(())
    }

    pub fn outbound_request(&self) -> OneWaySearchRequest {
        self.one_way(&self.origin, &self.destination, self.departure_date)
    }

    pub fn return_request(&self) -> OneWaySearchRequest {
        self.one_way(&self.destination, &self.origin, self.return_date)
    }

    fn one_way(&self, origin: &str, destination: &str, date: NaiveDate) -> OneWaySearchRequest {
        OneWaySearchRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            date,
            adults: self.adults,
            children: self.children,
            infants: self.infants,
            cabin_class: self.cabin_class.clone(),
            non_stop: self.non_stop,
            max_results: ONE_WAY_MAX_RESULTS,
        }
    }
}

/// One direction of a separate-ticket lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneWaySearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub cabin_class: Option<String>,
    pub non_stop: bool,
    pub max_results: u32,
}

pub fn is_iata_airport_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}
