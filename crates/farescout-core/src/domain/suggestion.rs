use serde::{Deserialize, Serialize};

use super::{IataCode, TravelDates};

/// An origin airport resolved for the search, in upstream relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginAirport {
    pub iata: IataCode,
    pub name: String,
    pub distance_km: Option<f64>,
}

/// A suggested destination with its best observed fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationSuggestion {
    pub destination_code: IataCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Origin airport that produced the winning price.
    pub best_origin: IataCode,
    pub price_per_person: f64,
    pub total_price: f64,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub currency: String,
    pub reasons: Vec<String>,
}

/// Echo of the criteria a response was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub starting_location: String,
    pub travel_dates: TravelDates,
    pub budget_per_person: u32,
    pub travelers: u8,
    pub trip_length_nights: u8,
    pub non_stop_only: bool,
}

/// Ranked suggestion results for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub origins_used: Vec<OriginAirport>,
    pub search_criteria: SearchCriteria,
    /// Cheapest-first, truncated to the requested result cap.
    pub destinations: Vec<DestinationSuggestion>,
    /// Destinations found before truncation.
    pub total_found: usize,
}
