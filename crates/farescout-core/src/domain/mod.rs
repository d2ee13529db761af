//! Domain types for destination suggestion requests and results.
//!
//! All request-facing types validate their invariants at construction, so
//! an in-range [`SuggestionRequest`] is the only kind that exists once
//! deserialization succeeds.

mod dates;
mod iata;
mod request;
mod suggestion;

pub use dates::{format_iso_date, parse_iso_date, YearMonth};
pub use iata::IataCode;
pub use request::{GeoPoint, SuggestionRequest, TravelDates};
pub use suggestion::{DestinationSuggestion, OriginAirport, SearchCriteria, SuggestionResponse};
