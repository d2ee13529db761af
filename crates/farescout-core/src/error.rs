use thiserror::Error;

use crate::provider::ProviderError;

/// Validation and contract errors exposed by `farescout-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("IATA code must be exactly 3 ASCII letters: '{value}'")]
    InvalidIataCode { value: String },

    #[error("year-month must match YYYY-MM: '{value}'")]
    InvalidYearMonth { value: String },
    #[error("date must match YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("starting location cannot be empty")]
    EmptyLocation,
    #[error("budget per person must be positive")]
    NonPositiveBudget,
    #[error("travelers must be between {min} and {max}: {value}")]
    TravelersOutOfRange { value: u8, min: u8, max: u8 },
    #[error("trip length must be between {min} and {max} nights: {value}")]
    NightsOutOfRange { value: u8, min: u8, max: u8 },
    #[error("max origins must be between {min} and {max}: {value}")]
    MaxOriginsOutOfRange { value: u8, min: u8, max: u8 },
    #[error("max results must be between {min} and {max}: {value}")]
    MaxResultsOutOfRange { value: u16, min: u16, max: u16 },
}

/// Request-terminating failures from the suggestion engine.
///
/// Per-leg search failures never appear here; the aggregator contains them
/// and keeps going. Only unresolvable input, an empty airport search, or a
/// provider failure before any fan-out leg exists end the request early.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("could not resolve starting location '{0}'")]
    LocationNotFound(String),

    #[error("no airports found within {radius_km} km of '{location}'")]
    NoAirportsNearby { location: String, radius_km: u32 },

    #[error("upstream authentication failed: {0}")]
    Auth(ProviderError),

    #[error("upstream provider failure: {0}")]
    Upstream(ProviderError),
}
