use serde::{Deserialize, Serialize};
use time::Date;

use super::dates::iso_date;
use super::YearMonth;
use crate::ValidationError;

/// Geocoded coordinate pair produced by the geocoding collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Travel-date specification.
///
/// Wire shape matches the public API: `{"type": "month", "month": "2025-05"}`.
/// A flexible specification with no listed months falls back to the next
/// three calendar months at search time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TravelDates {
    /// Exact range. The end date is informational; searches anchor at the
    /// start date with the requested trip length.
    Specific {
        #[serde(with = "iso_date")]
        start_date: Date,
        #[serde(default, with = "iso_date::option")]
        end_date: Option<Date>,
    },
    /// Any time in a single month.
    Month { month: YearMonth },
    /// Several candidate months, searched in listed order.
    Flexible {
        #[serde(default)]
        preferred_months: Vec<YearMonth>,
    },
}

const TRAVELERS_RANGE: (u8, u8) = (1, 20);
const NIGHTS_RANGE: (u8, u8) = (1, 14);
const MAX_ORIGINS_RANGE: (u8, u8) = (1, 6);
const MAX_RESULTS_RANGE: (u16, u16) = (1, 100);

/// A destination-suggestion search request, validated on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSuggestionRequest")]
pub struct SuggestionRequest {
    pub starting_location: String,
    pub travel_dates: TravelDates,
    pub budget_per_person: u32,
    pub travelers: u8,
    pub trip_length_nights: u8,
    pub max_origins: u8,
    pub max_results: u16,
    pub non_stop_only: bool,
}

impl SuggestionRequest {
    /// Build a request with the documented defaults for the optional knobs
    /// (1 traveler, 3 nights, 4 origins, 30 results, any number of stops).
    pub fn new(
        starting_location: impl Into<String>,
        travel_dates: TravelDates,
        budget_per_person: u32,
    ) -> Result<Self, ValidationError> {
        RawSuggestionRequest {
            starting_location: starting_location.into(),
            travel_dates,
            budget_per_person,
            travelers: default_travelers(),
            trip_length_nights: default_nights(),
            max_origins: default_max_origins(),
            max_results: default_max_results(),
            non_stop_only: false,
        }
        .try_into()
    }
}

fn default_travelers() -> u8 {
    1
}

fn default_nights() -> u8 {
    3
}

fn default_max_origins() -> u8 {
    4
}

fn default_max_results() -> u16 {
    30
}

/// Unvalidated wire shape; all range checks happen in the `TryFrom` bridge.
#[derive(Debug, Deserialize)]
struct RawSuggestionRequest {
    starting_location: String,
    travel_dates: TravelDates,
    budget_per_person: u32,
    #[serde(default = "default_travelers")]
    travelers: u8,
    #[serde(default = "default_nights")]
    trip_length_nights: u8,
    #[serde(default = "default_max_origins")]
    max_origins: u8,
    #[serde(default = "default_max_results")]
    max_results: u16,
    #[serde(default)]
    non_stop_only: bool,
}

impl TryFrom<RawSuggestionRequest> for SuggestionRequest {
    type Error = ValidationError;

    fn try_from(raw: RawSuggestionRequest) -> Result<Self, Self::Error> {
        if raw.starting_location.trim().is_empty() {
            return Err(ValidationError::EmptyLocation);
        }
        if raw.budget_per_person == 0 {
            return Err(ValidationError::NonPositiveBudget);
        }
        check_range_u8(raw.travelers, TRAVELERS_RANGE, |value, (min, max)| {
            ValidationError::TravelersOutOfRange { value, min, max }
        })?;
        check_range_u8(raw.trip_length_nights, NIGHTS_RANGE, |value, (min, max)| {
            ValidationError::NightsOutOfRange { value, min, max }
        })?;
        check_range_u8(raw.max_origins, MAX_ORIGINS_RANGE, |value, (min, max)| {
            ValidationError::MaxOriginsOutOfRange { value, min, max }
        })?;
        if raw.max_results < MAX_RESULTS_RANGE.0 || raw.max_results > MAX_RESULTS_RANGE.1 {
            return Err(ValidationError::MaxResultsOutOfRange {
                value: raw.max_results,
                min: MAX_RESULTS_RANGE.0,
                max: MAX_RESULTS_RANGE.1,
            });
        }

        Ok(Self {
            starting_location: raw.starting_location,
            travel_dates: raw.travel_dates,
            budget_per_person: raw.budget_per_person,
            travelers: raw.travelers,
            trip_length_nights: raw.trip_length_nights,
            max_origins: raw.max_origins,
            max_results: raw.max_results,
            non_stop_only: raw.non_stop_only,
        })
    }
}

fn check_range_u8(
    value: u8,
    range: (u8, u8),
    to_error: impl FnOnce(u8, (u8, u8)) -> ValidationError,
) -> Result<(), ValidationError> {
    if value < range.0 || value > range.1 {
        return Err(to_error(value, range));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "starting_location": "EN7 6TB",
            "travel_dates": {"type": "month", "month": "2025-05"},
            "budget_per_person": 200
        }"#;

        let request: SuggestionRequest = serde_json::from_str(json).expect("must deserialize");
        assert_eq!(request.travelers, 1);
        assert_eq!(request.trip_length_nights, 3);
        assert_eq!(request.max_origins, 4);
        assert_eq!(request.max_results, 30);
        assert!(!request.non_stop_only);
        assert!(matches!(request.travel_dates, TravelDates::Month { .. }));
    }

    #[test]
    fn deserializes_specific_range() {
        let json = r#"{
            "starting_location": "London",
            "travel_dates": {
                "type": "specific",
                "start_date": "2026-03-15",
                "end_date": "2026-03-18"
            },
            "budget_per_person": 350,
            "travelers": 2
        }"#;

        let request: SuggestionRequest = serde_json::from_str(json).expect("must deserialize");
        match request.travel_dates {
            TravelDates::Specific {
                start_date,
                end_date,
            } => {
                assert_eq!(crate::format_iso_date(start_date), "2026-03-15");
                assert_eq!(end_date.map(crate::format_iso_date).as_deref(), Some("2026-03-18"));
            }
            other => panic!("expected specific dates, got {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let build = |travelers: u8, budget: u32| {
            serde_json::from_str::<SuggestionRequest>(&format!(
                r#"{{
                    "starting_location": "London",
                    "travel_dates": {{"type": "flexible", "preferred_months": []}},
                    "budget_per_person": {budget},
                    "travelers": {travelers}
                }}"#
            ))
        };

        assert!(build(21, 200).is_err());
        assert!(build(0, 200).is_err());
        assert!(build(2, 0).is_err());
        assert!(build(2, 200).is_ok());
    }

    #[test]
    fn rejects_blank_location() {
        let result = SuggestionRequest::new(
            "   ",
            TravelDates::Flexible {
                preferred_months: Vec::new(),
            },
            200,
        );
        assert!(matches!(result, Err(ValidationError::EmptyLocation)));
    }
}
