//! Suggestion engine: airport resolution, concurrent fan-out search, and
//! best-price merge.
//!
//! One request fans out into at most `max_origins × MAX_WINDOWS` searches.
//! Legs run concurrently and fail independently; the merge keeps the
//! cheapest observed price per destination, so leg ordering only matters
//! for tie-breaks, which are resolved in launch order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::task::JoinSet;

use crate::domain::{
    format_iso_date, GeoPoint, IataCode, OriginAirport, SearchCriteria, SuggestionRequest,
    SuggestionResponse,
};
use crate::error::SuggestError;
use crate::geocode::Geocoder;
use crate::provider::{
    AirportQuery, DestinationQuery, FareLead, ProviderError, ProviderErrorKind, TravelApi,
};
use crate::rank::rank_candidates;
use crate::windows::{derive_windows, DateWindow};

/// Engine-level knobs that are deployment policy rather than request input.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Airport search radius around the geocoded location.
    pub radius_km: u32,
    /// Currency the upstream quotes in; echoed on every suggestion.
    pub currency: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            radius_km: 150,
            currency: String::from("GBP"),
        }
    }
}

/// Per-request accumulator for one destination code.
///
/// `best_price` is `None` until a leg produces a price; `seen_order` is the
/// insertion index used to keep exact-tie ranking deterministic.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DestinationCandidate {
    pub(crate) code: IataCode,
    pub(crate) best_price: Option<f64>,
    pub(crate) best_origin: IataCode,
    pub(crate) departure_date: Option<String>,
    pub(crate) return_date: Option<String>,
    pub(crate) seen_order: usize,
}

pub struct SuggestionEngine {
    api: Arc<dyn TravelApi>,
    geocoder: Arc<dyn Geocoder>,
    config: EngineConfig,
}

impl SuggestionEngine {
    pub fn new(api: Arc<dyn TravelApi>, geocoder: Arc<dyn Geocoder>, config: EngineConfig) -> Self {
        Self {
            api,
            geocoder,
            config,
        }
    }

    /// Run the full suggestion pipeline for one request.
    pub async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestError> {
        let location = request.starting_location.trim();

        let point = self
            .geocoder
            .geocode(location)
            .await
            .ok_or_else(|| SuggestError::LocationNotFound(location.to_owned()))?;
        tracing::debug!(
            location,
            latitude = point.latitude,
            longitude = point.longitude,
            "geocoded starting location"
        );

        let origins = self.resolve_origins(point, request.max_origins).await?;
        if origins.is_empty() {
            return Err(SuggestError::NoAirportsNearby {
                location: location.to_owned(),
                radius_km: self.config.radius_km,
            });
        }
        tracing::info!(
            origins = ?origins.iter().map(|o| o.iata.as_str()).collect::<Vec<_>>(),
            "resolved origin airports"
        );

        let today = OffsetDateTime::now_utc().date();
        let windows = derive_windows(&request.travel_dates, request.trip_length_nights, today);

        let candidates = self.fan_out(&origins, &windows, request).await?;
        let (destinations, total_found) = rank_candidates(
            candidates,
            request.budget_per_person,
            request.travelers,
            request.max_results,
            &self.config.currency,
        );
        tracing::info!(total_found, returned = destinations.len(), "ranked destinations");

        Ok(SuggestionResponse {
            origins_used: origins,
            search_criteria: SearchCriteria {
                starting_location: request.starting_location.clone(),
                travel_dates: request.travel_dates.clone(),
                budget_per_person: request.budget_per_person,
                travelers: request.travelers,
                trip_length_nights: request.trip_length_nights,
                non_stop_only: request.non_stop_only,
            },
            destinations,
            total_found,
        })
    }

    async fn resolve_origins(
        &self,
        point: GeoPoint,
        max_origins: u8,
    ) -> Result<Vec<OriginAirport>, SuggestError> {
        self.api
            .nearest_airports(AirportQuery {
                latitude: point.latitude,
                longitude: point.longitude,
                radius_km: self.config.radius_km,
                max_results: max_origins,
            })
            .await
            .map_err(|error| match error.kind() {
                ProviderErrorKind::Auth => SuggestError::Auth(error),
                _ => SuggestError::Upstream(error),
            })
    }

    /// Run every (origin, window) leg concurrently and merge the outcomes.
    ///
    /// Leg failures other than authentication are contained here: the leg
    /// is logged and skipped. Outcomes are merged in launch order, not
    /// completion order, so exact-price ties resolve the same way on every
    /// run.
    async fn fan_out(
        &self,
        origins: &[OriginAirport],
        windows: &[DateWindow],
        request: &SuggestionRequest,
    ) -> Result<Vec<DestinationCandidate>, SuggestError> {
        let legs: Vec<(IataCode, DateWindow)> = origins
            .iter()
            .flat_map(|origin| {
                windows
                    .iter()
                    .map(move |window| (origin.iata.clone(), *window))
            })
            .collect();

        let mut tasks = JoinSet::new();
        for (index, (origin, window)) in legs.iter().enumerate() {
            let api = Arc::clone(&self.api);
            let query = DestinationQuery {
                origin: origin.clone(),
                departure_date: window.departure,
                duration_nights: window.nights,
                max_price: request.budget_per_person,
                non_stop_only: request.non_stop_only,
            };
            tasks.spawn(async move { (index, api.flight_destinations(query).await) });
        }

        let mut outcomes: Vec<Option<Result<Vec<FareLead>, ProviderError>>> =
            (0..legs.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(join_error) => tracing::warn!(%join_error, "fan-out task aborted"),
            }
        }

        let mut accumulator: HashMap<IataCode, DestinationCandidate> = HashMap::new();
        for ((origin, window), outcome) in legs.iter().zip(outcomes) {
            match outcome {
                Some(Ok(leads)) => merge_leads(&mut accumulator, origin, leads),
                Some(Err(error)) if error.kind() == ProviderErrorKind::Auth => {
                    // Without a token every remaining leg is doomed too.
                    return Err(SuggestError::Auth(error));
                }
                Some(Err(error)) => tracing::warn!(
                    origin = %origin,
                    departure = %format_iso_date(window.departure),
                    error = %error,
                    "skipping failed fan-out leg"
                ),
                None => {}
            }
        }

        Ok(accumulator.into_values().collect())
    }
}

/// Fold one leg's leads into the accumulator, keeping the strictly lower
/// price per destination; an equal price never displaces the incumbent.
fn merge_leads(
    accumulator: &mut HashMap<IataCode, DestinationCandidate>,
    origin: &IataCode,
    leads: Vec<FareLead>,
) {
    for lead in leads {
        let seen_order = accumulator.len();
        match accumulator.entry(lead.destination.clone()) {
            Entry::Occupied(mut entry) => {
                let candidate = entry.get_mut();
                if candidate.best_price.map_or(true, |best| lead.price < best) {
                    candidate.best_price = Some(lead.price);
                    candidate.best_origin = origin.clone();
                    candidate.departure_date = lead.departure_date;
                    candidate.return_date = lead.return_date;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(DestinationCandidate {
                    code: lead.destination,
                    best_price: Some(lead.price),
                    best_origin: origin.clone(),
                    departure_date: lead.departure_date,
                    return_date: lead.return_date,
                    seen_order,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> IataCode {
        IataCode::parse(raw).expect("valid code")
    }

    fn lead(destination: &str, price: f64) -> FareLead {
        FareLead {
            destination: code(destination),
            price,
            departure_date: Some(String::from("2025-05-02")),
            return_date: Some(String::from("2025-05-05")),
        }
    }

    #[test]
    fn merge_keeps_the_minimum_across_legs() {
        let mut accumulator = HashMap::new();

        merge_leads(&mut accumulator, &code("LTN"), vec![lead("BCN", 120.0)]);
        merge_leads(&mut accumulator, &code("STN"), vec![lead("BCN", 95.0)]);
        merge_leads(&mut accumulator, &code("LHR"), vec![lead("BCN", 130.0)]);

        let candidate = &accumulator[&code("BCN")];
        assert_eq!(candidate.best_price, Some(95.0));
        assert_eq!(candidate.best_origin, code("STN"));
    }

    #[test]
    fn exact_tie_keeps_the_first_seen_leg() {
        let mut accumulator = HashMap::new();

        merge_leads(&mut accumulator, &code("LTN"), vec![lead("BCN", 80.0)]);
        let mut tied = lead("BCN", 80.0);
        tied.departure_date = Some(String::from("2025-06-01"));
        merge_leads(&mut accumulator, &code("STN"), vec![tied]);

        let candidate = &accumulator[&code("BCN")];
        assert_eq!(candidate.best_origin, code("LTN"));
        assert_eq!(candidate.departure_date.as_deref(), Some("2025-05-02"));
    }

    #[test]
    fn merge_order_is_commutative_on_the_final_price() {
        let legs: Vec<(IataCode, Vec<FareLead>)> = vec![
            (code("LTN"), vec![lead("BCN", 120.0), lead("AMS", 90.0)]),
            (code("STN"), vec![lead("BCN", 95.0)]),
            (code("LGW"), vec![lead("AMS", 110.0), lead("BCN", 99.0)]),
        ];

        let mut forward = HashMap::new();
        for (origin, leads) in legs.clone() {
            merge_leads(&mut forward, &origin, leads);
        }

        let mut reverse = HashMap::new();
        for (origin, leads) in legs.into_iter().rev() {
            merge_leads(&mut reverse, &origin, leads);
        }

        assert_eq!(
            forward[&code("BCN")].best_price,
            reverse[&code("BCN")].best_price
        );
        assert_eq!(
            forward[&code("AMS")].best_price,
            reverse[&code("AMS")].best_price
        );
    }

    #[test]
    fn seen_order_tracks_first_insertion() {
        let mut accumulator = HashMap::new();

        merge_leads(
            &mut accumulator,
            &code("LTN"),
            vec![lead("BCN", 120.0), lead("AMS", 90.0)],
        );
        merge_leads(&mut accumulator, &code("STN"), vec![lead("BCN", 70.0)]);

        assert_eq!(accumulator[&code("BCN")].seen_order, 0);
        assert_eq!(accumulator[&code("AMS")].seen_order, 1);
    }
}
