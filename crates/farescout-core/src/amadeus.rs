//! Amadeus Self-Service API adapter.
//!
//! Wraps two endpoints behind [`TravelApi`]: Airport Nearest Relevant for
//! origin resolution and Flight Inspiration Search for cheapest-first
//! destination leads. Every call carries a bearer token from the shared
//! [`TokenCache`]; a 401 forces one refresh and one retry, never more.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{format_iso_date, IataCode, OriginAirport};
use crate::http_client::{HttpClient, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse};
use crate::provider::{AirportQuery, DestinationQuery, FareLead, ProviderError, TravelApi};
use crate::rate::RateGate;
use crate::token::TokenCache;

const AIRPORTS_ENDPOINT: &str = "/v1/reference-data/locations/airports";
const DESTINATIONS_ENDPOINT: &str = "/v1/shopping/flight-destinations";

/// Test-tier guidance for the Self-Service APIs.
const DEFAULT_QUOTA_PER_SECOND: u32 = 10;

pub struct AmadeusClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    tokens: Arc<TokenCache>,
    rate_gate: RateGate,
}

impl AmadeusClient {
    pub fn new(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        tokens: Arc<TokenCache>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            tokens,
            rate_gate: RateGate::new(Duration::from_secs(1), DEFAULT_QUOTA_PER_SECOND),
        }
    }

    pub fn with_rate_gate(mut self, rate_gate: RateGate) -> Self {
        self.rate_gate = rate_gate;
        self
    }

    /// Authenticated call returning the parsed response document.
    ///
    /// A rejected token is refreshed unconditionally and the call retried
    /// exactly once; a second rejection surfaces as an upstream error.
    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, ProviderError> {
        if !self.rate_gate.check() {
            return Err(ProviderError::rate_limited(
                "client-side quota exhausted for upstream calls",
            ));
        }

        let url = self.url_with_query(path, query);
        let token = self.tokens.get_valid_token().await?;
        let mut response = self.execute(method, &url, &token).await?;

        if response.is_unauthorized() {
            tracing::warn!(path, "provider rejected access token, refreshing once");
            let token = self.tokens.refresh_after_rejection(&token).await?;
            response = self.execute(method, &url, &token).await?;
        }

        if !response.is_success() {
            return Err(ProviderError::upstream(response.status, &response.body));
        }

        serde_json::from_str(&response.body)
            .map_err(|error| ProviderError::malformed(format!("unparsable provider response: {error}")))
    }

    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        token: &str,
    ) -> Result<HttpResponse, ProviderError> {
        let request = HttpRequest::new(method, url)
            .with_bearer(token)
            .with_header("accept", "application/json");

        self.http.execute(request).await.map_err(|error| match error.kind() {
            HttpErrorKind::Timeout => ProviderError::timeout(error.message()),
            _ => ProviderError::transport(error.message()),
        })
    }

    fn url_with_query(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{path}", self.base_url);
        for (index, (name, value)) in query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            url.push(separator);
            url.push_str(&urlencoding::encode(name));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

impl TravelApi for AmadeusClient {
    fn nearest_airports<'a>(
        &'a self,
        query: AirportQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<OriginAirport>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let params = vec![
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                ("radius", query.radius_km.to_string()),
                ("page[limit]", query.max_results.to_string()),
                ("sort", String::from("relevance")),
            ];

            let document = self.call(HttpMethod::Get, AIRPORTS_ENDPOINT, &params).await?;
            let payload: LocationsPayload = serde_json::from_value(document).map_err(|error| {
                ProviderError::malformed(format!("unparsable airport payload: {error}"))
            })?;

            Ok(payload
                .data
                .into_iter()
                .filter_map(normalize_airport)
                .collect())
        })
    }

    fn flight_destinations<'a>(
        &'a self,
        query: DestinationQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FareLead>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let mut params = vec![
                ("origin", query.origin.as_str().to_owned()),
                ("departureDate", format_iso_date(query.departure_date)),
                ("duration", query.duration_nights.to_string()),
                ("maxPrice", query.max_price.to_string()),
                ("viewBy", String::from("DESTINATION")),
            ];
            if query.non_stop_only {
                params.push(("nonStop", String::from("true")));
            }

            let document = self
                .call(HttpMethod::Get, DESTINATIONS_ENDPOINT, &params)
                .await?;
            let payload: DestinationsPayload = serde_json::from_value(document).map_err(|error| {
                ProviderError::malformed(format!("unparsable destination payload: {error}"))
            })?;

            Ok(payload
                .data
                .into_iter()
                .filter_map(normalize_lead)
                .collect())
        })
    }
}

fn normalize_airport(record: LocationRecord) -> Option<OriginAirport> {
    let iata = IataCode::parse(record.iata_code.as_deref()?).ok()?;
    let name = record
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| iata.as_str().to_owned());

    Some(OriginAirport {
        iata,
        name,
        distance_km: record.distance.and_then(|distance| distance.value),
    })
}

/// Records without a destination code or a parsable price are malformed
/// upstream data and are dropped, not errors.
fn normalize_lead(record: DestinationRecord) -> Option<FareLead> {
    let destination = IataCode::parse(record.destination.as_deref()?).ok()?;
    let price: f64 = record.price?.total?.parse().ok()?;
    if !price.is_finite() {
        return None;
    }

    Some(FareLead {
        destination,
        price,
        departure_date: record.departure_date,
        return_date: record.return_date,
    })
}

#[derive(Debug, Deserialize)]
struct LocationsPayload {
    #[serde(default)]
    data: Vec<LocationRecord>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    #[serde(rename = "iataCode")]
    iata_code: Option<String>,
    name: Option<String>,
    distance: Option<DistanceRecord>,
}

#[derive(Debug, Deserialize)]
struct DistanceRecord {
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DestinationsPayload {
    #[serde(default)]
    data: Vec<DestinationRecord>,
}

#[derive(Debug, Deserialize)]
struct DestinationRecord {
    destination: Option<String>,
    #[serde(rename = "departureDate")]
    departure_date: Option<String>,
    #[serde(rename = "returnDate")]
    return_date: Option<String>,
    price: Option<PriceRecord>,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    total: Option<String>,
}
