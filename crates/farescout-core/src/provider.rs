//! Upstream travel-data provider contract.
//!
//! The engine talks to the provider exclusively through [`TravelApi`], so
//! behavior tests run against scripted fakes and the production adapter
//! ([`crate::AmadeusClient`]) stays swappable.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use time::Date;

use crate::domain::{IataCode, OriginAirport};

/// Classification of an upstream provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Credential exchange or token rejection that a forced refresh did not
    /// resolve. Fatal for the whole request.
    Auth,
    /// The fixed per-call timeout elapsed. Never retried.
    Timeout,
    /// Non-success upstream status other than the single retried 401.
    Upstream,
    /// Connection-level failure before any status was received.
    Transport,
    /// The client-side rate gate had no budget for the call.
    RateLimited,
    /// The upstream answered with a document this client cannot parse.
    Malformed,
}

/// Structured provider error carried by failed calls.
///
/// Only [`ProviderErrorKind::Auth`] escalates past the aggregator; every
/// other kind is contained as a skipped fan-out leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    status: Option<u16>,
}

/// Upstream bodies are diagnostics, not payloads; keep log lines bounded.
const BODY_EXCERPT_LEN: usize = 256;

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= BODY_EXCERPT_LEN {
        return trimmed.to_owned();
    }
    let mut cut = BODY_EXCERPT_LEN;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…", &trimmed[..cut])
}

impl ProviderError {
    pub fn auth(status: u16, body: &str) -> Self {
        Self {
            kind: ProviderErrorKind::Auth,
            message: format!("credential exchange rejected: {}", excerpt(body)),
            status: Some(status),
        }
    }

    pub fn auth_unreachable(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Auth,
            message: message.into(),
            status: None,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Timeout,
            message: message.into(),
            status: None,
        }
    }

    pub fn upstream(status: u16, body: &str) -> Self {
        Self {
            kind: ProviderErrorKind::Upstream,
            message: format!("upstream returned status {status}: {}", excerpt(body)),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::RateLimited,
            message: message.into(),
            status: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Malformed,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Auth => "provider.auth",
            ProviderErrorKind::Timeout => "provider.timeout",
            ProviderErrorKind::Upstream => "provider.upstream",
            ProviderErrorKind::Transport => "provider.transport",
            ProviderErrorKind::RateLimited => "provider.rate_limited",
            ProviderErrorKind::Malformed => "provider.malformed",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// Parameters for a nearby-airport search around a coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirportQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: u32,
    pub max_results: u8,
}

/// Parameters for one fan-out leg: cheapest destinations from an origin
/// for a departure date and trip length, under a price ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationQuery {
    pub origin: IataCode,
    pub departure_date: Date,
    pub duration_nights: u8,
    pub max_price: u32,
    pub non_stop_only: bool,
}

/// One normalized destination record from a fan-out leg. Upstream entries
/// without a destination code or a parsable price never become leads.
#[derive(Debug, Clone, PartialEq)]
pub struct FareLead {
    pub destination: IataCode,
    pub price: f64,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
}

/// Provider adapter contract.
///
/// Implementations must be `Send + Sync`; one adapter is shared across all
/// concurrent requests.
pub trait TravelApi: Send + Sync {
    /// Airports near a coordinate, in upstream relevance order.
    ///
    /// An empty result is a valid answer, not an error; the caller decides
    /// what "no airports nearby" means for the request.
    fn nearest_airports<'a>(
        &'a self,
        query: AirportQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<OriginAirport>, ProviderError>> + Send + 'a>>;

    /// Cheapest-first destination leads for one (origin, date window) leg.
    fn flight_destinations<'a>(
        &'a self,
        query: DestinationQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FareLead>, ProviderError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_keeps_status_and_truncates_body() {
        let long_body = "x".repeat(BODY_EXCERPT_LEN * 2);
        let error = ProviderError::upstream(503, &long_body);

        assert_eq!(error.kind(), ProviderErrorKind::Upstream);
        assert_eq!(error.status(), Some(503));
        assert!(error.message().len() < long_body.len());
    }

    #[test]
    fn codes_distinguish_kinds() {
        assert_eq!(ProviderError::timeout("t").code(), "provider.timeout");
        assert_eq!(ProviderError::auth(401, "denied").code(), "provider.auth");
        assert_eq!(
            ProviderError::rate_limited("no budget").code(),
            "provider.rate_limited"
        );
    }
}
