//! # Farescout Core
//!
//! Destination-suggestion engine and upstream provider contracts.
//!
//! ## Overview
//!
//! Given a free-text starting location, a travel-date specification, and a
//! per-person budget, the engine geocodes the location, resolves nearby
//! origin airports, fans one cheapest-destination search out per
//! (origin × date window) pair, and merges the results into a ranked,
//! deduplicated list with a budget-relative reason per destination.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`amadeus`] | Amadeus Self-Service API adapter |
//! | [`catalog`] | Static destination metadata for enrichment |
//! | [`domain`] | Validated request/response domain types |
//! | [`engine`] | Fan-out search and best-price merge |
//! | [`error`] | Validation and engine error taxonomies |
//! | [`geocode`] | Geocoding collaborator contract |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`provider`] | Provider trait seam and structured errors |
//! | [`rate`] | Client-side rate gate for upstream calls |
//! | [`token`] | OAuth token cache with double-checked refresh |
//! | [`windows`] | Candidate date-window derivation |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use farescout_core::{
//!     AmadeusClient, ClientCredentials, EngineConfig, ReqwestHttpClient,
//!     SuggestionEngine, SuggestionRequest, TokenCache, TravelDates, YearMonth,
//! };
//!
//! let http = Arc::new(ReqwestHttpClient::new());
//! let tokens = Arc::new(TokenCache::new(base_url, credentials, http.clone()));
//! let api = Arc::new(AmadeusClient::new(base_url, http, tokens));
//! let engine = SuggestionEngine::new(api, geocoder, EngineConfig::default());
//!
//! let request = SuggestionRequest::new(
//!     "EN7 6TB",
//!     TravelDates::Month { month: YearMonth::parse("2025-05")? },
//!     200,
//! )?;
//! let response = engine.suggest(&request).await?;
//! ```
//!
//! ## Failure Model
//!
//! Only three things end a request early: an unresolvable location, an
//! empty airport search, and an authentication failure against the
//! provider. Individual fan-out legs that time out or error are logged and
//! skipped; if every leg fails the response is valid and empty.

pub mod amadeus;
pub mod catalog;
pub mod domain;
pub mod engine;
pub mod error;
pub mod geocode;
pub mod http_client;
pub mod provider;
pub mod rate;
pub mod token;
pub mod windows;

mod rank;

pub use amadeus::AmadeusClient;
pub use catalog::{destination_info, DestinationInfo};
pub use domain::{
    format_iso_date, parse_iso_date, DestinationSuggestion, GeoPoint, IataCode, OriginAirport,
    SearchCriteria, SuggestionRequest, SuggestionResponse, TravelDates, YearMonth,
};
pub use engine::{EngineConfig, SuggestionEngine};
pub use error::{SuggestError, ValidationError};
pub use geocode::Geocoder;
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use provider::{
    AirportQuery, DestinationQuery, FareLead, ProviderError, ProviderErrorKind, TravelApi,
};
pub use rate::RateGate;
pub use token::{ClientCredentials, TokenCache};
pub use windows::{derive_windows, DateWindow, MAX_WINDOWS};
