//! Geocoding collaborator contract.
//!
//! Geocoding is provided by the embedding application; the engine only
//! needs a coordinate or "not found" for the free-text starting location.

use std::future::Future;
use std::pin::Pin;

use crate::domain::GeoPoint;

pub trait Geocoder: Send + Sync {
    fn geocode<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<GeoPoint>> + Send + 'a>>;
}
