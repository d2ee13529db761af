//! UK location geocoding via postcodes.io with a built-in city table.
//!
//! Postcodes resolve through the free postcodes.io lookup; recognized city
//! names short-circuit to a static table. Any lookup trouble is a miss,
//! not an error; the engine turns a miss into its own rejection.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use farescout_core::{GeoPoint, Geocoder, HttpClient, HttpRequest};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";
const LOOKUP_TIMEOUT_MS: u64 = 10_000;

/// Major UK cities, lowercase name to coordinates.
const UK_CITIES: &[(&str, f64, f64)] = &[
    ("aberdeen", 57.1497, -2.0943),
    ("belfast", 54.5973, -5.9301),
    ("birmingham", 52.4862, -1.8904),
    ("brighton", 50.8225, -0.1372),
    ("bristol", 51.4545, -2.5879),
    ("cambridge", 52.2053, 0.1218),
    ("cardiff", 51.4816, -3.1791),
    ("edinburgh", 55.9533, -3.1883),
    ("glasgow", 55.8642, -4.2518),
    ("leeds", 53.8008, -1.5491),
    ("leicester", 52.6369, -1.1398),
    ("liverpool", 53.4084, -2.9916),
    ("london", 51.5074, -0.1278),
    ("luton", 51.8787, -0.42),
    ("manchester", 53.4808, -2.2426),
    ("newcastle", 54.9783, -1.6178),
    ("norwich", 52.6309, 1.2974),
    ("nottingham", 52.9548, -1.1581),
    ("oxford", 51.752, -1.2577),
    ("sheffield", 53.3811, -1.4701),
    ("southampton", 50.9097, -1.4044),
    ("york", 53.9591, -1.0815),
];

pub struct PostcodesIoGeocoder {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl PostcodesIoGeocoder {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn lookup(&self, location: &str) -> Option<GeoPoint> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return None;
        }

        if looks_like_postcode(trimmed) {
            if let Some(point) = self.lookup_postcode(trimmed).await {
                return Some(point);
            }
        }

        if let Some(point) = city_coordinates(trimmed) {
            return Some(point);
        }

        // Last resort for inputs the postcode heuristic missed.
        if !looks_like_postcode(trimmed) {
            return self.lookup_postcode(trimmed).await;
        }
        None
    }

    async fn lookup_postcode(&self, raw: &str) -> Option<GeoPoint> {
        let normalized = normalize_postcode(raw);
        let url = format!(
            "{}/postcodes/{}",
            self.base_url,
            urlencoding::encode(&normalized)
        );
        let request = HttpRequest::get(url).with_timeout_ms(LOOKUP_TIMEOUT_MS);

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(postcode = %normalized, %error, "postcode lookup failed");
                return None;
            }
        };
        if !response.is_success() {
            tracing::debug!(postcode = %normalized, status = response.status, "postcode not found");
            return None;
        }

        let lookup: PostcodeLookup = serde_json::from_str(&response.body).ok()?;
        let result = lookup.result?;
        Some(GeoPoint {
            latitude: result.latitude,
            longitude: result.longitude,
        })
    }
}

impl Geocoder for PostcodesIoGeocoder {
    fn geocode<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<GeoPoint>> + Send + 'a>> {
        Box::pin(self.lookup(location))
    }
}

fn city_coordinates(name: &str) -> Option<GeoPoint> {
    let needle = name.to_ascii_lowercase();
    UK_CITIES
        .iter()
        .find(|(city, _, _)| *city == needle)
        .map(|(_, latitude, longitude)| GeoPoint {
            latitude: *latitude,
            longitude: *longitude,
        })
}

/// Heuristic UK postcode shape: outward code of letters and digits plus an
/// inward code of digit-letter-letter, 5 to 7 characters overall.
fn looks_like_postcode(input: &str) -> bool {
    let compact: Vec<char> = input
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_uppercase())
        .collect();

    if !(5..=7).contains(&compact.len()) {
        return false;
    }
    if !compact.iter().all(|ch| ch.is_ascii_alphanumeric()) {
        return false;
    }

    let (outward, inward) = compact.split_at(compact.len() - 3);
    outward.first().is_some_and(|ch| ch.is_ascii_alphabetic())
        && outward.iter().any(|ch| ch.is_ascii_digit())
        && inward[0].is_ascii_digit()
        && inward[1].is_ascii_alphabetic()
        && inward[2].is_ascii_alphabetic()
}

/// Uppercase and re-space: `en76tb` becomes `EN7 6TB`.
fn normalize_postcode(input: &str) -> String {
    let compact: Vec<char> = input
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_uppercase())
        .collect();

    if compact.len() > 3 {
        let (outward, inward) = compact.split_at(compact.len() - 3);
        format!(
            "{} {}",
            outward.iter().collect::<String>(),
            inward.iter().collect::<String>()
        )
    } else {
        compact.into_iter().collect()
    }
}

#[derive(Debug, Deserialize)]
struct PostcodeLookup {
    result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
struct PostcodeResult {
    latitude: f64,
    longitude: f64,
}
