//! Environment-based service configuration.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {name} is not set")]
    MissingVar { name: &'static str },
}

/// Service settings, read once at startup.
///
/// Each knob is looked up under the `FARESCOUT_` prefix first, then under
/// the bare provider name, so existing Amadeus credentials work unchanged.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_port: u16,
    pub amadeus_client_id: String,
    pub amadeus_client_secret: String,
    pub amadeus_base_url: String,
    pub allowed_origins: Vec<String>,
    pub currency: String,
    pub airport_radius_km: u32,
    pub search_quota_per_second: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            listen_port: parse_or("FARESCOUT_PORT", 8000),
            amadeus_client_id: required("FARESCOUT_AMADEUS_CLIENT_ID", "AMADEUS_CLIENT_ID")?,
            amadeus_client_secret: required(
                "FARESCOUT_AMADEUS_CLIENT_SECRET",
                "AMADEUS_CLIENT_SECRET",
            )?,
            amadeus_base_url: env::var("FARESCOUT_AMADEUS_BASE_URL")
                .unwrap_or_else(|_| String::from("https://test.api.amadeus.com")),
            allowed_origins: env::var("FARESCOUT_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| String::from("http://localhost:3000"))
                .split(',')
                .map(|origin| origin.trim().to_owned())
                .filter(|origin| !origin.is_empty())
                .collect(),
            currency: env::var("FARESCOUT_CURRENCY").unwrap_or_else(|_| String::from("GBP")),
            airport_radius_km: parse_or("FARESCOUT_AIRPORT_RADIUS_KM", 150),
            search_quota_per_second: parse_or("FARESCOUT_SEARCH_QUOTA_PER_SECOND", 10),
        })
    }
}

fn required(primary: &'static str, fallback: &'static str) -> Result<String, ConfigError> {
    env::var(primary)
        .or_else(|_| env::var(fallback))
        .map_err(|_| ConfigError::MissingVar { name: primary })
}

fn parse_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
