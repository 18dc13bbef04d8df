//! HTTP geocoding adapter.
//!
//! Speaks the Google-style geocode JSON API: `status` plus a list of
//! `results`, the first of which carries `geometry.location`. The optimizer
//! never calls this itself; callers resolve addresses before quoting.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::coordinate::Coordinate;
use crate::traits::Geocoder;

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: String,
    /// Region bias, e.g. `in`.
    pub region: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            api_key: String::new(),
            region: "in".to_string(),
            timeout_secs: 10,
        }
    }
}

impl GeocoderConfig {
    /// Defaults overridden by `GEOCODER_API_KEY`, `GEOCODER_BASE_URL` and
    /// `GEOCODER_REGION` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("GEOCODER_API_KEY") {
            config.api_key = key;
        }
        if let Ok(url) = std::env::var("GEOCODER_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(region) = std::env::var("GEOCODER_REGION") {
            config.region = region;
        }
        config
    }
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("address is empty")]
    EmptyAddress,
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoding request denied: {}", .0.as_deref().unwrap_or("no reason given"))]
    RequestDenied(Option<String>),
    #[error("geocoding quota exceeded")]
    OverQueryLimit,
    #[error("address not found")]
    ZeroResults,
    #[error("geocoding failed with status {0}")]
    Status(String),
}

#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    config: GeocoderConfig,
    client: reqwest::blocking::Client,
}

impl HttpGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        debug!(address, "geocoding address");

        let body = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("address", address),
                ("region", self.config.region.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GeocodeResponse>())?;

        body.into_coordinate().inspect_err(|err| {
            warn!(address, %err, "geocoding failed");
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodeResponse {
    fn into_coordinate(self) -> Result<Coordinate, GeocodeError> {
        match self.status.as_str() {
            "OK" => self
                .results
                .into_iter()
                .next()
                .map(|result| Coordinate::new(result.geometry.location.lat, result.geometry.location.lng))
                .ok_or(GeocodeError::ZeroResults),
            "ZERO_RESULTS" => Err(GeocodeError::ZeroResults),
            "REQUEST_DENIED" => Err(GeocodeError::RequestDenied(self.error_message)),
            "OVER_QUERY_LIMIT" => Err(GeocodeError::OverQueryLimit),
            _ => Err(GeocodeError::Status(self.status)),
        }
    }
}
