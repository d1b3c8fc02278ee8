use std::env;

use geobox::Coordinate;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoding service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("geocoding service answered with a malformed coordinate: {0}")]
    Malformed(String),

    #[error("geocoding service answered with an out-of-range coordinate: {0}")]
    Geo(#[from] geobox::GeoError),
}

/// Something that can turn a free-text address into a coordinate.
/// `Ok(None)` is the explicit "no match" outcome, not an error.
pub trait GeocodeSource {
    fn resolve(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Client identifier the service requires in the `User-Agent` header.
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        NominatimConfig {
            base_url: "https://nominatim.openstreetmap.org".into(),
            user_agent: "animal-lookup".into(),
        }
    }
}

impl NominatimConfig {
    /// Reads `GEOCODER_BASE_URL` and `GEOCODER_USER_AGENT`, falling back to
    /// defaults.
    pub fn from_env() -> NominatimConfig {
        let defaults = NominatimConfig::default();
        NominatimConfig {
            base_url: env::var("GEOCODER_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: env::var("GEOCODER_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}

/// Blocking client for a Nominatim-style geocoding service.
pub struct NominatimClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<NominatimClient, GeocodeError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .build()?;
        Ok(NominatimClient {
            http,
            base_url: config.base_url,
        })
    }
}

// Nominatim serializes coordinates as strings
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Place {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| GeocodeError::Malformed(self.lat.clone()))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| GeocodeError::Malformed(self.lon.clone()))?;
        Ok(Coordinate::new(lon, lat)?)
    }
}

impl GeocodeSource for NominatimClient {
    fn resolve(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        debug!(%url, address, "geocoding address");

        let response = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let places: Vec<Place> = response.json()?;
        match places.first() {
            Some(place) => Ok(Some(place.coordinate()?)),
            None => Ok(None),
        }
    }
}

/// Joins the four address fields into one free-text query and delegates to
/// the source.
pub fn resolve_address(
    source: &impl GeocodeSource,
    street: &str,
    city: &str,
    state: &str,
    country: &str,
) -> Result<Option<Coordinate>, GeocodeError> {
    let address = format!("{street}, {city}, {state}, {country}");
    source.resolve(&address)
}
