use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use places_types::Coordinates;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Unable to locate address name: {0}")]
    NotFound(String),
    #[error("Geocoder request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Geocoder returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, place_name: &str) -> Result<Coordinates, GeocodeError>;
}

// -- Nominatim --

/// OpenStreetMap Nominatim search client.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

/// The subset of a `format=jsonv2` search hit we need. Nominatim sends the
/// coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, place_name: &str) -> Result<Coordinates, GeocodeError> {
        let hits: Vec<SearchHit> = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", place_name), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("Nominatim returned {} hit(s) for {:?}", hits.len(), place_name);
        first_hit(place_name, hits)
    }
}

fn first_hit(place_name: &str, hits: Vec<SearchHit>) -> Result<Coordinates, GeocodeError> {
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(place_name.to_string()))?;

    let longitude: f64 = hit
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude {:?}", hit.lon)))?;
    let latitude: f64 = hit
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude {:?}", hit.lat)))?;

    Coordinates::new(longitude, latitude).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))
}

// -- Static gazetteer --

/// Fixed name to coordinates table that stands in for Nominatim in tests.
/// Lookups ignore case and surrounding whitespace.
#[derive(Debug, Default, Clone)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, name: &str, coordinates: Coordinates) -> Self {
        self.places.insert(key(name), coordinates);
        self
    }
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn resolve(&self, place_name: &str) -> Result<Coordinates, GeocodeError> {
        self.places
            .get(&key(place_name))
            .copied()
            .ok_or_else(|| GeocodeError::NotFound(place_name.to_string()))
    }
}
