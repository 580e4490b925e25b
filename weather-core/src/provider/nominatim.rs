//! Forward geocoding against Nominatim (OpenStreetMap).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{Config, Coordinates, error::WeatherError};

use super::{Geocoder, get_json};

const SERVICE: &str = "Nominatim";

/// Place types that count as a city for lookup purposes.
const CITY_TYPES: &[&str] = &["city", "town"];

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), http }
    }

    pub fn from_config(config: &Config, http: Client) -> Self {
        Self::new(config.geocoding_url.clone(), http)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(flatten)]
    coordinates: Coordinates,
}

/// First candidate typed "city" or "town", in the order the service returned them.
fn first_city(candidates: Vec<Candidate>) -> Option<Coordinates> {
    candidates
        .into_iter()
        .find(|c| c.kind.as_deref().is_some_and(|k| CITY_TYPES.contains(&k)))
        .map(|c| c.coordinates)
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>, WeatherError> {
        let query = [("city", city.to_string()), ("format", "json".to_string())];
        let candidates: Vec<Candidate> = get_json(&self.http, SERVICE, &self.url, &query).await?;

        debug!(candidates = candidates.len(), "geocoding candidates received");

        let found = first_city(candidates);
        match found {
            Some(c) => debug!(latitude = c.latitude, longitude = c.longitude, "resolved city"),
            None => debug!("no city or town among candidates"),
        }
        Ok(found)
    }
}
