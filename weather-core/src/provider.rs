use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    Config, Coordinates, Forecast, TemperatureUnit,
    error::{WeatherError, truncate_body},
};

pub mod nominatim;
pub mod open_meteo;

pub use nominatim::NominatimGeocoder;
pub use open_meteo::OpenMeteoClient;

/// Resolves a free-text city name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means no city or town matched the name.
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>, WeatherError>;
}

/// Fetches current and hourly temperatures for a location.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(
        &self,
        coordinates: Coordinates,
        days: u32,
        unit: TemperatureUnit,
    ) -> Result<Forecast, WeatherError>;
}

/// Build the HTTP client shared by both services.
pub fn http_client(config: &Config) -> Result<Client, WeatherError> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(WeatherError::Client)
}

/// GET `url` with `query`, check the status and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    service: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, WeatherError> {
    debug!(service, url, ?query, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| WeatherError::Transport { service, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| WeatherError::Transport { service, source })?;

    if !status.is_success() {
        return Err(WeatherError::Status {
            service,
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| WeatherError::Parse { service, source })
}
