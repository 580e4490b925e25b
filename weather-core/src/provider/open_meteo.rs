//! Open-Meteo forecast client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::{Config, Coordinates, Forecast, TemperatureUnit, error::WeatherError};

use super::{ForecastProvider, get_json};

const SERVICE: &str = "Open-Meteo";
const VARIABLE: &str = "temperature_2m";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), http }
    }

    pub fn from_config(config: &Config, http: Client) -> Self {
        Self::new(config.forecast_url.clone(), http)
    }
}

/// Query parameters for a forecast request.
pub fn forecast_query(
    coordinates: Coordinates,
    days: u32,
    unit: TemperatureUnit,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("latitude", coordinates.latitude.to_string()),
        ("longitude", coordinates.longitude.to_string()),
        ("current", VARIABLE.to_string()),
        ("hourly", VARIABLE.to_string()),
        ("forecast_days", days.to_string()),
    ];
    if let Some(value) = unit.query_value() {
        query.push(("temperature_unit", value.to_string()));
    }
    query
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        coordinates: Coordinates,
        days: u32,
        unit: TemperatureUnit,
    ) -> Result<Forecast, WeatherError> {
        let query = forecast_query(coordinates, days, unit);
        get_json(&self.http, SERVICE, &self.url, &query).await
    }
}
