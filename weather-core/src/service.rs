use tracing::{debug, instrument};

use crate::{
    Config, Forecast, TemperatureUnit,
    error::WeatherError,
    provider::{ForecastProvider, Geocoder, NominatimGeocoder, OpenMeteoClient, http_client},
};

/// City lookups chained into forecast requests.
///
/// Both operations return `Ok(None)` when the city cannot be resolved; no
/// forecast is requested in that case.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    forecasts: Box<dyn ForecastProvider>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn Geocoder>, forecasts: Box<dyn ForecastProvider>) -> Self {
        Self { geocoder, forecasts }
    }

    /// Wire the Nominatim and Open-Meteo clients from config.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let http = http_client(config)?;

        Ok(Self::new(
            Box::new(NominatimGeocoder::from_config(config, http.clone())),
            Box::new(OpenMeteoClient::from_config(config, http)),
        ))
    }

    #[instrument(skip(self))]
    pub async fn current_temperature(
        &self,
        city: &str,
        unit: TemperatureUnit,
    ) -> Result<Option<f64>, WeatherError> {
        Ok(self
            .forecast(city, 1, unit)
            .await?
            .map(|forecast| forecast.current.temperature_2m))
    }

    #[instrument(skip(self))]
    pub async fn forecast(
        &self,
        city: &str,
        days: u32,
        unit: TemperatureUnit,
    ) -> Result<Option<Forecast>, WeatherError> {
        let Some(coordinates) = self.geocoder.resolve(city).await? else {
            debug!("city not resolved, skipping forecast");
            return Ok(None);
        };

        self.forecasts.fetch(coordinates, days, unit).await.map(Some)
    }
}
