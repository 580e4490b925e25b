//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Endpoint configuration
//! - Geocoding (Nominatim) and forecast (Open-Meteo) clients behind traits
//! - Forecast windowing: four 6-hour min/max summaries per day
//! - Temperature units and per-process session state
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod session;
pub mod unit;
pub mod window;

pub use config::Config;
pub use error::{UnknownUnit, WeatherError};
pub use model::{Coordinates, CurrentReading, Forecast, HourlySeries};
pub use provider::{ForecastProvider, Geocoder};
pub use service::WeatherService;
pub use session::Session;
pub use unit::{Temperature, TemperatureUnit};
pub use window::{ForecastWindow, render, windows};
