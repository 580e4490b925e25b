use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::UnknownUnit;

/// Temperature unit used for forecast requests and printed readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Suffix appended to every printed temperature.
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Value for Open-Meteo's `temperature_unit` parameter.
    /// Celsius is the service default and is never sent.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            TemperatureUnit::Celsius => None,
            TemperatureUnit::Fahrenheit => Some("fahrenheit"),
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnknownUnit;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(UnknownUnit(value.to_string())),
        }
    }
}

/// A reading paired with its unit, printed the way the forecast service
/// reports floats (`5.0C`, `12.3F`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    pub value: f64,
    pub unit: TemperatureUnit,
}

impl Temperature {
    pub fn new(value: f64, unit: TemperatureUnit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_finite() && self.value.fract() == 0.0 {
            write!(f, "{:.1}{}", self.value, self.unit.symbol())
        } else {
            write!(f, "{}{}", self.value, self.unit.symbol())
        }
    }
}
