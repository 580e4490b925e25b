use crate::{error::UnknownUnit, unit::TemperatureUnit};

/// Per-process session state. Nothing here outlives the process.
#[derive(Debug, Clone, Default)]
pub struct Session {
    unit: TemperatureUnit,
}

impl Session {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Parse `token` and switch units. A rejected token leaves the current
    /// unit in place.
    pub fn set_unit(&mut self, token: &str) -> Result<TemperatureUnit, UnknownUnit> {
        let unit = token.parse()?;
        self.unit = unit;
        Ok(unit)
    }
}
