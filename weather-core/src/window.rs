//! Summaries of an hourly series as four 6-hour windows per day.
//!
//! Day `d`, window `w` covers hourly indices `[d*24 + w*6, d*24 + (w+1)*6)`.
//! The printed end time is the last hour inside the window, so windows read
//! `00:00-05:00`, `06:00-11:00`, `12:00-17:00`, `18:00-23:00`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use tracing::warn;

use crate::{
    Forecast, HourlySeries,
    error::WeatherError,
    unit::{Temperature, TemperatureUnit},
};

pub const HOURS_PER_DAY: usize = 24;
pub const WINDOW_HOURS: usize = 6;
pub const WINDOWS_PER_DAY: usize = HOURS_PER_DAY / WINDOW_HOURS;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastWindow {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub min: f64,
    pub max: f64,
}

impl ForecastWindow {
    pub fn display(&self, unit: TemperatureUnit) -> WindowLine<'_> {
        WindowLine { window: self, unit }
    }
}

/// A window formatted for the terminal.
pub struct WindowLine<'a> {
    window: &'a ForecastWindow,
    unit: TemperatureUnit,
}

impl fmt::Display for WindowLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.window;
        write!(
            f,
            "{} {}-{} min: {}\tmax: {}",
            w.date.format("%Y-%m-%d"),
            w.start.format("%H:%M"),
            w.end.format("%H:%M"),
            Temperature::new(w.min, self.unit),
            Temperature::new(w.max, self.unit),
        )
    }
}

/// Split the first `days` days of `hourly` into windows.
///
/// Series shorter than `days * 24` are cut to the complete days present.
/// Mismatched array lengths, no complete day, or unparsable timestamps are
/// reported as [`WeatherError::MalformedForecast`].
pub fn windows(hourly: &HourlySeries, days: u32) -> Result<Vec<ForecastWindow>, WeatherError> {
    if hourly.time.len() != hourly.temperature_2m.len() {
        return Err(WeatherError::MalformedForecast(format!(
            "{} timestamps but {} temperature readings",
            hourly.time.len(),
            hourly.temperature_2m.len()
        )));
    }

    let requested = days as usize;
    let complete = hourly.time.len() / HOURS_PER_DAY;
    if complete == 0 {
        return Err(WeatherError::MalformedForecast(format!(
            "expected at least {HOURS_PER_DAY} hourly readings, got {}",
            hourly.time.len()
        )));
    }
    if complete < requested {
        warn!(requested, complete, "hourly series is short, showing complete days only");
    }

    let days = requested.min(complete);
    let mut out = Vec::with_capacity(days * WINDOWS_PER_DAY);

    for day in 0..days {
        let date = parse_timestamp(&hourly.time[day * HOURS_PER_DAY])?.date();

        for w in 0..WINDOWS_PER_DAY {
            let start = day * HOURS_PER_DAY + w * WINDOW_HOURS;
            let end = start + WINDOW_HOURS;

            let readings = &hourly.temperature_2m[start..end];
            let min = readings.iter().copied().fold(f64::INFINITY, f64::min);
            let max = readings.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            out.push(ForecastWindow {
                date,
                start: parse_timestamp(&hourly.time[start])?.time(),
                end: parse_timestamp(&hourly.time[end - 1])?.time(),
                min,
                max,
            });
        }
    }

    Ok(out)
}

/// Printable lines for the first `days` days of `forecast`.
pub fn render(
    forecast: &Forecast,
    days: u32,
    unit: TemperatureUnit,
) -> Result<Vec<String>, WeatherError> {
    Ok(windows(&forecast.hourly, days)?
        .iter()
        .map(|w| w.display(unit).to_string())
        .collect())
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|e| WeatherError::MalformedForecast(format!("bad timestamp '{raw}': {e}")))
}
