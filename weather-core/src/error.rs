use thiserror::Error;

/// Failures talking to the geocoding or forecast services.
///
/// "City not found" is not an error: resolvers report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The HTTP client itself could not be built.
    #[error("Failed to initialise HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to {service}: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} JSON: {source}")]
    Parse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The forecast decoded fine but its hourly series cannot be windowed.
    #[error("Malformed forecast: {0}")]
    MalformedForecast(String),
}

/// Rejected `setunit` token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid unit of measurement. Available units are c, f, celsius, fahrenheit")]
pub struct UnknownUnit(pub String);

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
