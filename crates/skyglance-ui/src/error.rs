use skyglance_weather::{LocationError, WeatherError};
use thiserror::Error;

/// Failure of one widget action. The view has already been told.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("No place matches \"{0}\"")]
    PlaceNotFound(String),

    #[error("Place search failed: {0}")]
    Search(#[source] WeatherError),

    #[error("Forecast request failed: {0}")]
    Forecast(#[source] WeatherError),

    #[error("Geolocation not supported")]
    LocationUnsupported,

    #[error("Geolocation failed: {0}")]
    Location(#[source] LocationError),
}

impl WidgetError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        self.to_weather_error().user_message()
    }
}
