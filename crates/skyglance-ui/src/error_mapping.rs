use skyglance_core::{AppError, WeatherError};

use crate::error::WidgetError;

impl WidgetError {
    pub(crate) fn to_weather_error(&self) -> WeatherError {
        match self {
            WidgetError::PlaceNotFound(q) => WeatherError::LocationNotFound(q.clone()),
            WidgetError::Search(e) => WeatherError::SearchFailed(e.to_string()),
            WidgetError::Forecast(e) => WeatherError::ForecastFailed(e.to_string()),
            WidgetError::LocationUnsupported => WeatherError::GeolocationUnsupported,
            WidgetError::Location(e) => WeatherError::GeolocationFailed(e.to_string()),
        }
    }
}

impl From<WidgetError> for AppError {
    fn from(e: WidgetError) -> Self {
        AppError::Weather(e.to_weather_error())
    }
}
