//! Forecast retrieval from the Open-Meteo forecast API.

use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::http;
use crate::types::{
    Coordinates, CurrentWeather, HourlyForecast, WeatherCondition, WeatherData, WeatherError,
};

const HOURLY_VARIABLES: &str = "temperature_2m,relativehumidity_2m,weathercode";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timezone: Option<String>,
    current_weather: ApiCurrentWeather,
    hourly: ApiHourly,
}

#[derive(Debug, Deserialize)]
struct ApiCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
    #[serde(default)]
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiHourly {
    #[serde(default)]
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relativehumidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    weathercode: Vec<Option<i32>>,
}

/// Open-Meteo local timestamps come without seconds, e.g. `2026-10-18T13:00`.
fn parse_local_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

impl ForecastResponse {
    fn into_weather_data(self) -> Result<WeatherData, WeatherError> {
        let time = self
            .hourly
            .time
            .iter()
            .map(|t| {
                parse_local_time(t)
                    .ok_or_else(|| WeatherError::Parse(format!("invalid hourly time: {}", t)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let current = CurrentWeather {
            temperature: self.current_weather.temperature,
            wind_speed: self.current_weather.windspeed,
            weather_code: self.current_weather.weathercode,
            condition: WeatherCondition::from_wmo_code(self.current_weather.weathercode),
            time: self.current_weather.time.as_deref().and_then(parse_local_time),
        };

        Ok(WeatherData {
            coordinates: Coordinates::new(self.latitude, self.longitude),
            timezone: self.timezone,
            current,
            hourly: HourlyForecast {
                time,
                temperature: self.hourly.temperature_2m,
                relative_humidity: self.hourly.relativehumidity_2m,
                weather_code: self.hourly.weathercode,
            },
            fetched_at: Utc::now(),
        })
    }
}

/// Client for the forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: http::normalize_base_url(base_url),
        })
    }

    /// Fetch current conditions and the hourly series for `coordinates`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, coordinates: &Coordinates) -> Result<WeatherData, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_VARIABLES),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let body: ForecastResponse = http::handle_response(response).await?;
        let data = body.into_weather_data()?;

        tracing::info!(
            "Fetched weather: {} hourly samples, {}°, {}",
            data.hourly.temperature.len(),
            data.current.temperature,
            data.current.condition.description()
        );
        Ok(data)
    }
}
