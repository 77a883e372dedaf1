use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use skyglance_core::{NetworkError, ReqwestErrorExt};

/// Number of hourly samples that make up one day of the chart.
pub const HOURS_PER_DAY: usize = 24;

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Convert a WMO weather code to a condition.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 | 80..=82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear Sky",
            Self::MainlyClear => "Mainly Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Variable",
        }
    }

    pub fn icon(&self) -> WeatherIcon {
        match self {
            Self::ClearSky => WeatherIcon::Sun,
            Self::MainlyClear | Self::PartlyCloudy => WeatherIcon::CloudSun,
            Self::Overcast | Self::Fog | Self::Unknown => WeatherIcon::Cloud,
            Self::Drizzle | Self::Rain => WeatherIcon::CloudRain,
            Self::Snow => WeatherIcon::Snowflake,
            Self::Thunderstorm => WeatherIcon::Bolt,
        }
    }
}

/// Icon shown next to the current condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sun,
    CloudSun,
    Cloud,
    CloudRain,
    Snowflake,
    Bolt,
}

impl WeatherIcon {
    /// Font Awesome class name
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Sun => "fa-sun",
            Self::CloudSun => "fa-cloud-sun",
            Self::Cloud => "fa-cloud",
            Self::CloudRain => "fa-cloud-rain",
            Self::Snowflake => "fa-snowflake",
            Self::Bolt => "fa-bolt",
        }
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Best geocoding match for a free-text query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
}

impl Place {
    /// Label shown above the summary, e.g. "Paris, France".
    pub fn display_name(&self) -> String {
        match self.country.as_deref().filter(|c| !c.is_empty()) {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    pub weather_code: i32,
    pub condition: WeatherCondition,
    /// Observation time in the location's local time
    pub time: Option<NaiveDateTime>,
}

/// Hourly values as parallel arrays, indexed by hour starting at local midnight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: Vec<NaiveDateTime>,
    pub temperature: Vec<Option<f64>>,
    pub relative_humidity: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
}

/// Complete weather data bundle for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    pub coordinates: Coordinates,
    pub timezone: Option<String>,
    pub current: CurrentWeather,
    pub hourly: HourlyForecast,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherData {
    /// The first day of hourly temperatures, oldest first. Hours the
    /// provider has no value for are `None`.
    pub fn day_temperatures(&self) -> &[Option<f64>] {
        let end = self.hourly.temperature.len().min(HOURS_PER_DAY);
        &self.hourly.temperature[..end]
    }

    /// Relative humidity (%) at the given hour-of-day index.
    pub fn humidity_at(&self, hour: usize) -> Option<f64> {
        self.hourly.relative_humidity.get(hour).copied().flatten()
    }

    /// Hour of the current observation in the location's local time.
    pub fn current_hour(&self) -> Option<u32> {
        self.current.time.map(|t| t.hour())
    }
}

/// Location service errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Geocoding and forecast errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("No place matches \"{0}\"")]
    PlaceNotFound(String),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Network(e.into_network_error())
    }
}
