//! The data sink a widget writes into.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use skyglance_weather::{WeatherCondition, WeatherData, WeatherIcon};

/// Receives everything the widget displays.
///
/// Methods take `&self`; implementations own their interior mutability.
pub trait WeatherView {
    /// Heading above the summary: a place name or a status such as "Locating...".
    fn set_place_label(&self, label: &str);

    fn show_summary(&self, summary: &WeatherSummary);

    /// Blocking, user-facing notification.
    fn notify(&self, message: &str);
}

/// Text fields of the current-conditions panel.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    pub temperature: i64,
    /// km/h
    pub wind_speed: f64,
    pub condition: WeatherCondition,
    /// Relative humidity (%) for the current hour
    pub humidity: Option<f64>,
    pub date: NaiveDate,
}

impl WeatherSummary {
    /// Build the summary, preferring the location's local clock from `data`
    /// and falling back to `device_now`.
    pub fn from_data(data: &WeatherData, device_now: NaiveDateTime) -> Self {
        let hour = data.current_hour().unwrap_or_else(|| device_now.hour());
        let date = data
            .current
            .time
            .map(|t| t.date())
            .unwrap_or_else(|| device_now.date());

        Self {
            temperature: data.current.temperature.round() as i64,
            wind_speed: data.current.wind_speed,
            condition: data.current.condition,
            humidity: data.humidity_at(hour as usize),
            date,
        }
    }

    pub fn temperature_text(&self) -> String {
        self.temperature.to_string()
    }

    pub fn wind_text(&self) -> String {
        format!("{} km/h", self.wind_speed)
    }

    pub fn condition_text(&self) -> &'static str {
        self.condition.description()
    }

    pub fn icon(&self) -> WeatherIcon {
        self.condition.icon()
    }

    pub fn humidity_text(&self) -> String {
        match self.humidity {
            Some(h) => format!("{}%", h),
            None => "--%".to_string(),
        }
    }

    /// e.g. "Sunday, October 18"
    pub fn date_text(&self) -> String {
        self.date.format("%A, %B %-d").to_string()
    }
}
