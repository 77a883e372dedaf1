//! Weather lookup for SkyGlance
//!
//! Resolves places with the Open-Meteo geocoding API, reads the device
//! position through a [`DeviceLocator`], and fetches current conditions plus
//! the hourly series from the Open-Meteo forecast API.

pub mod geocode;
mod http;
pub mod location;
pub mod provider;
pub mod types;

pub use geocode::GeocodingClient;
pub use location::{ConfiguredLocator, DeviceLocator};
pub use provider::WeatherProvider;
pub use types::*;
