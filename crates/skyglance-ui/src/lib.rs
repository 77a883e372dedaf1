//! Widget controller for SkyGlance.
//!
//! Wires the place search and device location flows to an injected
//! [`WeatherView`] and chart [`Surface`](skyglance_chart::Surface).

mod error;
mod error_mapping;
pub mod request;
pub mod view;
pub mod widget;

pub use error::WidgetError;
pub use request::{RequestTicket, RequestTracker};
pub use view::{WeatherSummary, WeatherView};
pub use widget::{Refresh, WeatherWidget, DEVICE_LOCATION_LABEL, LOCATING_LABEL};
