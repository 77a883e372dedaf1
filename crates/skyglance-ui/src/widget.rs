//! Search and locate flows: resolve a position, fetch the forecast, update the
//! view, then draw the chart.

use std::sync::Arc;

use parking_lot::Mutex;
use skyglance_chart::{ChartLayout, ChartRenderer, Surface, TemperatureSeries};
use skyglance_weather::{
    Coordinates, DeviceLocator, GeocodingClient, WeatherError, WeatherProvider,
};

use crate::error::WidgetError;
use crate::request::{RequestTicket, RequestTracker};
use crate::view::{WeatherSummary, WeatherView};

pub const LOCATING_LABEL: &str = "Locating...";
pub const DEVICE_LOCATION_LABEL: &str = "My Location";

/// What an action did to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    /// Nothing to do (blank query).
    Ignored,
    /// A newer action started before this one finished; its results were dropped.
    Superseded,
    /// The summary was shown. `chart` is `None` when the series could not be drawn.
    Updated { chart: Option<ChartLayout> },
}

pub struct WeatherWidget<V, S, L> {
    geocoder: GeocodingClient,
    provider: WeatherProvider,
    locator: L,
    view: V,
    surface: Arc<Mutex<S>>,
    renderer: ChartRenderer,
    requests: RequestTracker,
}

impl<V, S, L> WeatherWidget<V, S, L>
where
    V: WeatherView,
    S: Surface,
    L: DeviceLocator,
{
    pub fn new(
        geocoder: GeocodingClient,
        provider: WeatherProvider,
        locator: L,
        view: V,
        surface: Arc<Mutex<S>>,
    ) -> Self {
        Self {
            geocoder,
            provider,
            locator,
            view,
            surface,
            renderer: ChartRenderer::default(),
            requests: RequestTracker::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: ChartRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn surface(&self) -> &Arc<Mutex<S>> {
        &self.surface
    }

    /// Look up `query` and show its weather.
    pub async fn search_city(&self, query: &str) -> Result<Refresh, WidgetError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Refresh::Ignored);
        }

        let ticket = self.requests.begin();
        let Some(result) = ticket.guard(self.geocoder.search(query)).await else {
            return Ok(Refresh::Superseded);
        };
        if !self.requests.is_current(&ticket) {
            return Ok(Refresh::Superseded);
        }

        let place = match result {
            Ok(place) => place,
            Err(WeatherError::PlaceNotFound(q)) => {
                tracing::info!("No place found for {:?}", q);
                return Err(self.report(WidgetError::PlaceNotFound(q)));
            }
            Err(e) => {
                tracing::error!("Place search for {:?} failed: {}", query, e);
                return Err(self.report(WidgetError::Search(e)));
            }
        };

        self.view.set_place_label(&place.display_name());
        self.load_weather(&ticket, place.coordinates).await
    }

    /// Show the weather at the device's position.
    pub async fn locate(&self) -> Result<Refresh, WidgetError> {
        if !self.locator.is_available() {
            return Err(self.report(WidgetError::LocationUnsupported));
        }

        let ticket = self.requests.begin();
        self.view.set_place_label(LOCATING_LABEL);

        let Some(result) = ticket.guard(self.locator.current_position()).await else {
            return Ok(Refresh::Superseded);
        };
        if !self.requests.is_current(&ticket) {
            return Ok(Refresh::Superseded);
        }

        let coordinates = match result {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Could not get device position: {}", e);
                return Err(self.report(WidgetError::Location(e)));
            }
        };

        self.view.set_place_label(DEVICE_LOCATION_LABEL);
        self.load_weather(&ticket, coordinates).await
    }

    async fn load_weather(
        &self,
        ticket: &RequestTicket,
        coordinates: Coordinates,
    ) -> Result<Refresh, WidgetError> {
        let Some(result) = ticket.guard(self.provider.fetch(&coordinates)).await else {
            return Ok(Refresh::Superseded);
        };
        if !self.requests.is_current(ticket) {
            return Ok(Refresh::Superseded);
        }

        let data = match result {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(
                    "Weather fetch for {}, {} failed: {}",
                    coordinates.latitude,
                    coordinates.longitude,
                    e
                );
                let err = WidgetError::Forecast(e);
                // Degraded label instead of a notification.
                self.view.set_place_label(err.user_message());
                return Err(err);
            }
        };

        let summary = WeatherSummary::from_data(&data, chrono::Local::now().naive_local());
        self.view.show_summary(&summary);

        let mut surface = self.surface.lock();
        let chart = match TemperatureSeries::from_hourly(data.day_temperatures()) {
            Ok(series) => Some(self.renderer.render(&mut *surface, &series)),
            Err(e) => {
                tracing::warn!("Skipping temperature chart: {}", e);
                // Don't leave the previous place's chart under the new summary.
                self.renderer.clear(&mut *surface);
                None
            }
        };

        Ok(Refresh::Updated { chart })
    }

    fn report(&self, err: WidgetError) -> WidgetError {
        self.view.notify(err.user_message());
        err
    }
}
