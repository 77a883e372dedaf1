#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end widget flows against mock geocoding and forecast servers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use skyglance_chart::{DrawOp, RecordingSurface, Size};
use skyglance_ui::{
    Refresh, WeatherSummary, WeatherView, WeatherWidget, WidgetError, DEVICE_LOCATION_LABEL,
    LOCATING_LABEL,
};
use skyglance_weather::{
    ConfiguredLocator, Coordinates, DeviceLocator, GeocodingClient, LocationError,
    WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
enum ViewEvent {
    Label(String),
    Summary(WeatherSummary),
    Notify(String),
}

#[derive(Default)]
struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }

    fn labels(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Label(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    fn notifications(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn summaries(&self) -> Vec<WeatherSummary> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Summary(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl WeatherView for RecordingView {
    fn set_place_label(&self, label: &str) {
        self.events.lock().push(ViewEvent::Label(label.to_string()));
    }

    fn show_summary(&self, summary: &WeatherSummary) {
        self.events.lock().push(ViewEvent::Summary(summary.clone()));
    }

    fn notify(&self, message: &str) {
        self.events.lock().push(ViewEvent::Notify(message.to_string()));
    }
}

/// Locator whose permission prompt was refused.
struct DeniedLocator;

impl DeviceLocator for DeniedLocator {
    fn is_available(&self) -> bool {
        true
    }

    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send {
        async { Err(LocationError::PermissionDenied) }
    }
}

fn place_json(name: &str, country: &str, latitude: f64, longitude: f64) -> serde_json::Value {
    serde_json::json!({
        "results": [{"name": name, "country": country, "latitude": latitude, "longitude": longitude}]
    })
}

fn forecast_json(hours: usize) -> serde_json::Value {
    let times: Vec<String> = (0..hours)
        .map(|h| format!("2026-10-{:02}T{:02}:00", 18 + h / 24, h % 24))
        .collect();
    let temps: Vec<f64> = (0..hours).map(|h| 8.0 + (h % 24) as f64 * 0.5).collect();
    let humidity: Vec<u32> = (0..hours).map(|h| 60 + (h % 24) as u32).collect();
    serde_json::json!({
        "latitude": 40.71,
        "longitude": -74.01,
        "timezone": "America/New_York",
        "current_weather": {
            "time": "2026-10-18T09:00",
            "temperature": 12.6,
            "windspeed": 14.0,
            "weathercode": 3
        },
        "hourly": {
            "time": times,
            "temperature_2m": temps,
            "relativehumidity_2m": humidity,
            "weathercode": vec![3; hours]
        }
    })
}

async fn mount_place(server: &MockServer, query: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, hours: usize) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_json(hours)))
        .mount(server)
        .await;
}

async fn mount_forecast_at(server: &MockServer, latitude: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", latitude))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn widget<L: DeviceLocator>(
    server: &MockServer,
    locator: L,
) -> WeatherWidget<RecordingView, RecordingSurface, L> {
    let geocoder = GeocodingClient::new(&server.uri(), None).unwrap();
    let provider = WeatherProvider::new(&server.uri(), None).unwrap();
    let surface = Arc::new(Mutex::new(RecordingSurface::new(Size::new(600.0, 200.0), 2.0)));
    WeatherWidget::new(geocoder, provider, locator, RecordingView::default(), surface)
}

#[tokio::test]
async fn search_updates_label_summary_and_chart() {
    let server = MockServer::start().await;
    mount_place(&server, "New York", place_json("New York", "United States", 40.71, -74.01)).await;
    mount_forecast(&server, 48).await;

    let widget = widget(&server, ConfiguredLocator::default());
    let refresh = widget.search_city("New York").await.unwrap();

    let layout = match refresh {
        Refresh::Updated { chart: Some(layout) } => layout,
        other => panic!("expected a drawn chart, got {:?}", other),
    };
    assert_eq!(layout.vertices.len(), 24);
    assert_eq!(layout.markers.len(), 6);

    assert_eq!(widget.view().labels(), vec!["New York, United States"]);
    assert!(widget.view().notifications().is_empty());

    let summaries = widget.view().summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].temperature_text(), "13");
    assert_eq!(summaries[0].wind_text(), "14 km/h");
    assert_eq!(summaries[0].condition_text(), "Overcast");
    assert_eq!(summaries[0].humidity_text(), "69%");
    assert_eq!(summaries[0].date_text(), "Sunday, October 18");

    let surface = widget.surface().lock();
    assert_eq!(surface.backing_store(), (1200, 400));
    assert_eq!(surface.stroked_vertices().len(), 24);
}

#[tokio::test]
async fn unknown_city_notifies() {
    let server = MockServer::start().await;
    mount_place(&server, "Atlantis", serde_json::json!({"generationtime_ms": 0.1})).await;

    let widget = widget(&server, ConfiguredLocator::default());
    let result = widget.search_city("Atlantis").await;

    assert!(matches!(result, Err(WidgetError::PlaceNotFound(ref q)) if q == "Atlantis"));
    assert_eq!(widget.view().events(), vec![ViewEvent::Notify("City not found!".into())]);
    assert!(widget.surface().lock().ops().is_empty());
}

#[tokio::test]
async fn search_transport_failure_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let widget = widget(&server, ConfiguredLocator::default());
    let result = widget.search_city("Paris").await;

    assert!(matches!(result, Err(WidgetError::Search(_))));
    assert_eq!(widget.view().notifications(), vec!["Error searching city."]);
}

#[tokio::test]
async fn forecast_failure_degrades_label() {
    let server = MockServer::start().await;
    mount_place(&server, "Paris", place_json("Paris", "France", 48.85, 2.35)).await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let widget = widget(&server, ConfiguredLocator::default());
    let result = widget.search_city("Paris").await;

    assert!(matches!(result, Err(WidgetError::Forecast(_))));
    assert_eq!(
        widget.view().labels(),
        vec!["Paris, France", "Error loading weather"]
    );
    assert!(widget.view().notifications().is_empty());
    assert!(widget.view().summaries().is_empty());
}

#[tokio::test]
async fn blank_query_does_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let widget = widget(&server, ConfiguredLocator::default());
    assert_eq!(widget.search_city("   ").await.unwrap(), Refresh::Ignored);
    assert!(widget.view().events().is_empty());
}

#[tokio::test]
async fn locate_uses_device_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "47.6"))
        .and(query_param("longitude", "-122.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_json(24)))
        .mount(&server)
        .await;

    let locator = ConfiguredLocator::new(Some(Coordinates::new(47.6, -122.3)));
    let widget = widget(&server, locator);
    let refresh = widget.locate().await.unwrap();

    assert!(matches!(refresh, Refresh::Updated { chart: Some(_) }));
    assert_eq!(
        widget.view().labels(),
        vec![LOCATING_LABEL, DEVICE_LOCATION_LABEL]
    );
    assert_eq!(widget.view().summaries().len(), 1);
}

#[tokio::test]
async fn locate_without_geolocation_notifies() {
    let server = MockServer::start().await;
    let widget = widget(&server, ConfiguredLocator::default());

    let result = widget.locate().await;

    assert!(matches!(result, Err(WidgetError::LocationUnsupported)));
    assert_eq!(
        widget.view().events(),
        vec![ViewEvent::Notify("Geolocation not supported".into())]
    );
}

#[tokio::test]
async fn denied_location_notifies() {
    let server = MockServer::start().await;
    let widget = widget(&server, DeniedLocator);

    let result = widget.locate().await;

    assert!(matches!(
        result,
        Err(WidgetError::Location(LocationError::PermissionDenied))
    ));
    assert_eq!(widget.view().labels(), vec![LOCATING_LABEL]);
    assert_eq!(
        widget.view().notifications(),
        vec!["Could not retrieve location. Please search manually."]
    );
}

#[tokio::test]
async fn newer_search_supersedes_slow_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Slowville"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(place_json("Slowville", "Nowhere", 1.0, 1.0))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    mount_place(&server, "Fastville", place_json("Fastville", "Somewhere", 2.0, 2.0)).await;
    mount_forecast(&server, 24).await;

    let widget = widget(&server, ConfiguredLocator::default());
    let (slow, fast) = tokio::join!(widget.search_city("Slowville"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        widget.search_city("Fastville").await
    });

    assert_eq!(slow.unwrap(), Refresh::Superseded);
    assert!(matches!(fast.unwrap(), Refresh::Updated { chart: Some(_) }));
    assert_eq!(widget.view().labels(), vec!["Fastville, Somewhere"]);
    assert_eq!(widget.view().summaries().len(), 1);
}

#[tokio::test]
async fn short_series_skips_chart_but_keeps_summary() {
    let server = MockServer::start().await;
    mount_place(&server, "Tiny", place_json("Tiny", "Town", 3.0, 4.0)).await;
    mount_forecast(&server, 1).await;

    let widget = widget(&server, ConfiguredLocator::default());
    let refresh = widget.search_city("Tiny").await.unwrap();

    assert_eq!(refresh, Refresh::Updated { chart: None });
    assert_eq!(widget.view().summaries().len(), 1);

    let surface = widget.surface().lock();
    assert!(surface.stroked_vertices().is_empty());
    assert_eq!(surface.ops().iter().map(DrawOp::kind).collect::<Vec<_>>(), vec!["clear"]);
}

#[tokio::test]
async fn unchartable_forecast_clears_previous_chart() {
    let server = MockServer::start().await;
    mount_place(&server, "Paris", place_json("Paris", "France", 48.85, 2.35)).await;
    mount_place(&server, "Tiny", place_json("Tiny", "Town", 3.5, 4.5)).await;
    mount_forecast_at(&server, "48.85", forecast_json(24)).await;
    mount_forecast_at(&server, "3.5", forecast_json(1)).await;

    let widget = widget(&server, ConfiguredLocator::default());
    let first = widget.search_city("Paris").await.unwrap();
    assert!(matches!(first, Refresh::Updated { chart: Some(_) }));
    assert_eq!(widget.surface().lock().stroked_vertices().len(), 24);

    let second = widget.search_city("Tiny").await.unwrap();
    assert_eq!(second, Refresh::Updated { chart: None });
    assert_eq!(widget.view().labels(), vec!["Paris, France", "Tiny, Town"]);
    assert_eq!(widget.view().summaries().len(), 2);

    let surface = widget.surface().lock();
    assert!(surface.stroked_vertices().is_empty());
    assert_eq!(surface.backing_store(), (1200, 400));
}

#[tokio::test]
async fn missing_hourly_temperature_keeps_summary() {
    let server = MockServer::start().await;
    mount_place(&server, "Paris", place_json("Paris", "France", 48.85, 2.35)).await;
    let mut body = forecast_json(24);
    body["hourly"]["temperature_2m"][23] = serde_json::Value::Null;
    mount_forecast_at(&server, "48.85", body).await;

    let widget = widget(&server, ConfiguredLocator::default());
    let refresh = widget.search_city("Paris").await.unwrap();

    assert_eq!(refresh, Refresh::Updated { chart: None });
    assert_eq!(widget.view().labels(), vec!["Paris, France"]);
    assert!(widget.view().notifications().is_empty());

    let summaries = widget.view().summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].temperature_text(), "13");
    assert!(widget.surface().lock().stroked_vertices().is_empty());
}
