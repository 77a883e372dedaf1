use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use skyglance_chart::{Size, SvgSurface};
use skyglance_core::{AppError, Config};
use skyglance_ui::{Refresh, WeatherSummary, WeatherView, WeatherWidget};
use skyglance_weather::{ConfiguredLocator, Coordinates, GeocodingClient, WeatherProvider};

#[derive(Debug, Parser)]
#[command(
    name = "skyglance",
    version,
    about = "Current weather and a 24-hour temperature chart"
)]
struct Cli {
    /// Config file (defaults to <config dir>/skyglance/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where to write the chart SVG
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    /// Chart width in logical pixels
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Chart height in logical pixels
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Device pixel ratio of the chart
    #[arg(long, global = true)]
    dpr: Option<f64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a place by name
    Search {
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
    /// Use the device position (from flags or the [location] config section)
    Locate {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}

/// Prints the widget to the terminal; notifications go to stderr.
struct TerminalView;

impl WeatherView for TerminalView {
    fn set_place_label(&self, label: &str) {
        println!("{}", label);
    }

    fn show_summary(&self, summary: &WeatherSummary) {
        println!("  {}", summary.date_text());
        println!(
            "  {}°  {} ({})",
            summary.temperature_text(),
            summary.condition_text(),
            summary.icon().css_class()
        );
        println!(
            "  Wind {}  Humidity {}",
            summary.wind_text(),
            summary.humidity_text()
        );
    }

    fn notify(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(output) = &cli.output {
        config.chart.output_path = output.clone();
    }
    if let Some(width) = cli.width {
        config.chart.width = width;
    }
    if let Some(height) = cli.height {
        config.chart.height = height;
    }
    if let Some(dpr) = cli.dpr {
        config.chart.device_pixel_ratio = dpr;
    }
    if let Some(Command::Locate {
        lat: Some(lat),
        lon: Some(lon),
    }) = &cli.command
    {
        config.location.latitude = Some(*lat);
        config.location.longitude = Some(*lon);
    }

    let validation = config.validate();
    if !validation.is_valid() {
        anyhow::bail!("Invalid options: {}", validation.error_summary());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    skyglance_core::init()?;

    let (mut config, _) = Config::load_validated(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;

    let timeout = config.weather.request_timeout_secs.map(Duration::from_secs);
    let geocoder = GeocodingClient::new(&config.weather.geocoding_url, timeout)?
        .with_language(config.weather.language.clone());
    let provider = WeatherProvider::new(&config.weather.forecast_url, timeout)?;
    let locator = ConfiguredLocator::new(
        config
            .location
            .coordinates()
            .map(|(lat, lon)| Coordinates::new(lat, lon)),
    );

    let surface = Arc::new(Mutex::new(SvgSurface::new(
        Size::new(config.chart.width, config.chart.height),
        config.chart.device_pixel_ratio,
    )));
    let widget = WeatherWidget::new(geocoder, provider, locator, TerminalView, surface.clone());

    let result = match &cli.command {
        Some(Command::Search { city }) => widget.search_city(&city.join(" ")).await,
        Some(Command::Locate { .. }) => widget.locate().await,
        None => widget.search_city(&config.weather.default_city).await,
    };

    match result {
        Ok(Refresh::Updated { chart: Some(layout) }) => {
            let path = &config.chart.output_path;
            let svg = surface.lock().to_svg()?;
            std::fs::write(path, svg)
                .with_context(|| format!("Failed to write chart to {}", path.display()))?;
            tracing::info!(
                "Chart with {} points written to {}",
                layout.vertices.len(),
                path.display()
            );
            println!("  Chart: {}", path.display());
        }
        Ok(Refresh::Updated { chart: None }) => {
            tracing::warn!("Not enough hourly data to draw a chart");
        }
        Ok(Refresh::Ignored) | Ok(Refresh::Superseded) => {}
        Err(e) => return Err(AppError::from(e).into()),
    }

    Ok(())
}
