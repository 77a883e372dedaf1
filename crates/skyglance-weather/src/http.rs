//! Shared HTTP plumbing for the geocoding and forecast clients.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::types::WeatherError;

const USER_AGENT: &str = concat!("SkyGlance/", env!("CARGO_PKG_VERSION"));

/// Build a client with the optional per-request timeout.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, WeatherError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Trim trailing slashes so paths can be appended with `format!`.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Map the status and decode a JSON body.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WeatherError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::debug!("Request failed with status {}: {}", status, body);
        return Err(WeatherError::Api {
            status: status.as_u16(),
            message: api_reason(&body).unwrap_or(body),
        });
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
}

/// Open-Meteo reports failures as `{"error": true, "reason": "..."}`.
fn api_reason(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("reason")?.as_str().map(str::to_string)
}
