//! Device position lookup.

use std::future::Future;

use crate::types::{Coordinates, LocationError};

/// Source of the device's current position.
pub trait DeviceLocator {
    /// Whether this device can report a position at all.
    fn is_available(&self) -> bool;

    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Locator backed by a position from configuration or the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredLocator {
    position: Option<Coordinates>,
}

impl ConfiguredLocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl DeviceLocator for ConfiguredLocator {
    fn is_available(&self) -> bool {
        self.position.is_some()
    }

    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send {
        let position = self.position;
        async move {
            match position {
                Some(p) if p.is_valid() => Ok(p),
                Some(p) => Err(LocationError::Other(format!(
                    "invalid coordinates {}, {}",
                    p.latitude, p.longitude
                ))),
                None => Err(LocationError::ServiceUnavailable),
            }
        }
    }
}
