//! Geocoded locations and coordinates

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting values outside the valid ranges
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// First geocoding match for a free-text place name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Human-readable formatted address
    pub formatted: String,
    /// Resolved coordinates
    pub coordinates: Coordinates,
    /// Structured address components (country, city, ISO codes, ...)
    pub components: BTreeMap<String, Value>,
}

impl GeocodeResult {
    /// String value of an address component, if present and non-empty
    #[must_use]
    pub fn component(&self, key: &str) -> Option<&str> {
        self.components
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Country name from the address components
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.component("country")
    }
}
