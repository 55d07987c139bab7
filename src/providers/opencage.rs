//! OpenCage forward geocoding

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::http::{JsonClient, TransportError, join_url};
use super::Geocoder;
use crate::models::{Coordinates, GeocodeResult};

pub struct OpenCageGeocoder {
    client: JsonClient,
    endpoint: String,
    api_key: String,
}

impl OpenCageGeocoder {
    pub fn new(client: JsonClient, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: join_url(base_url, "geocode/v1/json"),
            api_key: api_key.into(),
        }
    }
}

impl Geocoder for OpenCageGeocoder {
    #[instrument(skip(self))]
    fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>, TransportError> {
        let params = [
            ("q", query.to_string()),
            ("key", self.api_key.clone()),
            ("limit", "1".to_string()),
            ("no_annotations", "1".to_string()),
        ];
        let response: GeocodeResponse = self.client.get_json(&self.endpoint, &params)?;
        first_result(&self.endpoint, query, response)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    formatted: Option<String>,
    geometry: Option<Geometry>,
    #[serde(default)]
    components: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: Option<f64>,
    lng: Option<f64>,
}

fn first_result(
    endpoint: &str,
    query: &str,
    response: GeocodeResponse,
) -> Result<Option<GeocodeResult>, TransportError> {
    let Some(entry) = response.results.into_iter().next() else {
        warn!("No geocoding results for '{}'", query);
        return Ok(None);
    };

    let Some((lat, lng)) = entry.geometry.and_then(|g| g.lat.zip(g.lng)) else {
        warn!("Geocoding result for '{}' has no coordinates", query);
        return Ok(None);
    };

    let coordinates = Coordinates::new(lat, lng).ok_or_else(|| {
        TransportError::invalid_body(
            endpoint,
            format!("coordinates out of range for '{query}': {lat}, {lng}"),
        )
    })?;

    let formatted = entry.formatted.unwrap_or_else(|| query.to_string());
    debug!("Geocoded '{}' to {} ({})", query, formatted, coordinates);

    Ok(Some(GeocodeResult {
        formatted,
        coordinates,
        components: entry.components,
    }))
}
