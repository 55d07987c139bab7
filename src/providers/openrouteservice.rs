//! OpenRouteService driving directions

use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{JsonClient, TransportError, join_url};
use super::RouteProvider;
use crate::models::{Coordinates, RouteSummary};

pub struct OpenRouteServiceProvider {
    client: JsonClient,
    endpoint: String,
    api_key: String,
}

impl OpenRouteServiceProvider {
    pub fn new(client: JsonClient, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: join_url(base_url, "v2/directions/driving-car"),
            api_key: api_key.into(),
        }
    }
}

impl RouteProvider for OpenRouteServiceProvider {
    #[instrument(skip(self))]
    fn route_summary(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, TransportError> {
        // ORS expects longitude first
        let params = [
            ("api_key", self.api_key.clone()),
            ("start", format!("{},{}", origin.longitude, origin.latitude)),
            (
                "end",
                format!("{},{}", destination.longitude, destination.latitude),
            ),
        ];
        let response: DirectionsResponse = self.client.get_json(&self.endpoint, &params)?;
        let route = summarize(&self.endpoint, response)?;

        debug!(
            "Route {} -> {}: {:.1} km, {:.1} min",
            origin, destination, route.distance_km, route.duration_min
        );
        Ok(route)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    distance: Option<f64>,
    duration: Option<f64>,
}

fn summarize(endpoint: &str, response: DirectionsResponse) -> Result<RouteSummary, TransportError> {
    let summary = response
        .features
        .into_iter()
        .next()
        .and_then(|feature| feature.properties)
        .and_then(|properties| properties.summary)
        .ok_or_else(|| {
            TransportError::invalid_body(endpoint, "unexpected response structure, no route summary")
        })?;

    Ok(RouteSummary::new(
        summary.distance.unwrap_or(0.0),
        summary.duration.unwrap_or(0.0),
    ))
}
