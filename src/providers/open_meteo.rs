//! Open-Meteo hourly forecast

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{JsonClient, TransportError, join_url};
use super::WeatherProvider;
use crate::models::{Coordinates, WeatherSeries};

const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,wind_speed_10m";
const MAX_FORECAST_DAYS: u32 = 16;

pub struct OpenMeteoWeatherProvider {
    client: JsonClient,
    endpoint: String,
    forecast_days: u32,
}

impl OpenMeteoWeatherProvider {
    pub fn new(client: JsonClient, base_url: &str, forecast_days: u32) -> Self {
        Self {
            client,
            endpoint: join_url(base_url, "v1/forecast"),
            forecast_days,
        }
    }

    /// Enough days to cover `hours`, within the provider's limit
    fn days_for(&self, hours: usize) -> u32 {
        let needed = u32::try_from(hours.div_ceil(24)).unwrap_or(MAX_FORECAST_DAYS);
        self.forecast_days.max(needed).clamp(1, MAX_FORECAST_DAYS)
    }
}

impl WeatherProvider for OpenMeteoWeatherProvider {
    #[instrument(skip(self))]
    fn weather(
        &self,
        coordinates: Coordinates,
        hours: usize,
    ) -> Result<WeatherSeries, TransportError> {
        let params = [
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("forecast_days", self.days_for(hours).to_string()),
            ("timezone", "auto".to_string()),
        ];
        let response: ForecastResponse = self.client.get_json(&self.endpoint, &params)?;
        let series = to_series(&self.endpoint, coordinates, response, hours)?;

        debug!("Received {} hourly samples for {}", series.len(), coordinates);
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
    #[serde(default)]
    hourly: HourlyData,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyData {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
}

/// Missing samples become NaN so indices stay aligned across sequences
fn fill_gaps(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

fn to_series(
    endpoint: &str,
    requested: Coordinates,
    response: ForecastResponse,
    hours: usize,
) -> Result<WeatherSeries, TransportError> {
    let hourly = response.hourly;

    let times = hourly
        .time
        .iter()
        .take(hours)
        .map(|t| {
            NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").map_err(|e| {
                TransportError::invalid_body(endpoint, format!("invalid timestamp '{t}': {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeatherSeries::new(
        response.latitude.unwrap_or(requested.latitude),
        response.longitude.unwrap_or(requested.longitude),
        response.timezone,
        times,
        fill_gaps(hourly.temperature_2m),
        fill_gaps(hourly.precipitation),
        fill_gaps(hourly.wind_speed_10m),
        hours,
    ))
}
