//! Consolidated analysis record

use serde::{Deserialize, Serialize};

use super::{CountryInfo, GeocodeResult, Holiday, RouteSummary, WeatherSeries};

/// Everything gathered for one origin/destination/year request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Origin as typed by the user
    pub origin: String,
    /// Destination as typed by the user
    pub destination: String,
    /// Year used for the holiday lookup
    pub year: i32,
    /// Requested hourly weather window
    pub hours: u32,
    pub origin_geo: GeocodeResult,
    pub destination_geo: GeocodeResult,
    pub route: RouteSummary,
    pub origin_weather: WeatherSeries,
    pub destination_weather: WeatherSeries,
    pub country: CountryInfo,
    /// Holidays in provider order, untruncated
    pub holidays: Vec<Holiday>,
}
