//! External data providers
//!
//! One trait per data source. The aggregator only sees these traits, so each
//! step of an analysis can be driven by the HTTP implementations below or by
//! fakes in tests:
//! - Geocoding: OpenCage
//! - Routing: OpenRouteService
//! - Weather: Open-Meteo
//! - Country metadata: REST Countries
//! - Public holidays: Nager.Date

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{
    Coordinates, CountryInfo, GeocodeResult, Holiday, RouteSummary, WeatherSeries,
};

pub mod http;
pub mod nager;
pub mod open_meteo;
pub mod opencage;
pub mod openrouteservice;
pub mod rest_countries;

pub use http::{JsonClient, TransportError};
pub use nager::NagerHolidayProvider;
pub use open_meteo::OpenMeteoWeatherProvider;
pub use opencage::OpenCageGeocoder;
pub use openrouteservice::OpenRouteServiceProvider;
pub use rest_countries::RestCountriesProvider;

/// Identifies which external source a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    Geocoding,
    Routing,
    Weather,
    Countries,
    Holidays,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Geocoding => "OpenCage geocoding",
            Provider::Routing => "OpenRouteService routing",
            Provider::Weather => "Open-Meteo weather",
            Provider::Countries => "REST Countries",
            Provider::Holidays => "Nager.Date holidays",
        };
        f.write_str(name)
    }
}

/// Resolves free text to the best matching location
pub trait Geocoder {
    /// `Ok(None)` when the provider has no match for `query`
    fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>, TransportError>;
}

pub trait RouteProvider {
    fn route_summary(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, TransportError>;
}

pub trait WeatherProvider {
    /// Hourly forecast truncated to at most `hours` entries
    fn weather(
        &self,
        coordinates: Coordinates,
        hours: usize,
    ) -> Result<WeatherSeries, TransportError>;
}

pub trait CountryProvider {
    fn country_info(&self, name: &str) -> Result<CountryInfo, TransportError>;
}

pub trait HolidayProvider {
    /// Every public holiday of `year`, in provider order
    fn holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>, TransportError>;
}
