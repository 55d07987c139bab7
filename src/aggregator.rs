//! Route Analysis Aggregator
//!
//! Runs the provider calls for one origin/destination/year request in
//! dependency order and assembles a single [`AnalysisResult`]. Each step
//! returns a `Result` and the first failure ends the run, so callers either
//! get a complete record or one [`AnalysisError`].

use anyhow::Result as AnyResult;
use tracing::{debug, info, instrument};

use crate::config::RoutewiseConfig;
use crate::models::{
    AnalysisResult, CountryInfo, GeocodeResult, Holiday, RouteSummary, WeatherSeries,
};
use crate::providers::{
    CountryProvider, Geocoder, HolidayProvider, JsonClient, NagerHolidayProvider,
    OpenCageGeocoder, OpenMeteoWeatherProvider, OpenRouteServiceProvider, Provider,
    RestCountriesProvider, RouteProvider, WeatherProvider,
};
use crate::{AnalysisError, Result};

/// Service for building consolidated route analyses
pub struct Aggregator {
    geocoder: Box<dyn Geocoder>,
    router: Box<dyn RouteProvider>,
    weather: Box<dyn WeatherProvider>,
    countries: Box<dyn CountryProvider>,
    holidays: Box<dyn HolidayProvider>,
}

impl Aggregator {
    pub fn new(
        geocoder: impl Geocoder + 'static,
        router: impl RouteProvider + 'static,
        weather: impl WeatherProvider + 'static,
        countries: impl CountryProvider + 'static,
        holidays: impl HolidayProvider + 'static,
    ) -> Self {
        Self {
            geocoder: Box::new(geocoder),
            router: Box::new(router),
            weather: Box::new(weather),
            countries: Box::new(countries),
            holidays: Box::new(holidays),
        }
    }

    /// Build the HTTP-backed aggregator described by `config`
    pub fn from_config(config: &RoutewiseConfig) -> AnyResult<Self> {
        config.validate_api_keys()?;

        let client = JsonClient::new(&config.http)?;
        let providers = &config.providers;

        Ok(Self::new(
            OpenCageGeocoder::new(
                client.clone(),
                &providers.opencage_base_url,
                providers.opencage_api_key.clone().unwrap_or_default(),
            ),
            OpenRouteServiceProvider::new(
                client.clone(),
                &providers.openrouteservice_base_url,
                providers.openrouteservice_api_key.clone().unwrap_or_default(),
            ),
            OpenMeteoWeatherProvider::new(
                client.clone(),
                &providers.open_meteo_base_url,
                config.defaults.forecast_days,
            ),
            RestCountriesProvider::new(client.clone(), &providers.rest_countries_base_url),
            NagerHolidayProvider::new(client, &providers.nager_base_url),
        ))
    }

    /// Gather everything known about a route in one pass
    #[instrument(skip(self))]
    pub fn analyse(
        &self,
        origin: &str,
        destination: &str,
        year: i32,
        hours: u32,
    ) -> Result<AnalysisResult> {
        let origin = origin.trim();
        let destination = destination.trim();
        validate_request(origin, destination, hours)?;

        info!("Analysing route {} -> {} for {}", origin, destination, year);

        let (origin_geo, destination_geo) = self.resolve_locations(origin, destination)?;
        let route = self.fetch_route(&origin_geo, &destination_geo)?;
        let (origin_weather, destination_weather) =
            self.fetch_weather(&origin_geo, &destination_geo, hours as usize)?;
        let country = self.resolve_country(&destination_geo, destination)?;
        let country_code = country_code(&country)?;
        let holidays = self.fetch_holidays(year, country_code)?;

        info!(
            "Analysis complete: {:.1} km, {} holidays in {}",
            route.distance_km,
            holidays.len(),
            country.display_name()
        );

        Ok(AnalysisResult {
            origin: origin.to_string(),
            destination: destination.to_string(),
            year,
            hours,
            origin_geo,
            destination_geo,
            route,
            origin_weather,
            destination_weather,
            country,
            holidays,
        })
    }

    fn resolve_locations(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<(GeocodeResult, GeocodeResult)> {
        Ok((self.geocode(origin)?, self.geocode(destination)?))
    }

    fn geocode(&self, query: &str) -> Result<GeocodeResult> {
        debug!("Geocoding location name: {}", query);

        self.geocoder
            .geocode(query)
            .map_err(|e| AnalysisError::provider(Provider::Geocoding, e))?
            .ok_or_else(|| AnalysisError::lookup(query))
    }

    fn fetch_route(
        &self,
        origin: &GeocodeResult,
        destination: &GeocodeResult,
    ) -> Result<RouteSummary> {
        self.router
            .route_summary(origin.coordinates, destination.coordinates)
            .map_err(|e| AnalysisError::provider(Provider::Routing, e))
    }

    fn fetch_weather(
        &self,
        origin: &GeocodeResult,
        destination: &GeocodeResult,
        hours: usize,
    ) -> Result<(WeatherSeries, WeatherSeries)> {
        let fetch = |geo: &GeocodeResult| {
            self.weather
                .weather(geo.coordinates, hours)
                .map_err(|e| AnalysisError::provider(Provider::Weather, e))
        };
        Ok((fetch(origin)?, fetch(destination)?))
    }

    /// Country from the destination's address components, else the raw input.
    ///
    /// The fallback is the destination as passed to `analyse` after trimming.
    fn resolve_country(
        &self,
        destination_geo: &GeocodeResult,
        destination: &str,
    ) -> Result<CountryInfo> {
        let query = destination_geo.country().unwrap_or(destination);
        debug!("Looking up country metadata for '{}'", query);

        self.countries
            .country_info(query)
            .map_err(|e| AnalysisError::provider(Provider::Countries, e))
    }

    fn fetch_holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>> {
        self.holidays
            .holidays(year, country_code)
            .map_err(|e| AnalysisError::provider(Provider::Holidays, e))
    }
}

fn validate_request(origin: &str, destination: &str, hours: u32) -> Result<()> {
    if origin.is_empty() || destination.is_empty() {
        return Err(AnalysisError::invalid_input(
            "Please enter both origin location and destination location",
        ));
    }
    if hours == 0 {
        return Err(AnalysisError::invalid_input(
            "Weather window must be at least one hour",
        ));
    }
    Ok(())
}

fn country_code(country: &CountryInfo) -> Result<&str> {
    country
        .iso_code()
        .ok_or_else(|| AnalysisError::missing_country_code(country.display_name()))
}
