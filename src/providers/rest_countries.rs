//! REST Countries metadata lookup

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::http::{JsonClient, TransportError, join_url};
use super::CountryProvider;
use crate::models::CountryInfo;

pub struct RestCountriesProvider {
    client: JsonClient,
    base_url: String,
}

impl RestCountriesProvider {
    pub fn new(client: JsonClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }
}

impl CountryProvider for RestCountriesProvider {
    #[instrument(skip(self))]
    fn country_info(&self, name: &str) -> Result<CountryInfo, TransportError> {
        let endpoint = join_url(
            &self.base_url,
            &format!("v3.1/name/{}", urlencoding::encode(name)),
        );
        let countries: Vec<RawCountry> = self.client.get_json(&endpoint, &[])?;
        let country = first_country(&endpoint, name, countries)?;

        debug!(
            "Resolved '{}' to {} ({:?})",
            name,
            country.display_name(),
            country.country_code
        );
        Ok(country)
    }
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: Option<RawName>,
    cca2: Option<String>,
    region: Option<String>,
    subregion: Option<String>,
    capital: Option<Vec<String>>,
    population: Option<u64>,
    #[serde(default)]
    timezones: Vec<String>,
    currencies: Option<BTreeMap<String, Value>>,
    languages: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: Option<String>,
    official: Option<String>,
}

fn first_country(
    endpoint: &str,
    name: &str,
    countries: Vec<RawCountry>,
) -> Result<CountryInfo, TransportError> {
    let raw = countries
        .into_iter()
        .next()
        .ok_or_else(|| TransportError::no_data(endpoint, format!("no country data found for '{name}'")))?;

    let (common, official) = raw
        .name
        .map(|n| (n.common, n.official))
        .unwrap_or_default();

    Ok(CountryInfo {
        name: common,
        official_name: official,
        country_code: raw.cca2,
        region: raw.region,
        subregion: raw.subregion,
        capital: raw
            .capital
            .and_then(|capitals| capitals.into_iter().next())
            .unwrap_or_else(|| "Unknown".to_string()),
        population: raw.population,
        timezones: raw.timezones,
        currencies: raw
            .currencies
            .map(|c| c.into_keys().collect())
            .unwrap_or_default(),
        languages: raw
            .languages
            .map(|l| l.into_values().collect())
            .unwrap_or_default(),
    })
}
