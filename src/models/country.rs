//! Country metadata

use serde::{Deserialize, Serialize};

/// Descriptive metadata for a country
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CountryInfo {
    /// Common display name
    pub name: Option<String>,
    /// Official name
    pub official_name: Option<String>,
    /// ISO 3166-1 alpha-2 code, required for holiday lookups
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    /// First listed capital, or "Unknown"
    pub capital: String,
    pub population: Option<u64>,
    pub timezones: Vec<String>,
    /// Currency codes, ordered by code
    pub currencies: Vec<String>,
    /// Language names, ordered by language code
    pub languages: Vec<String>,
}

impl CountryInfo {
    /// ISO code if present and non-blank
    #[must_use]
    pub fn iso_code(&self) -> Option<&str> {
        self.country_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Display name with a fallback for incomplete records
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Country")
    }
}
