//! Nager.Date public holidays

use tracing::{debug, instrument};

use super::http::{JsonClient, TransportError, join_url};
use super::HolidayProvider;
use crate::models::Holiday;

pub struct NagerHolidayProvider {
    client: JsonClient,
    base_url: String,
}

impl NagerHolidayProvider {
    pub fn new(client: JsonClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn endpoint(&self, year: i32, country_code: &str) -> String {
        join_url(
            &self.base_url,
            &format!(
                "api/v3/PublicHolidays/{}/{}",
                year,
                urlencoding::encode(country_code)
            ),
        )
    }
}

impl HolidayProvider for NagerHolidayProvider {
    #[instrument(skip(self))]
    fn holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>, TransportError> {
        let endpoint = self.endpoint(year, country_code);
        let holidays: Vec<Holiday> = self.client.get_json(&endpoint, &[])?;

        debug!(
            "Received {} holidays for {} in {}",
            holidays.len(),
            country_code,
            year
        );
        Ok(holidays)
    }
}
