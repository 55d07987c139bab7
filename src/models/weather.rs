//! Hourly weather series for a single location

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Parallel hourly sequences, oldest first, all of the same length
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSeries {
    /// Latitude reported by the provider
    pub latitude: f64,
    /// Longitude reported by the provider
    pub longitude: f64,
    /// Provider-resolved timezone of the timestamps
    pub timezone: Option<String>,
    /// Local timestamps of each sample
    pub times: Vec<NaiveDateTime>,
    /// Temperature in Celsius
    pub temperature: Vec<f64>,
    /// Precipitation in mm
    pub precipitation: Vec<f64>,
    /// Wind speed in km/h
    pub wind_speed: Vec<f64>,
}

impl WeatherSeries {
    /// Build a series truncated to at most `hours` entries.
    ///
    /// `times` sets the length. Value sequences are cut to it, and shorter
    /// ones are padded with NaN so every index refers to the same hour.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        latitude: f64,
        longitude: f64,
        timezone: Option<String>,
        mut times: Vec<NaiveDateTime>,
        mut temperature: Vec<f64>,
        mut precipitation: Vec<f64>,
        mut wind_speed: Vec<f64>,
        hours: usize,
    ) -> Self {
        let len = hours.min(times.len());

        times.truncate(len);
        temperature.resize(len, f64::NAN);
        precipitation.resize(len, f64::NAN);
        wind_speed.resize(len, f64::NAN);

        Self {
            latitude,
            longitude,
            timezone,
            times,
            temperature,
            precipitation,
            wind_speed,
        }
    }

    /// Number of hourly samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hours_from_midnight(count: u32) -> Vec<NaiveDateTime> {
        (0..count)
            .map(|h| {
                NaiveDate::from_ymd_opt(2025, 3, 1)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_truncates_to_requested_hours() {
        let series = WeatherSeries::new(
            1.0,
            2.0,
            None,
            hours_from_midnight(10),
            vec![1.0; 10],
            vec![0.0; 10],
            vec![5.0; 10],
            4,
        );
        assert_eq!(series.len(), 4);
        assert_eq!(series.temperature.len(), 4);
        assert_eq!(series.precipitation.len(), 4);
        assert_eq!(series.wind_speed.len(), 4);
    }

    #[test]
    fn test_short_series_is_kept() {
        let series = WeatherSeries::new(
            1.0,
            2.0,
            None,
            hours_from_midnight(3),
            vec![1.0, 2.0, 3.0],
            vec![0.0; 3],
            vec![5.0; 3],
            24,
        );
        assert_eq!(series.len(), 3);
        assert_eq!(series.temperature, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_short_value_sequences_are_padded() {
        let series = WeatherSeries::new(
            1.0,
            2.0,
            Some("Europe/Berlin".to_string()),
            hours_from_midnight(6),
            vec![1.0; 6],
            vec![],
            vec![5.0, 6.0],
            24,
        );
        assert_eq!(series.len(), 6);
        assert_eq!(series.temperature, vec![1.0; 6]);
        assert_eq!(series.precipitation.len(), 6);
        assert!(series.precipitation.iter().all(|p| p.is_nan()));
        assert_eq!(series.wind_speed[..2], [5.0, 6.0]);
        assert!(series.wind_speed[2..].iter().all(|w| w.is_nan()));
    }

    #[test]
    fn test_values_without_times_are_dropped() {
        let series = WeatherSeries::new(
            1.0,
            2.0,
            None,
            vec![],
            vec![1.0; 3],
            vec![0.0; 3],
            vec![5.0; 3],
            24,
        );
        assert!(series.is_empty());
        assert!(series.temperature.is_empty());
    }
}
