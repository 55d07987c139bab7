//! Composite delivery risk score
//!
//! Three independent factors, each normalized to `[0, 1]`, are weighted and
//! summed into a score from 0 to 100:
//!
//! | Factor   | Normalization                                   | Weight |
//! |----------|-------------------------------------------------|--------|
//! | Distance | `km / 2000`                                     | 40     |
//! | Weather  | `range / 15`, plus 0.3 if the minimum is <= 0°C | 40     |
//! | Holidays | `count / 20`                                    | 20     |
//!
//! The final score is rounded half away from zero, which over the score's
//! non-negative range means halves round up (62.5 becomes 63).

use serde::Serialize;

use crate::models::{Holiday, RouteSummary, WeatherSeries};

const DISTANCE_SATURATION_KM: f64 = 2000.0;
const TEMPERATURE_RANGE_SATURATION: f64 = 15.0;
const COLD_BONUS: f64 = 0.3;
const COLD_THRESHOLD: f64 = 0.0;
const HOLIDAY_SATURATION: f64 = 20.0;

const DISTANCE_WEIGHT: f64 = 40.0;
const WEATHER_WEIGHT: f64 = 40.0;
const HOLIDAY_WEIGHT: f64 = 20.0;

/// Normalized contributions, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskFactors {
    pub distance: f64,
    pub weather: f64,
    pub holidays: f64,
}

impl RiskFactors {
    /// Weighted sum before clamping and rounding
    #[must_use]
    pub fn raw_score(&self) -> f64 {
        DISTANCE_WEIGHT * self.distance
            + WEATHER_WEIGHT * self.weather
            + HOLIDAY_WEIGHT * self.holidays
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Score in `0..=100`
    pub score: u8,
    /// One line per factor, then the final score
    pub explanations: Vec<String>,
    pub factors: RiskFactors,
}

/// Lowest and highest temperature of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Min and max over the finite temperatures of `series`, `None` if there are none
#[must_use]
pub fn temperature_range(series: &WeatherSeries) -> Option<TemperatureRange> {
    series
        .temperature
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .fold(None, |range, t| match range {
            None => Some(TemperatureRange { min: t, max: t }),
            Some(r) => Some(TemperatureRange {
                min: r.min.min(t),
                max: r.max.max(t),
            }),
        })
}

/// Clamp to `[0, 1]`, mapping NaN to 0
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Score the delivery risk of a route
#[must_use]
pub fn risk(
    route: &RouteSummary,
    destination_weather: &WeatherSeries,
    holidays: &[Holiday],
) -> RiskAssessment {
    let mut explanations = Vec::with_capacity(5);

    let distance_km = route.distance_km;
    let distance = unit(distance_km / DISTANCE_SATURATION_KM);
    explanations.push(format!("Distance: {distance_km:.0} km"));

    let weather = match temperature_range(destination_weather) {
        Some(range) => {
            let volatility = unit(range.spread() / TEMPERATURE_RANGE_SATURATION);
            let cold = range.min <= COLD_THRESHOLD;

            explanations.push(format!(
                "Temperature range: {:.1}°C to {:.1}°C (Range {:.1}°C)",
                range.min,
                range.max,
                range.spread()
            ));
            if cold {
                explanations.push("Cold conditions detected (<= 0°C).".to_string());
            }

            unit(volatility + if cold { COLD_BONUS } else { 0.0 })
        }
        None => {
            explanations
                .push("No temperature data available, weather risk not considered.".to_string());
            0.0
        }
    };

    let holiday_count = holidays.len();
    let holiday_factor = unit(holiday_count as f64 / HOLIDAY_SATURATION);
    explanations.push(format!("Total public holidays this year: {holiday_count}"));

    let factors = RiskFactors {
        distance,
        weather,
        holidays: holiday_factor,
    };

    // Factors are already bounded, the clamp only guards float drift
    let score = factors.raw_score().clamp(0.0, 100.0).round() as u8;
    explanations.push(format!("Weighted risk score (0-100): {score}"));

    RiskAssessment {
        score,
        explanations,
        factors,
    }
}
