//! Plain-text and JSON rendering of a finished analysis

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{
    HolidayHistogram, RiskAssessment, histogram, risk, temperature_range, upcoming_holidays,
};
use crate::models::{AnalysisResult, WeatherSeries};

/// An analysis together with its derived aggregates
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub analysis: &'a AnalysisResult,
    pub histogram: HolidayHistogram,
    pub risk: RiskAssessment,
}

impl<'a> Report<'a> {
    #[must_use]
    pub fn new(analysis: &'a AnalysisResult) -> Self {
        Self {
            histogram: histogram(&analysis.holidays),
            risk: risk(
                &analysis.route,
                &analysis.destination_weather,
                &analysis.holidays,
            ),
            analysis,
        }
    }

    /// Render the report as text, previewing up to `preview` holidays from `today`
    #[must_use]
    pub fn render_text(&self, today: NaiveDate, preview: usize) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut output, today, preview);
        output
    }

    fn write_text(&self, out: &mut String, today: NaiveDate, preview: usize) -> std::fmt::Result {
        let a = self.analysis;

        writeln!(out, "Route Analysis: {} -> {} ({})", a.origin, a.destination, a.year)?;
        writeln!(out)?;

        writeln!(out, "Route")?;
        writeln!(
            out,
            "   Origin: {} ({})",
            a.origin_geo.formatted, a.origin_geo.coordinates
        )?;
        writeln!(
            out,
            "   Destination: {} ({})",
            a.destination_geo.formatted, a.destination_geo.coordinates
        )?;
        writeln!(
            out,
            "   Distance: {:.1} km | Estimated duration: {:.1} minutes",
            a.route.distance_km, a.route.duration_min
        )?;
        writeln!(out)?;

        let c = &a.country;
        writeln!(out, "Destination country")?;
        writeln!(
            out,
            "   {} ({}) | Region: {} / {}",
            c.display_name(),
            c.iso_code().unwrap_or("?"),
            c.region.as_deref().unwrap_or("Unknown"),
            c.subregion.as_deref().unwrap_or("Unknown")
        )?;
        writeln!(
            out,
            "   Capital: {} | Population: {}",
            c.capital,
            c.population
                .map_or_else(|| "Unknown".to_string(), |p| p.to_string())
        )?;
        writeln!(out, "   Timezones: {}", c.timezones.join(", "))?;
        writeln!(
            out,
            "   Currencies: {} | Languages: {}",
            c.currencies.join(", "),
            c.languages.join(", ")
        )?;
        writeln!(out)?;

        writeln!(out, "Upcoming holidays")?;
        let upcoming = upcoming_holidays(&a.holidays, today, preview);
        if upcoming.is_empty() {
            writeln!(out, "   No upcoming holidays found")?;
        }
        for holiday in upcoming {
            writeln!(out, "   {} - {}", holiday.date, holiday.display_name())?;
        }
        writeln!(out)?;

        writeln!(out, "Weather (next {} hours)", a.hours)?;
        write_weather_line(out, "Origin", &a.origin_weather)?;
        write_weather_line(out, "Destination", &a.destination_weather)?;
        writeln!(out)?;

        writeln!(out, "Public holidays per month in {}", c.display_name())?;
        for ((label, count), tooltip) in self
            .histogram
            .labels
            .iter()
            .zip(self.histogram.counts)
            .zip(&self.histogram.tooltips)
        {
            writeln!(
                out,
                "   {label} {:<8} {count:>2}  {tooltip}",
                "#".repeat(count as usize)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "Delivery risk: {}/100", self.risk.score)?;
        for line in &self.risk.explanations {
            writeln!(out, "   {line}")?;
        }

        Ok(())
    }
}

fn write_weather_line(out: &mut String, label: &str, series: &WeatherSeries) -> std::fmt::Result {
    match temperature_range(series) {
        Some(range) => {
            let precipitation: f64 = series
                .precipitation
                .iter()
                .filter(|p| p.is_finite())
                .sum();
            let max_wind = series
                .wind_speed
                .iter()
                .copied()
                .filter(|w| w.is_finite())
                .fold(0.0_f64, f64::max);
            writeln!(
                out,
                "   {label}: {:.1}°C to {:.1}°C | Precipitation {:.1} mm | Max wind {:.1} km/h",
                range.min, range.max, precipitation, max_wind
            )
        }
        None => writeln!(out, "   {label}: no temperature data"),
    }
}
