//! End-to-end tests for the analysis pipeline using scripted providers

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rstest::{fixture, rstest};
use routewise::analysis::upcoming_holidays;
use routewise::providers::{
    CountryProvider, Geocoder, HolidayProvider, Provider, RouteProvider, TransportError,
    WeatherProvider,
};
use routewise::report::Report;
use routewise::{
    Aggregator, AnalysisError, Coordinates, CountryInfo, GeocodeResult, Holiday, RouteSummary,
    WeatherSeries, histogram, risk,
};
use serde_json::json;

type CallLog = Rc<RefCell<Vec<String>>>;

/// Canned responses shared by every fake provider
#[derive(Clone)]
struct Script {
    log: CallLog,
    country_component: Option<&'static str>,
    country_code: Option<&'static str>,
    distance_m: f64,
    destination_temps: Vec<f64>,
    holidays: Vec<Holiday>,
    unknown_place: Option<&'static str>,
    failing: Option<Provider>,
}

impl Script {
    fn record(&self, call: String) {
        self.log.borrow_mut().push(call);
    }

    fn fail_if(&self, provider: Provider) -> Result<(), TransportError> {
        if self.failing == Some(provider) {
            Err(TransportError::Status {
                endpoint: provider.to_string(),
                status: 503,
                body: "service unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

struct ScriptedGeocoder(Script);
struct ScriptedRouter(Script);
struct ScriptedWeather(Script);
struct ScriptedCountries(Script);
struct ScriptedHolidays(Script);

impl Geocoder for ScriptedGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>, TransportError> {
        self.0.record(format!("geocode:{query}"));
        self.0.fail_if(Provider::Geocoding)?;
        if self.0.unknown_place == Some(query) {
            return Ok(None);
        }

        let mut components = BTreeMap::new();
        if let Some(country) = self.0.country_component {
            components.insert("country".to_string(), json!(country));
        }
        // Destination sits north of the origin so the weather fake can tell them apart
        let latitude = if self.0.calls().len() == 1 { 48.0 } else { 52.0 };
        Ok(Some(GeocodeResult {
            formatted: format!("{query}, Somewhere"),
            coordinates: Coordinates::new(latitude, 10.0).unwrap(),
            components,
        }))
    }
}

impl RouteProvider for ScriptedRouter {
    fn route_summary(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
    ) -> Result<RouteSummary, TransportError> {
        self.0.record("route".to_string());
        self.0.fail_if(Provider::Routing)?;
        Ok(RouteSummary::new(self.0.distance_m, 3_600.0))
    }
}

impl WeatherProvider for ScriptedWeather {
    fn weather(
        &self,
        coordinates: Coordinates,
        hours: usize,
    ) -> Result<WeatherSeries, TransportError> {
        self.0.record(format!("weather:{}", coordinates.latitude));
        self.0.fail_if(Provider::Weather)?;

        let temps = if coordinates.latitude > 50.0 {
            self.0.destination_temps.clone()
        } else {
            vec![15.0; hours]
        };
        Ok(series(coordinates, &temps, hours))
    }
}

impl CountryProvider for ScriptedCountries {
    fn country_info(&self, name: &str) -> Result<CountryInfo, TransportError> {
        self.0.record(format!("country:{name}"));
        self.0.fail_if(Provider::Countries)?;
        Ok(CountryInfo {
            name: Some(name.to_string()),
            official_name: None,
            country_code: self.0.country_code.map(str::to_string),
            region: Some("Europe".to_string()),
            subregion: None,
            capital: "Unknown".to_string(),
            population: Some(1_000_000),
            timezones: vec!["UTC+01:00".to_string()],
            currencies: vec!["EUR".to_string()],
            languages: vec!["German".to_string()],
        })
    }
}

impl HolidayProvider for ScriptedHolidays {
    fn holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>, TransportError> {
        self.0.record(format!("holidays:{year}:{country_code}"));
        self.0.fail_if(Provider::Holidays)?;
        Ok(self.0.holidays.clone())
    }
}

fn series(coordinates: Coordinates, temps: &[f64], hours: usize) -> WeatherSeries {
    let start: NaiveDateTime = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let times = (0..temps.len())
        .map(|h| start + Duration::hours(h as i64))
        .collect();
    WeatherSeries::new(
        coordinates.latitude,
        coordinates.longitude,
        Some("Europe/Berlin".to_string()),
        times,
        temps.to_vec(),
        vec![0.0; temps.len()],
        vec![10.0; temps.len()],
        hours,
    )
}

fn numbered_holidays(count: usize) -> Vec<Holiday> {
    (0..count)
        .map(|i| Holiday::new(format!("2025-{:02}-10", i % 12 + 1), format!("Holiday {i}")))
        .collect()
}

#[fixture]
fn script() -> Script {
    Script {
        log: CallLog::default(),
        country_component: Some("Germany"),
        country_code: Some("DE"),
        distance_m: 1_000_000.0,
        destination_temps: vec![-2.0, 10.0],
        holidays: numbered_holidays(10),
        unknown_place: None,
        failing: None,
    }
}

fn aggregator(script: &Script) -> Aggregator {
    Aggregator::new(
        ScriptedGeocoder(script.clone()),
        ScriptedRouter(script.clone()),
        ScriptedWeather(script.clone()),
        ScriptedCountries(script.clone()),
        ScriptedHolidays(script.clone()),
    )
}

#[rstest]
fn test_full_pipeline_scores_reference_route(script: Script) {
    let analysis = aggregator(&script)
        .analyse("Hamburg", "Munich", 2025, 24)
        .unwrap();

    assert_eq!(
        script.calls(),
        vec![
            "geocode:Hamburg",
            "geocode:Munich",
            "route",
            "weather:48",
            "weather:52",
            "country:Germany",
            "holidays:2025:DE",
        ]
    );
    assert_eq!(analysis.route.distance_km, 1000.0);
    assert_eq!(analysis.route.duration_min, 60.0);
    assert_eq!(analysis.origin_weather.len(), 24);
    assert_eq!(analysis.destination_weather.len(), 2);

    let assessment = risk(
        &analysis.route,
        &analysis.destination_weather,
        &analysis.holidays,
    );
    assert_eq!(assessment.score, 70);
    assert!(
        assessment
            .explanations
            .contains(&"Cold conditions detected (<= 0°C).".to_string())
    );
}

#[rstest]
fn test_quiet_route_scores_zero(mut script: Script) {
    script.distance_m = 0.0;
    script.destination_temps = vec![];
    script.holidays = vec![];

    let analysis = aggregator(&script)
        .analyse("Hamburg", "Munich", 2025, 24)
        .unwrap();
    let report = Report::new(&analysis);

    assert_eq!(report.risk.score, 0);
    assert!(
        report
            .risk
            .explanations
            .contains(&"No temperature data available, weather risk not considered.".to_string())
    );
    assert_eq!(report.histogram.total(), 0);
}

#[rstest]
fn test_holiday_histogram_from_pipeline(mut script: Script) {
    script.holidays = vec![
        Holiday::new("2025-12-25", "Christmas"),
        Holiday::new("2025-01-01", "New Year"),
    ];

    let analysis = aggregator(&script)
        .analyse("Hamburg", "Munich", 2025, 24)
        .unwrap();
    let months = histogram(&analysis.holidays);

    let mut expected = [0u32; 12];
    expected[0] = 1;
    expected[11] = 1;
    assert_eq!(months.counts, expected);
    assert_eq!(months.tooltips[11], "Christmas");
    assert_eq!(months.tooltips[0], "New Year");
    assert_eq!(months.tooltips[1], "No holidays");
}

#[rstest]
fn test_missing_country_code_never_fetches_holidays(mut script: Script) {
    script.country_code = None;

    let err = aggregator(&script)
        .analyse("Hamburg", "Atlantis", 2025, 24)
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MissingCountryCode { .. }));
    assert!(
        !script
            .calls()
            .iter()
            .any(|call| call.starts_with("holidays"))
    );
}

#[rstest]
fn test_country_falls_back_to_raw_destination(mut script: Script) {
    script.country_component = None;

    aggregator(&script)
        .analyse("Hamburg", "  Munich ", 2025, 24)
        .unwrap();

    assert!(script.calls().contains(&"country:Munich".to_string()));
}

#[rstest]
fn test_unknown_place_is_a_lookup_failure(mut script: Script) {
    script.unknown_place = Some("Nowhere");

    let err = aggregator(&script)
        .analyse("Nowhere", "Munich", 2025, 24)
        .unwrap_err();

    match err {
        AnalysisError::LookupFailure { query } => assert_eq!(query, "Nowhere"),
        other => panic!("expected lookup failure, got {other:?}"),
    }
    assert_eq!(script.calls(), vec!["geocode:Nowhere"]);
}

#[rstest]
#[case(Provider::Geocoding, "geocode:Hamburg")]
#[case(Provider::Routing, "route")]
#[case(Provider::Weather, "weather:48")]
#[case(Provider::Countries, "country:Germany")]
#[case(Provider::Holidays, "holidays:2025:DE")]
fn test_provider_failure_stops_the_run(
    mut script: Script,
    #[case] provider: Provider,
    #[case] last_call: &str,
) {
    script.failing = Some(provider);

    let err = aggregator(&script)
        .analyse("Hamburg", "Munich", 2025, 24)
        .unwrap_err();

    match &err {
        AnalysisError::ProviderFailure { provider: failed, .. } => assert_eq!(*failed, provider),
        other => panic!("expected provider failure, got {other:?}"),
    }
    assert!(err.to_string().contains(&provider.to_string()));
    assert_eq!(script.calls().last().map(String::as_str), Some(last_call));
}

#[rstest]
#[case("", "Munich", 24)]
#[case("Hamburg", "   ", 24)]
#[case("Hamburg", "Munich", 0)]
fn test_invalid_requests_make_no_calls(
    script: Script,
    #[case] origin: &str,
    #[case] destination: &str,
    #[case] hours: u32,
) {
    let err = aggregator(&script)
        .analyse(origin, destination, 2025, hours)
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    assert!(script.calls().is_empty());
}

#[rstest]
fn test_report_renders_and_serializes(script: Script) {
    let analysis = aggregator(&script)
        .analyse("Hamburg", "Munich", 2025, 24)
        .unwrap();
    let report = Report::new(&analysis);

    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let text = report.render_text(today, 3);
    assert!(text.contains("Hamburg"));
    assert!(text.contains("Weighted risk score (0-100): 70"));

    let preview = upcoming_holidays(&analysis.holidays, today, 3);
    assert_eq!(preview.len(), 3);
    assert!(preview.iter().all(|holiday| holiday.date.as_str() >= "2025-06-01"));

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["risk"]["score"], 70);
    assert_eq!(value["analysis"]["year"], 2025);
    assert_eq!(value["histogram"]["counts"].as_array().unwrap().len(), 12);
}
