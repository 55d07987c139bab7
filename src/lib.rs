//! `routewise` - route analysis and delivery risk scoring
//!
//! Combines geocoding, routing, weather, country metadata and public holiday
//! data for an origin/destination pair into one [`AnalysisResult`], then
//! derives a monthly holiday histogram and a 0-100 risk score from it.

pub mod aggregator;
pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod report;

// Re-export core types for public API
pub use aggregator::Aggregator;
pub use analysis::{HolidayHistogram, RiskAssessment, histogram, risk};
pub use config::RoutewiseConfig;
pub use error::AnalysisError;
pub use models::{
    AnalysisResult, Coordinates, CountryInfo, GeocodeResult, Holiday, RouteSummary,
    WeatherSeries,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AnalysisError>;
