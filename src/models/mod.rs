//! Data models for route analysis
//!
//! Value records produced once per analysis run:
//! - Location: geocoding results and coordinates
//! - Route: driving distance and duration
//! - Weather: hourly series per location
//! - Country and Holiday: destination metadata
//! - Analysis: the consolidated record

pub mod analysis;
pub mod country;
pub mod holiday;
pub mod location;
pub mod route;
pub mod weather;

pub use analysis::AnalysisResult;
pub use country::CountryInfo;
pub use holiday::Holiday;
pub use location::{Coordinates, GeocodeResult};
pub use route::RouteSummary;
pub use weather::WeatherSeries;
