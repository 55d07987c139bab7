//! Driving route summary

use serde::{Deserialize, Serialize};

/// Aggregate distance and duration of a driving route
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    /// Distance in meters
    pub distance_m: f64,
    /// Distance in kilometers, exactly `distance_m / 1000`
    pub distance_km: f64,
    /// Duration in seconds
    pub duration_s: f64,
    /// Duration in minutes, exactly `duration_s / 60`
    pub duration_min: f64,
}

impl RouteSummary {
    #[must_use]
    pub fn new(distance_m: f64, duration_s: f64) -> Self {
        Self {
            distance_m,
            distance_km: distance_m / 1000.0,
            duration_s,
            duration_min: duration_s / 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1_234_567.0, 45_296.0)]
    #[case(0.1, 0.7)]
    #[case(987_654.321, 12_345.678)]
    fn test_derived_units_are_exact(#[case] distance_m: f64, #[case] duration_s: f64) {
        let route = RouteSummary::new(distance_m, duration_s);
        assert_eq!(route.distance_km, distance_m / 1000.0);
        assert_eq!(route.duration_min, duration_s / 60.0);
        assert_eq!(route.distance_m, distance_m);
        assert_eq!(route.duration_s, duration_s);
    }
}
