//! Derived aggregates over a consolidated analysis
//!
//! Everything here is pure: no I/O, no failure modes. Data-quality problems
//! in the input are absorbed and show up only as reduced or explained output.

pub mod histogram;
pub mod risk;
pub mod upcoming;

pub use histogram::{HolidayHistogram, MONTH_LABELS, histogram};
pub use risk::{RiskAssessment, RiskFactors, TemperatureRange, risk, temperature_range};
pub use upcoming::upcoming_holidays;
