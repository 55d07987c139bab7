//! Monthly holiday frequency

use serde::Serialize;
use tracing::debug;

use crate::models::Holiday;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const EMPTY_TOOLTIP: &str = "No holidays";

/// Holiday counts and names per calendar month, index 0 = January
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolidayHistogram {
    pub counts: [u32; 12],
    pub labels: [&'static str; 12],
    /// Comma-separated holiday names, or "No holidays"
    pub tooltips: [String; 12],
}

impl HolidayHistogram {
    /// Sum of all bucket counts
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Zero-based month index of an ISO-like date, `None` if it has no usable month
fn month_index(date: &str) -> Option<usize> {
    let month: usize = date.split('-').nth(1)?.trim().parse().ok()?;
    (1..=12).contains(&month).then(|| month - 1)
}

/// Bucket holidays by month.
///
/// Dates without a numeric month component in 1..=12 are skipped.
#[must_use]
pub fn histogram(holidays: &[Holiday]) -> HolidayHistogram {
    let mut counts = [0_u32; 12];
    let mut names: [Vec<&str>; 12] = Default::default();

    for holiday in holidays {
        let Some(index) = month_index(&holiday.date) else {
            debug!(
                "Skipping holiday '{}' with malformed date '{}'",
                holiday.display_name(),
                holiday.date
            );
            continue;
        };
        counts[index] += 1;
        names[index].push(holiday.display_name());
    }

    let tooltips = names.map(|month| {
        if month.is_empty() {
            EMPTY_TOOLTIP.to_string()
        } else {
            month.join(", ")
        }
    });

    HolidayHistogram {
        counts,
        labels: MONTH_LABELS,
        tooltips,
    }
}
