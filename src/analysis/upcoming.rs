//! Upcoming holiday preview

use chrono::NaiveDate;

use crate::models::Holiday;

/// Holidays on or after `from`, earliest first, at most `limit` of them.
///
/// The provider list is not assumed to be sorted. Entries whose date does not
/// parse as `YYYY-MM-DD` are left out.
#[must_use]
pub fn upcoming_holidays(holidays: &[Holiday], from: NaiveDate, limit: usize) -> Vec<&Holiday> {
    let mut dated: Vec<(NaiveDate, &Holiday)> = holidays
        .iter()
        .filter_map(|h| {
            NaiveDate::parse_from_str(h.date.trim(), "%Y-%m-%d")
                .ok()
                .map(|date| (date, h))
        })
        .filter(|(date, _)| *date >= from)
        .collect();

    // Stable sort keeps provider order for holidays sharing a date
    dated.sort_by_key(|(date, _)| *date);
    dated.into_iter().take(limit).map(|(_, h)| h).collect()
}
