//! Picking the most recent record out of an unordered list

use crate::dates::Dated;
use std::cmp::Reverse;

/// Most recent record by normalized date
///
/// Scans left to right and only replaces the current pick on a strictly newer
/// date, so the first of several equally recent records wins. Unknown dates
/// rank below every known date.
pub fn select_latest<T: Dated>(records: &[T]) -> Option<&T> {
    let mut iter = records.iter();
    let first = iter.next()?;

    let mut latest = first;
    let mut latest_date = first.calendar_date();
    for record in iter {
        let date = record.calendar_date();
        if date > latest_date {
            latest = record;
            latest_date = date;
        }
    }
    Some(latest)
}

/// Newest first, stable for equal dates; unknown dates go last
pub fn sort_newest_first<T: Dated>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by_cached_key(|r| Reverse(r.calendar_date()));
    records
}
