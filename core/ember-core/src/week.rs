//! Monday-based week indexing for the heat map.

use chrono::{Datelike, NaiveDate};

pub const DAYS_IN_WEEK: usize = 7;

/// Single-letter labels under the heat-map cells, Monday first.
pub const DAY_LABELS: [&str; DAYS_IN_WEEK] = ["M", "T", "W", "T", "F", "S", "S"];

/// Index of `date` in a Monday=0 .. Sunday=6 week.
pub fn week_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Copies up to seven values, zero-filling any missing trailing days.
pub fn normalize_week(values: &[f64]) -> [f64; DAYS_IN_WEEK] {
    let mut week = [0.0; DAYS_IN_WEEK];
    for (slot, value) in week.iter_mut().zip(values) {
        *slot = *value;
    }
    week
}
