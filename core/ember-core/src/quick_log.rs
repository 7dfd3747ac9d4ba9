//! Quick-log transition: the single-tap update of today's value.
//!
//! ```text
//! completion:  Unlogged (0) ──tap──▶ Logged (1) ──tap──▶ Unlogged (0)
//! count:       n ──tap──▶ n + 1
//! ```
//!
//! This module is pure. Reading the snapshot, persisting the result and
//! appending to the pending queue happen in [`crate::engine`].

use serde::{Deserialize, Serialize};

use crate::error::EmberError;
use crate::snapshot::ActivitySnapshot;
use crate::week::{normalize_week, DAYS_IN_WEEK};

/// How a quick-log treats `currentStreak`.
///
/// The two shipped widgets disagree: the Android receiver never touches the
/// streak and leaves it to the main app's next sync, while the iOS intent
/// adjusts it locally. The default mirrors Android.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, uniffi::Enum,
)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    #[default]
    Untouched,
    Maintain,
}

impl StreakPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakPolicy::Untouched => "untouched",
            StreakPolicy::Maintain => "maintain",
        }
    }
}

impl std::str::FromStr for StreakPolicy {
    type Err = EmberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "untouched" => Ok(StreakPolicy::Untouched),
            "maintain" => Ok(StreakPolicy::Maintain),
            other => Err(EmberError::UnknownStreakPolicy(other.to_string())),
        }
    }
}

/// Outcome of one quick-log on a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickLogResult {
    pub snapshot: ActivitySnapshot,
    pub previous_value: f64,
    pub new_value: f64,
}

/// The value today becomes after one tap.
pub fn next_value(is_completion: bool, today_value: f64) -> f64 {
    if is_completion {
        if today_value > 0.0 {
            0.0
        } else {
            1.0
        }
    } else {
        today_value + 1.0
    }
}

/// Streak after moving today's value from `previous` to `new`.
pub fn next_streak(policy: StreakPolicy, streak: u32, previous: f64, new: f64) -> u32 {
    match policy {
        StreakPolicy::Untouched => streak,
        StreakPolicy::Maintain => {
            if previous <= 0.0 && new > 0.0 {
                streak.saturating_add(1)
            } else if previous > 0.0 && new <= 0.0 && streak > 0 {
                streak - 1
            } else {
                streak
            }
        }
    }
}

/// Applies one quick-log tap to `snapshot`.
///
/// `today_index` is the Monday-based index of the caller's local date. Values
/// past the end of the week are clamped to Sunday.
pub fn apply_quick_log(
    snapshot: &ActivitySnapshot,
    today_index: usize,
    policy: StreakPolicy,
) -> QuickLogResult {
    let today_index = today_index.min(DAYS_IN_WEEK - 1);
    let previous_value = snapshot.today_value;
    let new_value = next_value(snapshot.is_completion, previous_value);

    let mut week = normalize_week(&snapshot.week_values);
    week[today_index] = new_value;

    let updated = ActivitySnapshot {
        today_value: new_value,
        week_values: week.to_vec(),
        current_streak: next_streak(policy, snapshot.current_streak, previous_value, new_value),
        ..snapshot.clone()
    };

    QuickLogResult {
        snapshot: updated,
        previous_value,
        new_value,
    }
}
