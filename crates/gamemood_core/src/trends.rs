//! Consecutive-day streaks and day-bucketed mood trends.

use std::collections::{BTreeMap, HashSet};

use chrono::{Local, NaiveDate, TimeZone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{MoodDimensions, MoodEntry};
use crate::utils::{days_before, local_date, mean};
use crate::wellness::usable_entries;

/// Days scanned backwards from `today`, inclusive.
pub const STREAK_WINDOW_DAYS: u64 = 30;
pub const TREND_LABEL_FORMAT: &str = "%b %d";

/// Streak of days with at least one mood entry, bucketed by local date.
pub fn compute_streak(history: &[MoodEntry], today: NaiveDate) -> u32 {
    compute_streak_in(history, today, &Local)
}

/// [`compute_streak`] with an explicit time zone.
///
/// Days before the first hit are skipped, so a user who last checked in
/// yesterday (or a few days ago) still has a streak; the first empty day
/// after a hit ends it.
pub fn compute_streak_in<Tz: TimeZone>(history: &[MoodEntry], today: NaiveDate, tz: &Tz) -> u32 {
    let days: HashSet<NaiveDate> = history
        .iter()
        .map(|e| local_date(&e.created_at, tz))
        .collect();

    let mut streak = 0u32;
    for offset in 0..STREAK_WINDOW_DAYS {
        let Some(day) = days_before(today, offset) else {
            break;
        };
        if days.contains(&day) {
            streak += 1;
        } else if streak > 0 {
            break;
        }
    }
    streak
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendBucket {
    #[default]
    Day,
}

/// Per-bucket means of the charted mood axes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TrendPoint {
    /// `None` only for the empty-history placeholder.
    pub date: Option<NaiveDate>,
    pub label: String,
    pub mood_score: f64,
    pub energy: f64,
    pub stress: f64,
    pub focus: f64,
}

impl TrendPoint {
    /// Placeholder shown when there is nothing to chart.
    pub fn placeholder() -> Self {
        Self {
            date: None,
            label: "Today".to_string(),
            mood_score: 7.0,
            energy: 6.0,
            stress: 4.0,
            focus: 6.0,
        }
    }
}

/// Trend series bucketed by local date, oldest first.
pub fn compute_trend(history: &[MoodEntry], bucket: TrendBucket) -> Vec<TrendPoint> {
    compute_trend_in(history, bucket, &Local)
}

/// [`compute_trend`] with an explicit time zone.
pub fn compute_trend_in<Tz: TimeZone>(
    history: &[MoodEntry],
    bucket: TrendBucket,
    tz: &Tz,
) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<NaiveDate, Vec<MoodDimensions>> = BTreeMap::new();
    for (entry, dims) in usable_entries(history) {
        let key = match bucket {
            TrendBucket::Day => local_date(&entry.created_at, tz),
        };
        buckets.entry(key).or_default().push(dims);
    }

    if buckets.is_empty() {
        return vec![TrendPoint::placeholder()];
    }

    buckets
        .into_iter()
        .map(|(date, dims)| TrendPoint {
            date: Some(date),
            label: date.format(TREND_LABEL_FORMAT).to_string(),
            mood_score: axis_mean(&dims, MoodDimensions::mood_score),
            energy: axis_mean(&dims, |d| f64::from(d.energy_level)),
            stress: axis_mean(&dims, |d| f64::from(d.stress_level)),
            focus: axis_mean(&dims, |d| f64::from(d.focus_level)),
        })
        .collect()
}

fn axis_mean(dims: &[MoodDimensions], f: impl Fn(&MoodDimensions) -> f64) -> f64 {
    mean(dims.iter().map(f)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    fn entry_at(ts: DateTime<Utc>, e: u8, s: u8, f: u8) -> MoodEntry {
        MoodEntry::new(MoodDimensions::new(e, s, f, 5, 5).unwrap(), ts)
    }

    fn on(days: &[u32]) -> Vec<MoodEntry> {
        days.iter().map(|d| entry_at(at(*d, 12), 5, 5, 5)).collect()
    }

    #[test]
    fn streak_today_and_yesterday() {
        assert_eq!(compute_streak_in(&on(&[20, 19]), day(20), &Utc), 2);
    }

    #[test]
    fn streak_empty_history_is_zero() {
        assert_eq!(compute_streak_in(&[], day(20), &Utc), 0);
    }

    #[test]
    fn streak_gap_before_first_hit_is_skipped() {
        // nothing today, run of two ending yesterday
        assert_eq!(compute_streak_in(&on(&[19, 18]), day(20), &Utc), 2);
    }

    #[test]
    fn streak_only_three_days_ago_counts_that_day() {
        assert_eq!(compute_streak_in(&on(&[17]), day(20), &Utc), 1);
    }

    #[test]
    fn streak_gap_after_hit_stops() {
        // today, yesterday, then a hole on the 18th
        assert_eq!(compute_streak_in(&on(&[20, 19, 17, 16]), day(20), &Utc), 2);
    }

    #[test]
    fn streak_counts_multiple_entries_per_day_once() {
        let mut history = on(&[20, 19]);
        history.push(entry_at(at(20, 22), 3, 3, 3));
        assert_eq!(compute_streak_in(&history, day(20), &Utc), 2);
    }

    #[test]
    fn streak_ignores_entries_outside_window() {
        let history: Vec<MoodEntry> = (1..=31)
            .map(|d| entry_at(at(d, 8), 5, 5, 5))
            .collect();
        assert_eq!(compute_streak_in(&history, day(31), &Utc), 30);
        assert_eq!(compute_streak_in(&on(&[1]), day(31), &Utc), 0);
    }

    #[test]
    fn streak_ignores_future_entries() {
        assert_eq!(compute_streak_in(&on(&[21, 22]), day(20), &Utc), 0);
    }

    #[test]
    fn trend_empty_history_placeholder() {
        let points = compute_trend_in(&[], TrendBucket::Day, &Utc);
        assert_eq!(points, vec![TrendPoint::placeholder()]);
        assert_eq!(points[0].label, "Today");
        assert_eq!(points[0].mood_score, 7.0);
    }

    #[test]
    fn trend_groups_by_day_ascending() {
        let history = vec![
            entry_at(at(12, 18), 8, 2, 6),
            entry_at(at(10, 9), 4, 6, 4),
            entry_at(at(12, 8), 6, 4, 8),
        ];
        let points = compute_trend_in(&history, TrendBucket::Day, &Utc);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, Some(day(10)));
        assert_eq!(points[0].label, "Mar 10");
        assert_eq!(points[1].label, "Mar 12");
        assert_eq!(points[1].energy, 7.0);
        assert_eq!(points[1].stress, 3.0);
        assert_eq!(points[1].focus, 7.0);
        // (4 + 4 + 4 + 5 + 5) / 5
        assert!((points[0].mood_score - 4.4).abs() < 1e-9);
    }

    #[test]
    fn trend_skips_unusable_entries() {
        let mut broken = entry_at(at(11, 9), 5, 5, 5);
        broken.focus_level = None;
        let points = compute_trend_in(&[broken], TrendBucket::Day, &Utc);
        assert_eq!(points, vec![TrendPoint::placeholder()]);
    }
}
