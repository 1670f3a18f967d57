//! Dashboard and sidebar summaries built on the aggregator and trends.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{GameSession, MoodEntry, UserProfile};
use crate::trends::{TrendBucket, TrendPoint, compute_streak_in, compute_trend_in};
use crate::utils::{mean, round1};
use crate::wellness::{WellnessMetrics, aggregate, average_mood_score};

/// Points credited per streak day when the profile has no stored total.
pub const POINTS_PER_STREAK_DAY: f64 = 50.0;

/// Dashboard time window.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Since the start of the current week (Sunday, local midnight).
    #[default]
    Week,
    /// Last 30 days.
    Month,
    /// Last 7 days.
    Recent,
}

impl TimeRange {
    /// First instant of the window ending at `now`, in `tz`'s calendar.
    pub fn start_in<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
        match self {
            TimeRange::Week => {
                let today = now.with_timezone(tz).date_naive();
                let sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
                local_midnight(sunday, tz)
            }
            TimeRange::Month => now - Duration::days(30),
            TimeRange::Recent => now - Duration::days(7),
        }
    }

    /// Session window: 30 days for `Month`, otherwise 7.
    fn session_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeRange::Month => now - Duration::days(30),
            _ => now - Duration::days(7),
        }
    }
}

fn local_midnight<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        // midnight skipped by a DST change
        None => naive.and_utc(),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DashboardStats {
    /// One decimal place, 0 without entries.
    pub avg_mood_score: f64,
    pub total_mood_entries: usize,
    pub total_play_time_minutes: u64,
    pub total_sessions: usize,
    /// One decimal place, 0 without sessions.
    pub avg_session_satisfaction: f64,
    pub wellness_streak: u32,
}

/// Headline numbers for the entries and sessions inside `range`, with the
/// range boundaries taken in `tz`.
pub fn dashboard_stats_in<Tz: TimeZone>(
    history: &[MoodEntry],
    sessions: &[GameSession],
    profile: Option<&UserProfile>,
    range: TimeRange,
    now: DateTime<Utc>,
    tz: &Tz,
) -> DashboardStats {
    let entries = entries_in_range(history, range, now, tz);
    let sessions = sessions_in_range(sessions, range, now);
    stats_for(&entries, &sessions, profile)
}

fn entries_in_range<Tz: TimeZone>(
    history: &[MoodEntry],
    range: TimeRange,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<MoodEntry> {
    let start = range.start_in(now, tz);
    history
        .iter()
        .filter(|e| e.created_at >= start)
        .cloned()
        .collect()
}

fn sessions_in_range(sessions: &[GameSession], range: TimeRange, now: DateTime<Utc>) -> Vec<GameSession> {
    let start = range.session_start(now);
    sessions
        .iter()
        .filter(|s| s.created_at >= start && s.is_valid())
        .cloned()
        .collect()
}

fn stats_for(
    entries: &[MoodEntry],
    sessions: &[GameSession],
    profile: Option<&UserProfile>,
) -> DashboardStats {
    let usable = entries.iter().filter(|e| e.is_usable()).count();
    DashboardStats {
        avg_mood_score: average_mood_score(entries).unwrap_or_default(),
        total_mood_entries: usable,
        total_play_time_minutes: sessions.iter().map(|s| u64::from(s.duration_minutes)).sum(),
        total_sessions: sessions.len(),
        avg_session_satisfaction: mean(sessions.iter().map(|s| s.satisfaction_rating))
            .map(round1)
            .unwrap_or_default(),
        wellness_streak: profile.map(|p| p.wellness_streak).unwrap_or_default(),
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Attention,
    Achievement,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct WellnessInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl WellnessInsight {
    fn new(kind: InsightKind, title: &str, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// Short observations shown beside the dashboard charts.
pub fn wellness_insights(stats: &DashboardStats) -> Vec<WellnessInsight> {
    if stats.total_mood_entries == 0 {
        return vec![WellnessInsight::new(
            InsightKind::Attention,
            "Start Your Wellness Journey",
            "Begin tracking your mood to get personalized gaming recommendations and insights.",
        )];
    }

    let mut insights = Vec::new();
    if stats.avg_mood_score >= 7.5 {
        insights.push(WellnessInsight::new(
            InsightKind::Positive,
            "Great Mood Trends!",
            format!(
                "Your average mood score of {:.1}/10 shows excellent emotional wellness.",
                stats.avg_mood_score
            ),
        ));
    } else if stats.avg_mood_score < 5.0 {
        insights.push(WellnessInsight::new(
            InsightKind::Attention,
            "Focus on Self-Care",
            "Your mood scores suggest you might benefit from more stress-relief activities.",
        ));
    }

    if stats.wellness_streak >= 7 {
        insights.push(WellnessInsight::new(
            InsightKind::Achievement,
            "Wellness Streak!",
            format!(
                "Amazing! You've maintained your wellness routine for {} days.",
                stats.wellness_streak
            ),
        ));
    }

    if stats.total_play_time_minutes > 0 && stats.avg_session_satisfaction >= 4.0 {
        insights.push(WellnessInsight::new(
            InsightKind::Positive,
            "Balanced Gaming",
            "Your gaming sessions are contributing positively to your wellness.",
        ));
    }
    insights
}

/// Everything the dashboard page renders for one time range.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DashboardSummary {
    pub range: TimeRange,
    pub stats: DashboardStats,
    pub insights: Vec<WellnessInsight>,
    pub trend: Vec<TrendPoint>,
    pub metrics: WellnessMetrics,
}

pub fn dashboard_summary(
    history: &[MoodEntry],
    sessions: &[GameSession],
    profile: Option<&UserProfile>,
    range: TimeRange,
    now: DateTime<Utc>,
) -> DashboardSummary {
    dashboard_summary_in(history, sessions, profile, range, now, &Local)
}

pub fn dashboard_summary_in<Tz: TimeZone>(
    history: &[MoodEntry],
    sessions: &[GameSession],
    profile: Option<&UserProfile>,
    range: TimeRange,
    now: DateTime<Utc>,
    tz: &Tz,
) -> DashboardSummary {
    let stats = dashboard_stats_in(history, sessions, profile, range, now, tz);
    let entries = entries_in_range(history, range, now, tz);
    DashboardSummary {
        range,
        insights: wellness_insights(&stats),
        trend: compute_trend_in(&entries, TrendBucket::Day, tz),
        metrics: aggregate(history, sessions, profile),
        stats,
    }
}

/// Navigation sidebar figures.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct SidebarSummary {
    pub wellness_streak: u32,
    pub games_played: usize,
    /// One decimal place, 0 without entries.
    pub mood_score: f64,
    pub level: u8,
    pub total_points: f64,
}

pub fn sidebar_summary(
    history: &[MoodEntry],
    sessions: &[GameSession],
    profile: Option<&UserProfile>,
    today: NaiveDate,
) -> SidebarSummary {
    sidebar_summary_in(history, sessions, profile, today, &Local)
}

/// A stored profile streak wins over the one computed from `history`.
pub fn sidebar_summary_in<Tz: TimeZone>(
    history: &[MoodEntry],
    sessions: &[GameSession],
    profile: Option<&UserProfile>,
    today: NaiveDate,
    tz: &Tz,
) -> SidebarSummary {
    let wellness_streak = match profile.map(|p| p.wellness_streak) {
        Some(stored) if stored > 0 => stored,
        _ => compute_streak_in(history, today, tz),
    };
    let games_played = sessions
        .iter()
        .map(|s| s.game_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_points = match profile.map(|p| p.total_wellness_score) {
        Some(total) if total > 0.0 => total,
        _ => f64::from(wellness_streak) * POINTS_PER_STREAK_DAY,
    };
    SidebarSummary {
        wellness_streak,
        games_played,
        mood_score: average_mood_score(history).unwrap_or_default(),
        level: user_level(total_points),
        total_points,
    }
}

/// Level 1 to 5 for a wellness point total.
pub fn user_level(total_points: f64) -> u8 {
    match total_points {
        p if p >= 2000.0 => 5,
        p if p >= 1500.0 => 4,
        p if p >= 1000.0 => 3,
        p if p >= 500.0 => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoodDimensions;

    // Wednesday
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 18, 15, 0, 0).unwrap()
    }

    fn entry(days_ago: i64, e: u8, s: u8) -> MoodEntry {
        MoodEntry::new(
            MoodDimensions::new(e, s, 5, 5, 5).unwrap(),
            now() - Duration::days(days_ago),
        )
    }

    fn session(game: &str, days_ago: i64, minutes: u32, rating: f64) -> GameSession {
        GameSession {
            id: None,
            game_id: game.into(),
            pre_mood_entry_id: "m".into(),
            post_mood_entry_id: None,
            duration_minutes: minutes,
            satisfaction_rating: rating,
            mood_improvement_score: None,
            session_context: None,
            break_reminders_used: None,
            wellness_activities: Vec::new(),
            created_at: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn week_starts_on_sunday_midnight() {
        let start = TimeRange::Week.start_in(now(), &Utc);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(
            TimeRange::Recent.start_in(now(), &Utc),
            now() - Duration::days(7)
        );
        assert_eq!(
            TimeRange::Month.start_in(now(), &Utc),
            now() - Duration::days(30)
        );
    }

    #[test]
    fn stats_respect_range() {
        let history = vec![entry(0, 9, 1), entry(2, 9, 1), entry(5, 1, 10)];
        let sessions = vec![
            session("a", 1, 30, 5.0),
            session("b", 6, 45, 4.0),
            session("c", 20, 90, 3.0),
        ];
        let profile = UserProfile {
            wellness_streak: 8,
            ..Default::default()
        };

        let week = dashboard_stats_in(&history, &sessions, Some(&profile), TimeRange::Week, now(), &Utc);
        assert_eq!(week.total_mood_entries, 2);
        // (9 + 9 + 5 + 5 + 5) / 5
        assert_eq!(week.avg_mood_score, 6.6);
        assert_eq!(week.total_sessions, 2);
        assert_eq!(week.total_play_time_minutes, 75);
        assert_eq!(week.avg_session_satisfaction, 4.5);
        assert_eq!(week.wellness_streak, 8);

        let month = dashboard_stats_in(&history, &sessions, None, TimeRange::Month, now(), &Utc);
        assert_eq!(month.total_mood_entries, 3);
        assert_eq!(month.total_sessions, 3);
        assert_eq!(month.avg_session_satisfaction, 4.0);
        assert_eq!(month.wellness_streak, 0);
    }

    #[test]
    fn stats_skip_zero_minute_sessions() {
        let history = vec![entry(0, 5, 5)];
        let sessions = vec![session("a", 1, 30, 4.0), session("b", 1, 0, 2.0)];
        let week = dashboard_stats_in(&history, &sessions, None, TimeRange::Week, now(), &Utc);
        assert_eq!(week.total_sessions, 1);
        assert_eq!(week.avg_session_satisfaction, 4.0);
    }

    #[test]
    fn empty_stats_start_the_journey() {
        let stats = dashboard_stats_in(&[], &[], None, TimeRange::Recent, now(), &Utc);
        assert_eq!(stats.avg_mood_score, 0.0);
        let insights = wellness_insights(&stats);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Start Your Wellness Journey");
        assert_eq!(insights[0].kind, InsightKind::Attention);
    }

    #[test]
    fn insights_for_a_good_week() {
        let stats = DashboardStats {
            avg_mood_score: 7.8,
            total_mood_entries: 4,
            total_play_time_minutes: 120,
            total_sessions: 3,
            avg_session_satisfaction: 4.3,
            wellness_streak: 9,
        };
        let titles: Vec<String> = wellness_insights(&stats)
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Great Mood Trends!", "Wellness Streak!", "Balanced Gaming"]
        );
    }

    #[test]
    fn low_mood_asks_for_self_care() {
        let stats = DashboardStats {
            avg_mood_score: 4.2,
            total_mood_entries: 2,
            total_play_time_minutes: 0,
            total_sessions: 0,
            avg_session_satisfaction: 0.0,
            wellness_streak: 1,
        };
        let insights = wellness_insights(&stats);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Focus on Self-Care");
    }

    #[test]
    fn summary_combines_trend_and_metrics() {
        let history = vec![entry(0, 6, 4), entry(1, 6, 4), entry(40, 2, 9)];
        let summary = dashboard_summary_in(&history, &[], None, TimeRange::Recent, now(), &Utc);
        assert_eq!(summary.trend.len(), 2);
        assert_eq!(summary.stats.total_mood_entries, 2);
        // metrics use the whole history
        assert!(summary.metrics.mood_stability < 100);
    }

    #[test]
    fn sidebar_prefers_stored_profile_values() {
        let today = now().date_naive();
        let history = vec![entry(0, 5, 5), entry(1, 5, 5)];
        let sessions = vec![
            session("a", 0, 10, 4.0),
            session("a", 1, 10, 4.0),
            session("b", 1, 10, 4.0),
        ];

        let computed = sidebar_summary_in(&history, &sessions, None, today, &Utc);
        assert_eq!(computed.wellness_streak, 2);
        assert_eq!(computed.games_played, 2);
        assert_eq!(computed.mood_score, 5.0);
        assert_eq!(computed.total_points, 100.0);
        assert_eq!(computed.level, 1);

        let profile = UserProfile {
            wellness_streak: 12,
            total_wellness_score: 1600.0,
            ..Default::default()
        };
        let stored = sidebar_summary_in(&history, &sessions, Some(&profile), today, &Utc);
        assert_eq!(stored.wellness_streak, 12);
        assert_eq!(stored.level, 4);
    }

    #[test]
    fn user_level_thresholds() {
        assert_eq!(user_level(0.0), 1);
        assert_eq!(user_level(499.0), 1);
        assert_eq!(user_level(500.0), 2);
        assert_eq!(user_level(1000.0), 3);
        assert_eq!(user_level(1999.9), 4);
        assert_eq!(user_level(2500.0), 5);
    }
}
