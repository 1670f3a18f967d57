//! Wellness metric aggregation over mood and session history.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{GameSession, MoodDimensions, MoodEntry, UserProfile};
use crate::observability;
use crate::utils::{mean, population_variance, round1};

/// Value every metric takes when there is no usable history.
pub const NEUTRAL_SCORE: u8 = 50;
/// `goals_progress` when the profile sets no goals.
pub const DEFAULT_GOALS_PROGRESS: f64 = 60.0;

/// Eight derived scores, each in `[0, 100]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct WellnessMetrics {
    pub overall_wellness: u8,
    pub mood_stability: u8,
    pub gaming_balance: u8,
    pub stress_management: u8,
    pub energy_consistency: u8,
    pub focus_improvement: u8,
    pub social_wellness: u8,
    pub goals_progress: u8,
}

impl WellnessMetrics {
    pub fn neutral() -> Self {
        Self {
            overall_wellness: NEUTRAL_SCORE,
            mood_stability: NEUTRAL_SCORE,
            gaming_balance: NEUTRAL_SCORE,
            stress_management: NEUTRAL_SCORE,
            energy_consistency: NEUTRAL_SCORE,
            focus_improvement: NEUTRAL_SCORE,
            social_wellness: NEUTRAL_SCORE,
            goals_progress: NEUTRAL_SCORE,
        }
    }
}

/// Display band for a metric value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum ScoreBand {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            80..=89 => ScoreBand::VeryGood,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::Fair,
            _ => ScoreBand::NeedsAttention,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::VeryGood => "Very Good",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsAttention => "Needs Attention",
        }
    }
}

/// Entries of `history` with their validated dimensions, logging and
/// counting the ones dropped.
pub(crate) fn usable_entries(history: &[MoodEntry]) -> Vec<(&MoodEntry, MoodDimensions)> {
    let mut skipped = 0usize;
    let usable: Vec<(&MoodEntry, MoodDimensions)> = history
        .iter()
        .filter_map(|entry| match entry.dimensions() {
            Ok(d) => Some((entry, d)),
            Err(e) => {
                skipped += 1;
                tracing::debug!(id = ?entry.id, error = %e, "skipping mood entry");
                None
            }
        })
        .collect();
    observability::record_invalid_entries("mood_entry", skipped);
    usable
}

pub(crate) fn usable_dimensions(history: &[MoodEntry]) -> Vec<MoodDimensions> {
    usable_entries(history).into_iter().map(|(_, d)| d).collect()
}

/// Mean composite mood score to one decimal place, `None` without usable
/// entries.
pub fn average_mood_score(history: &[MoodEntry]) -> Option<f64> {
    let dims = usable_dimensions(history);
    mean(dims.iter().map(MoodDimensions::mood_score)).map(round1)
}

/// Aggregate wellness metrics from a mood history, session history and an
/// optional profile.
pub fn aggregate(
    history: &[MoodEntry],
    sessions: &[GameSession],
    profile: Option<&UserProfile>,
) -> WellnessMetrics {
    observability::record_aggregation();
    let dims = usable_dimensions(history);
    if dims.is_empty() {
        return WellnessMetrics::neutral();
    }

    let mood_scores: Vec<f64> = dims.iter().map(MoodDimensions::mood_score).collect();
    let energy = axis(&dims, |d| d.energy_level);
    let stress = axis(&dims, |d| d.stress_level);
    let focus = axis(&dims, |d| d.focus_level);
    let social = axis(&dims, |d| d.social_desire);

    let mood_stability = (100.0 - var(&mood_scores) * 10.0).clamp(0.0, 100.0);
    let stress_management = ((10.0 - avg(&stress)) * 10.0).clamp(0.0, 100.0);
    let energy_consistency = (100.0 - var(&energy) * 8.0).clamp(0.0, 100.0);
    let focus_improvement = avg(&focus) / 10.0 * 100.0;
    let social_wellness = (avg(&social) / 10.0 * 100.0).min(100.0);
    let gaming_balance = gaming_balance(sessions);
    let goals_progress = goals_progress(avg(&mood_scores), profile);

    let overall = mood_stability * 0.20
        + stress_management * 0.20
        + energy_consistency * 0.15
        + focus_improvement * 0.15
        + social_wellness * 0.10
        + gaming_balance * 0.10
        + goals_progress * 0.10;

    let metrics = WellnessMetrics {
        overall_wellness: to_score(overall),
        mood_stability: to_score(mood_stability),
        gaming_balance: to_score(gaming_balance),
        stress_management: to_score(stress_management),
        energy_consistency: to_score(energy_consistency),
        focus_improvement: to_score(focus_improvement),
        social_wellness: to_score(social_wellness),
        goals_progress: to_score(goals_progress),
    };
    tracing::debug!(
        entries = dims.len(),
        sessions = sessions.len(),
        overall = metrics.overall_wellness,
        "aggregated wellness metrics"
    );
    metrics
}

fn axis(dims: &[MoodDimensions], f: impl Fn(&MoodDimensions) -> u8) -> Vec<f64> {
    dims.iter().map(|d| f64::from(f(d))).collect()
}

// Callers only pass non-empty series.
fn avg(v: &[f64]) -> f64 {
    mean(v.iter().copied()).unwrap_or_default()
}

fn var(v: &[f64]) -> f64 {
    population_variance(v).unwrap_or_default()
}

fn gaming_balance(sessions: &[GameSession]) -> f64 {
    let rated: Vec<&GameSession> = sessions.iter().filter(|s| s.is_valid()).collect();
    let skipped = sessions.len() - rated.len();
    if skipped > 0 {
        tracing::debug!(skipped, "skipping sessions without play time or a 1-5 rating");
    }
    observability::record_invalid_entries("game_session", skipped);
    let Some(satisfaction) = mean(rated.iter().map(|s| s.satisfaction_rating)) else {
        return f64::from(NEUTRAL_SCORE);
    };
    let distinct_durations: HashSet<u32> = rated.iter().map(|s| s.duration_minutes).collect();
    (satisfaction / 5.0 * 50.0 + distinct_durations.len() as f64 * 10.0).min(100.0)
}

fn goals_progress(avg_mood_score: f64, profile: Option<&UserProfile>) -> f64 {
    match profile {
        Some(p) if !p.wellness_goals.is_empty() => {
            (f64::from(p.wellness_streak) * 2.0).min(40.0) + (avg_mood_score * 4.0).min(40.0)
        }
        _ => DEFAULT_GOALS_PROGRESS,
    }
}

fn to_score(v: f64) -> u8 {
    v.clamp(0.0, 100.0).round() as u8
}
