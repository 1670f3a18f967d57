//! Tool and endpoint parameter/result shapes.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use gamemood_core::{
    DashboardSummary, GameRecord, GameSession, MoodEntry, RankedGame, RecommendationFilter,
    ScoreBand, SessionContext, SidebarSummary, TextMoodAnalysis, TimeRange, TrendBucket,
    TrendPoint, UserProfile, WellnessMetrics,
};

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct RecommendGamesParams {
    /// Mood entry to score against; all five dimensions are required
    pub mood: MoodEntry,
    /// Game catalog
    pub catalog: Vec<GameRecord>,
    /// Optional category/platform/session-length filter applied after ranking
    #[serde(default)]
    pub filter: Option<RecommendationFilter>,
    /// Keep only the first N results
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct RecommendGamesResult {
    pub games: Vec<RankedGame>,
    pub average_match_score: Option<u8>,
    pub session_context: SessionContext,
    pub mood_summary: String,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct HistoryParams {
    /// Mood entries, any order
    #[serde(default)]
    pub history: Vec<MoodEntry>,
    /// Played game sessions
    #[serde(default)]
    pub sessions: Vec<GameSession>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct WellnessMetricsResult {
    pub metrics: WellnessMetrics,
    pub overall_band: ScoreBand,
    /// Mean mood score (one decimal), absent without usable entries
    pub average_mood_score: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct StreakParams {
    #[serde(default)]
    pub history: Vec<MoodEntry>,
    /// Day to count back from (YYYY-MM-DD); defaults to the server's local date
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct StreakResult {
    pub streak: u32,
    pub today: NaiveDate,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TrendParams {
    #[serde(default)]
    pub history: Vec<MoodEntry>,
    #[serde(default)]
    pub bucket: Option<TrendBucket>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TrendResult {
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct DashboardParams {
    #[serde(flatten)]
    pub data: HistoryParams,
    /// week (default), month or recent
    #[serde(default)]
    pub range: Option<TimeRange>,
    /// Reference instant; defaults to now
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct DashboardResult {
    pub summary: DashboardSummary,
    pub sidebar: SidebarSummary,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ValidateCatalogParams {
    /// Raw catalog records; each is checked independently
    pub catalog: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CatalogIssue {
    pub index: usize,
    pub title: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ValidateCatalogResult {
    pub valid: usize,
    pub invalid: usize,
    pub issues: Vec<CatalogIssue>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AnalyzeMoodTextParams {
    /// Free-text description of how the player feels
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AnalyzeMoodTextResult {
    pub analysis: TextMoodAnalysis,
    pub sentiment_label: String,
    /// Mood entry ready to store, built from the analysis
    pub entry: MoodEntry,
}

// === Prompt Parameters ===

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct MoodCheckInParams {
    /// How the player describes their current mood
    pub feeling: Option<String>,
    /// Minutes available to play
    pub minutes_available: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct WellnessReviewParams {
    /// week, month or recent
    pub range: Option<String>,
}
