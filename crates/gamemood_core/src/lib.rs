//! Mood-to-game recommendation scoring and wellness metric aggregation.
//!
//! The scoring and aggregation functions are pure: they take snapshots of
//! stored mood entries, game records and sessions and return new values.
//! Free-text mood analysis is an external capability reached through the
//! [`MoodAnalyzer`] trait.

use async_trait::async_trait;
use thiserror::Error;

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod http_client;
pub mod model;
pub mod observability;
pub mod retry;
pub mod scoring;
pub mod trends;
pub mod utils;
pub mod wellness;

pub use analysis::{TextMoodAnalysis, sentiment_label};
pub use dashboard::{
    DashboardStats, DashboardSummary, InsightKind, SidebarSummary, TimeRange, WellnessInsight,
    dashboard_summary, sidebar_summary, user_level, wellness_insights,
};
pub use model::{
    AccessibilityFeature, AccessibilityNeed, EnergyRange, GameRecord, GameSession, Genre,
    MoodAnalysis, MoodContext, MoodDimensions, MoodEntry, MoodTag, Platform, PriceRange,
    SessionContext, SessionLength, StressCompatibility, UserProfile, WeatherMoodFactor,
    WellnessActivity, WellnessGoal, validate_catalog,
};
pub use scoring::{
    CategoryFilter, RankedGame, RecommendationFilter, average_match_score, filter_recommendations,
    match_score, mood_summary, score_games, session_context_for,
};
pub use trends::{
    TrendBucket, TrendPoint, compute_streak, compute_streak_in, compute_trend, compute_trend_in,
};
pub use wellness::{ScoreBand, WellnessMetrics, aggregate, average_mood_score};

#[derive(Debug, Error)]
pub enum WellnessError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("analysis API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not decode analysis response: {0}")]
    Decode(String),
}

impl WellnessError {
    /// Whether a retry has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            WellnessError::Http(_) | WellnessError::RateLimited(_) => true,
            WellnessError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// External free-text mood analysis (an LLM-backed service in production).
#[async_trait]
pub trait MoodAnalyzer: Send + Sync + 'static {
    /// Analyze a free-text mood description into sentiment, keywords and
    /// estimated mood dimensions.
    async fn analyze_mood_text(&self, text: &str) -> Result<TextMoodAnalysis, WellnessError>;
}
