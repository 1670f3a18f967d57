//! Operations shared by the MCP tools and the HTTP routes.

use std::sync::Arc;

use chrono::{Local, Utc};
use gamemood_core::scoring::{average_match_score, filter_recommendations, mood_summary};
use gamemood_core::utils::parse_day;
use gamemood_core::wellness::ScoreBand;
use gamemood_core::{
    GameRecord, MoodAnalyzer, MoodEntry, aggregate, average_mood_score, compute_streak,
    compute_trend, dashboard_summary, score_games, sentiment_label, session_context_for,
    sidebar_summary, validate_catalog,
};

use crate::error::{McpError, McpResult};
use crate::types::{
    AnalyzeMoodTextResult, CatalogIssue, DashboardParams, DashboardResult, HistoryParams,
    RecommendGamesParams, RecommendGamesResult, StreakParams, StreakResult, TrendParams,
    TrendResult, ValidateCatalogResult, WellnessMetricsResult,
};

#[derive(Clone, Default)]
pub struct WellnessService {
    analyzer: Option<Arc<dyn MoodAnalyzer>>,
}

impl WellnessService {
    pub fn new(analyzer: Option<Arc<dyn MoodAnalyzer>>) -> Self {
        Self { analyzer }
    }

    pub fn has_analyzer(&self) -> bool {
        self.analyzer.is_some()
    }

    pub fn recommend_games(&self, p: RecommendGamesParams) -> McpResult<RecommendGamesResult> {
        let dims = p.mood.dimensions()?;
        let mut games = score_games(&p.mood, &p.catalog)?;
        if let Some(filter) = &p.filter {
            games = filter_recommendations(&games, filter);
        }
        if let Some(limit) = p.limit {
            games.truncate(limit);
        }
        tracing::info!(
            catalog = p.catalog.len(),
            returned = games.len(),
            "recommendations scored"
        );
        Ok(RecommendGamesResult {
            average_match_score: average_match_score(&games),
            session_context: session_context_for(&dims),
            mood_summary: mood_summary(&dims),
            games,
        })
    }

    pub fn wellness_metrics(&self, p: HistoryParams) -> WellnessMetricsResult {
        let metrics = aggregate(&p.history, &p.sessions, p.profile.as_ref());
        WellnessMetricsResult {
            overall_band: ScoreBand::for_score(metrics.overall_wellness),
            average_mood_score: average_mood_score(&p.history),
            metrics,
        }
    }

    pub fn wellness_streak(&self, p: StreakParams) -> McpResult<StreakResult> {
        let today = match p.today.as_deref() {
            Some(raw) => parse_day(raw).ok_or_else(|| {
                McpError::Validation(format!("today must be YYYY-MM-DD, got {raw:?}"))
            })?,
            None => Local::now().date_naive(),
        };
        Ok(StreakResult {
            streak: compute_streak(&p.history, today),
            today,
        })
    }

    pub fn mood_trends(&self, p: TrendParams) -> TrendResult {
        TrendResult {
            points: compute_trend(&p.history, p.bucket.unwrap_or_default()),
        }
    }

    pub fn dashboard(&self, p: DashboardParams) -> DashboardResult {
        let now = p.now.unwrap_or_else(Utc::now);
        let range = p.range.unwrap_or_default();
        let data = p.data;
        let profile = data.profile.as_ref();
        DashboardResult {
            summary: dashboard_summary(&data.history, &data.sessions, profile, range, now),
            sidebar: sidebar_summary(
                &data.history,
                &data.sessions,
                profile,
                now.with_timezone(&Local).date_naive(),
            ),
        }
    }

    /// Check each raw record on its own so one bad entry does not hide the
    /// others. Records that parse go through the catalog range checks.
    pub fn validate_catalog(&self, catalog: Vec<serde_json::Value>) -> ValidateCatalogResult {
        let total = catalog.len();
        let mut issues = Vec::new();
        let mut parsed = Vec::new();
        let mut origin = Vec::new();
        for (index, raw) in catalog.into_iter().enumerate() {
            let title = raw
                .get("title")
                .and_then(|t| t.as_str())
                .map(str::to_string);
            match serde_json::from_value::<GameRecord>(raw) {
                Ok(game) => {
                    parsed.push(game);
                    origin.push((index, title));
                }
                Err(e) => issues.push(CatalogIssue {
                    index,
                    title,
                    message: e.to_string(),
                }),
            }
        }
        for (pos, err) in validate_catalog(&parsed) {
            let (index, title) = origin[pos].clone();
            issues.push(CatalogIssue {
                index,
                title,
                message: err.to_string(),
            });
        }
        issues.sort_by_key(|issue| issue.index);
        tracing::debug!(total, invalid = issues.len(), "catalog validated");
        ValidateCatalogResult {
            valid: total - issues.len(),
            invalid: issues.len(),
            issues,
        }
    }

    pub async fn analyze_mood_text(&self, text: &str) -> McpResult<AnalyzeMoodTextResult> {
        let analyzer = self.analyzer.as_ref().ok_or_else(|| {
            McpError::NotConfigured(
                "mood text analysis needs GAMEMOOD_LLM_API_KEY to be set".into(),
            )
        })?;
        let analysis = analyzer.analyze_mood_text(text).await?;
        let entry = MoodEntry::from_text_analysis(&analysis, Utc::now());
        Ok(AnalyzeMoodTextResult {
            sentiment_label: sentiment_label(analysis.sentiment_score).to_string(),
            analysis,
            entry,
        })
    }
}
