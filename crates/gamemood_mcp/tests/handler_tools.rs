use std::sync::Arc;

use async_trait::async_trait;
use gamemood_core::{
    MoodAnalyzer, MoodDimensions, SessionContext, TextMoodAnalysis, TimeRange, WellnessError,
};
use gamemood_mcp::GameMoodMcpHandler;
use gamemood_mcp::types::{
    AnalyzeMoodTextParams, DashboardParams, HistoryParams, RecommendGamesParams, StreakParams,
    TrendParams, ValidateCatalogParams,
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

struct StubAnalyzer {
    fail: bool,
}

#[async_trait]
impl MoodAnalyzer for StubAnalyzer {
    async fn analyze_mood_text(&self, _text: &str) -> Result<TextMoodAnalysis, WellnessError> {
        if self.fail {
            return Err(WellnessError::RateLimited("try again in 20s".into()));
        }
        Ok(TextMoodAnalysis {
            sentiment_score: 2.0,
            emotional_keywords: vec!["hopeful".into()],
            mood_dimensions: MoodDimensions {
                energy_level: 6,
                stress_level: 4,
                focus_level: 7,
                social_desire: 5,
                challenge_seeking: 6,
            },
            recommended_activities: vec!["puzzle game".into()],
            supportive_message: "Sounds like a good day to try something new.".into(),
            wellness_insights: None,
        })
    }
}

fn catalog() -> serde_json::Value {
    json!([
        {
            "title": "Stardew Valley",
            "genres": ["Simulation", "RPG"],
            "platforms": ["PC", "Nintendo Switch"],
            "mood_tags": ["calming", "relaxing", "solo"],
            "ideal_energy_range": {"min": 1, "max": 5},
            "stress_compatibility": "any_stress",
            "session_length": "medium_30min",
            "wellness_rating": 4.8
        },
        {
            "title": "Rocket League",
            "genres": ["Sports", "Racing"],
            "platforms": ["PC", "PlayStation", "Xbox"],
            "mood_tags": ["energizing", "competitive", "social"],
            "ideal_energy_range": {"min": 6, "max": 10},
            "stress_compatibility": "medium_stress_ok",
            "session_length": "short_15min",
            "wellness_rating": 3.5
        },
        {
            "title": "Tetris Effect",
            "genres": ["Puzzle"],
            "platforms": ["PC"],
            "mood_tags": ["focus-building", "meditative", "stress-relief"],
            "ideal_energy_range": {"min": 3, "max": 8},
            "stress_compatibility": "high_stress_friendly",
            "session_length": "quick_5min",
            "wellness_rating": 4.5
        }
    ])
}

fn stressed_mood() -> serde_json::Value {
    json!({
        "energy_level": 3, "stress_level": 8, "focus_level": 4, "social_desire": 2,
        "challenge_seeking": 3, "created_at": "2026-02-10T20:00:00Z"
    })
}

// Noon UTC keeps each entry on the same calendar day for most local offsets.
fn noon_history() -> serde_json::Value {
    json!([
        {"energy_level": 6, "stress_level": 3, "focus_level": 6, "social_desire": 5,
         "challenge_seeking": 5, "created_at": "2026-02-11T12:00:00Z"},
        {"energy_level": 5, "stress_level": 5, "focus_level": 5, "social_desire": 5,
         "challenge_seeking": 5, "created_at": "2026-02-10T12:00:00Z"},
        {"energy_level": 4, "stress_level": 7, "focus_level": 4, "social_desire": 3,
         "challenge_seeking": 4, "created_at": "2026-02-09T12:00:00Z"}
    ])
}

fn handler() -> GameMoodMcpHandler {
    GameMoodMcpHandler::new(None)
}

#[tokio::test]
async fn recommend_games_ranks_and_summarizes() {
    let params: RecommendGamesParams = serde_json::from_value(json!({
        "mood": stressed_mood(),
        "catalog": catalog(),
    }))
    .expect("params");

    let res = handler().recommend_games(Parameters(params)).await.expect("ok").0;
    let titles: Vec<&str> = res.games.iter().map(|g| g.game.title.as_str()).collect();
    assert_eq!(titles, vec!["Stardew Valley", "Tetris Effect", "Rocket League"]);
    assert_eq!(res.average_match_score, Some(81));
    assert_eq!(res.session_context, SessionContext::StressRelief);
    assert!(res.mood_summary.contains("low-energy and stressed"));
}

#[tokio::test]
async fn recommend_games_applies_filter_then_limit() {
    let params: RecommendGamesParams = serde_json::from_value(json!({
        "mood": stressed_mood(),
        "catalog": catalog(),
        "filter": {"category": "stress_relief"},
        "limit": 1
    }))
    .expect("params");

    let res = handler().recommend_games(Parameters(params)).await.expect("ok").0;
    assert_eq!(res.games.len(), 1);
    assert_eq!(res.games[0].game.title, "Stardew Valley");
}

#[tokio::test]
async fn recommend_games_rejects_incomplete_mood() {
    let params: RecommendGamesParams = serde_json::from_value(json!({
        "mood": {"energy_level": 5, "stress_level": null, "focus_level": 5,
                 "social_desire": 5, "challenge_seeking": 5,
                 "created_at": "2026-02-10T20:00:00Z"},
        "catalog": catalog(),
    }))
    .expect("params");

    let err = handler()
        .recommend_games(Parameters(params))
        .await
        .err()
        .expect("should fail");
    assert!(err.contains("stress_level"), "unexpected error: {err}");
}

#[tokio::test]
async fn wellness_metrics_defaults_to_neutral() {
    let res = handler()
        .wellness_metrics(Parameters(HistoryParams::default()))
        .await
        .expect("ok")
        .0;
    assert_eq!(res.metrics.overall_wellness, 50);
    assert_eq!(res.metrics.mood_stability, 50);
    assert_eq!(res.metrics.goals_progress, 50);
    assert_eq!(res.average_mood_score, None);
}

#[tokio::test]
async fn streak_counts_back_from_given_day() {
    let params: StreakParams = serde_json::from_value(json!({
        "history": noon_history(),
        "today": "2026-02-11"
    }))
    .expect("params");
    let res = handler().wellness_streak(Parameters(params)).await.expect("ok").0;
    assert_eq!(res.streak, 3);
    assert_eq!(res.today.to_string(), "2026-02-11");
}

#[tokio::test]
async fn streak_rejects_malformed_day() {
    let params: StreakParams = serde_json::from_value(json!({
        "history": [],
        "today": "11/02/2026"
    }))
    .expect("params");
    let err = handler()
        .wellness_streak(Parameters(params))
        .await
        .err()
        .expect("should fail");
    assert!(err.contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn mood_trends_returns_one_point_per_day() {
    let params: TrendParams =
        serde_json::from_value(json!({ "history": noon_history() })).expect("params");
    let res = handler().mood_trends(Parameters(params)).await.expect("ok").0;
    assert_eq!(res.points.len(), 3);
    assert!(res.points[0].date < res.points[2].date);
}

#[tokio::test]
async fn dashboard_summary_counts_month_window() {
    let params: DashboardParams = serde_json::from_value(json!({
        "history": noon_history(),
        "sessions": [
            {"game_id": "stardew", "pre_mood_entry_id": "m1", "duration_minutes": 30, "satisfaction_rating": 5,
             "created_at": "2026-02-11T13:00:00Z"},
            {"game_id": "tetris", "pre_mood_entry_id": "m0", "duration_minutes": 45, "satisfaction_rating": 3,
             "created_at": "2026-01-01T13:00:00Z"}
        ],
        "range": "month",
        "now": "2026-02-12T12:00:00Z"
    }))
    .expect("params");

    let res = handler().dashboard_summary(Parameters(params)).await.expect("ok").0;
    assert_eq!(res.summary.range, TimeRange::Month);
    assert_eq!(res.summary.stats.total_mood_entries, 3);
    assert_eq!(res.summary.stats.total_sessions, 1);
    assert_eq!(res.summary.stats.total_play_time_minutes, 30);
    assert_eq!(res.summary.trend.len(), 3);
}

#[tokio::test]
async fn validate_catalog_reports_each_bad_record() {
    let params = ValidateCatalogParams {
        catalog: vec![
            json!({"title": "Celeste", "mood_tags": ["challenging"], "wellness_rating": 4.2}),
            json!({"title": "Mystery", "mood_tags": ["sleepy"]}),
            json!({"title": "Overrated", "wellness_rating": 7.5}),
        ],
    };
    let res = handler().validate_catalog(Parameters(params)).await.expect("ok").0;
    assert_eq!(res.valid, 1);
    assert_eq!(res.invalid, 2);
    let indices: Vec<usize> = res.issues.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![1, 2]);
    assert_eq!(res.issues[0].title.as_deref(), Some("Mystery"));
    assert!(res.issues[1].message.contains("wellness_rating"));
}

#[tokio::test]
async fn validate_catalog_orders_range_and_parse_issues_by_index() {
    let params = ValidateCatalogParams {
        catalog: vec![
            json!({"title": "Backwards", "ideal_energy_range": {"min": 9, "max": 2}}),
            json!({"title": "Unknown Genre", "genres": ["Rhythm"]}),
            json!({"title": "Journey", "mood_tags": ["meditative"]}),
            json!({"title": "  "}),
        ],
    };
    let res = handler().validate_catalog(Parameters(params)).await.expect("ok").0;
    assert_eq!(res.valid, 1);
    let indices: Vec<usize> = res.issues.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![0, 1, 3]);
    assert!(res.issues[0].message.contains("exceeds max"));
    assert_eq!(res.issues[1].title.as_deref(), Some("Unknown Genre"));
    assert!(res.issues[2].message.contains("title is empty"));
}

#[tokio::test]
async fn analyze_mood_text_builds_entry() {
    let analyzer: Arc<dyn MoodAnalyzer> = Arc::new(StubAnalyzer { fail: false });
    let handler = GameMoodMcpHandler::new(Some(analyzer));
    let res = handler
        .analyze_mood_text(Parameters(AnalyzeMoodTextParams {
            text: "Finally finished my exams, feeling hopeful".into(),
        }))
        .await
        .expect("ok")
        .0;
    assert_eq!(res.sentiment_label, "Positive");
    assert_eq!(res.entry.energy_level, Some(6));
    assert_eq!(res.entry.focus_level, Some(7));
    assert_eq!(
        res.entry.mood_text.as_deref(),
        Some("Sounds like a good day to try something new.")
    );
}

#[tokio::test]
async fn analyze_mood_text_surfaces_upstream_errors() {
    let analyzer: Arc<dyn MoodAnalyzer> = Arc::new(StubAnalyzer { fail: true });
    let handler = GameMoodMcpHandler::new(Some(analyzer));
    let err = handler
        .analyze_mood_text(Parameters(AnalyzeMoodTextParams {
            text: "tired".into(),
        }))
        .await
        .err()
        .expect("should fail");
    assert!(err.contains("rate limited"));
}
