//! MCP server exposing the GameMood wellness engine.

use std::sync::Arc;

use rmcp::Json;
use rmcp::RoleServer;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    GetPromptRequestParams, GetPromptResult, ListPromptsResult, PaginatedRequestParams,
};
use rmcp::service::RequestContext;
use rmcp::{prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router};

use gamemood_core::MoodAnalyzer;

pub mod error;
pub mod http;
mod prompts;
pub mod services;
pub mod types;

pub use services::WellnessService;
use types::{
    AnalyzeMoodTextParams, AnalyzeMoodTextResult, DashboardParams, DashboardResult, HistoryParams,
    MoodCheckInParams, RecommendGamesParams, RecommendGamesResult, StreakParams, StreakResult,
    TrendParams, TrendResult, ValidateCatalogParams, ValidateCatalogResult, WellnessMetricsResult,
    WellnessReviewParams,
};

#[derive(Clone)]
pub struct GameMoodMcpHandler {
    service: WellnessService,
    tool_router: rmcp::handler::server::tool::ToolRouter<GameMoodMcpHandler>,
    prompt_router: rmcp::handler::server::router::prompt::PromptRouter<GameMoodMcpHandler>,
}

#[tool_router]
#[prompt_router]
impl GameMoodMcpHandler {
    /// `analyzer` is optional; without it `analyze_mood_text` reports that
    /// the feature is not configured and every other tool works.
    pub fn new(analyzer: Option<Arc<dyn MoodAnalyzer>>) -> Self {
        Self {
            service: WellnessService::new(analyzer),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    pub fn service(&self) -> &WellnessService {
        &self.service
    }

    pub fn tool_count(&self) -> usize {
        self.tool_router.list_all().len()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompt_router.list_all().len()
    }

    #[tool(
        name = "recommend_games",
        description = "Score a game catalog against a mood entry and return the games ranked best first (match scores 10-98)"
    )]
    pub async fn recommend_games(
        &self,
        params: Parameters<RecommendGamesParams>,
    ) -> Result<Json<RecommendGamesResult>, String> {
        self.service
            .recommend_games(params.0)
            .map(Json)
            .map_err(String::from)
    }

    #[tool(
        name = "wellness_metrics",
        description = "Aggregate mood and session history into eight 0-100 wellness scores"
    )]
    pub async fn wellness_metrics(
        &self,
        params: Parameters<HistoryParams>,
    ) -> Result<Json<WellnessMetricsResult>, String> {
        Ok(Json(self.service.wellness_metrics(params.0)))
    }

    #[tool(
        name = "wellness_streak",
        description = "Count consecutive days with at least one mood check-in, looking back up to 30 days"
    )]
    pub async fn wellness_streak(
        &self,
        params: Parameters<StreakParams>,
    ) -> Result<Json<StreakResult>, String> {
        self.service
            .wellness_streak(params.0)
            .map(Json)
            .map_err(String::from)
    }

    #[tool(
        name = "mood_trends",
        description = "Daily averages of mood score, energy, stress and focus, oldest first"
    )]
    pub async fn mood_trends(
        &self,
        params: Parameters<TrendParams>,
    ) -> Result<Json<TrendResult>, String> {
        Ok(Json(self.service.mood_trends(params.0)))
    }

    #[tool(
        name = "dashboard_summary",
        description = "Dashboard stats, insights, trend and sidebar figures for a week, month or recent range"
    )]
    pub async fn dashboard_summary(
        &self,
        params: Parameters<DashboardParams>,
    ) -> Result<Json<DashboardResult>, String> {
        Ok(Json(self.service.dashboard(params.0)))
    }

    #[tool(
        name = "validate_catalog",
        description = "Check game catalog records for unknown tags and out-of-range values"
    )]
    pub async fn validate_catalog(
        &self,
        params: Parameters<ValidateCatalogParams>,
    ) -> Result<Json<ValidateCatalogResult>, String> {
        Ok(Json(self.service.validate_catalog(params.0.catalog)))
    }

    #[tool(
        name = "analyze_mood_text",
        description = "Turn a free-text mood description into sentiment, keywords and mood dimensions"
    )]
    pub async fn analyze_mood_text(
        &self,
        params: Parameters<AnalyzeMoodTextParams>,
    ) -> Result<Json<AnalyzeMoodTextResult>, String> {
        self.service
            .analyze_mood_text(&params.0.text)
            .await
            .map(Json)
            .map_err(String::from)
    }

    // === MCP Prompts ===

    /// Check in on the current mood and pick something to play
    #[prompt(
        name = "mood-check-in",
        description = "Record how you feel and get matched games for it"
    )]
    async fn mood_check_in(&self, params: Parameters<MoodCheckInParams>) -> GetPromptResult {
        prompts::mood_check_in_prompt(params.0.feeling.as_deref(), params.0.minutes_available)
    }

    #[prompt(
        name = "wellness-review",
        description = "Review gaming wellness metrics, streak and mood trends"
    )]
    async fn wellness_review(&self, params: Parameters<WellnessReviewParams>) -> GetPromptResult {
        let range = params.0.range.unwrap_or_else(|| "week".to_string());
        prompts::wellness_review_prompt(&range)
    }
}

#[tool_handler]
#[prompt_handler(router = self.prompt_router)]
impl rmcp::ServerHandler for GameMoodMcpHandler {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo::new(
            rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
        )
        .with_instructions(
            "GameMood wellness server - scores games against the player's mood, \
             aggregates wellness metrics and tracks check-in streaks and mood trends.",
        )
    }
}
