use std::sync::Arc;

use gamemood_core::MoodAnalyzer;
use gamemood_core::config::Config;
use gamemood_core::http_client::ReqwestMoodAnalyzer;
use gamemood_mcp::GameMoodMcpHandler;

/// Text analysis is optional; without credentials the other tools still work.
fn build_analyzer() -> Option<Arc<dyn MoodAnalyzer>> {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::info!("gamemood_mcp: mood text analysis disabled ({e})");
            return None;
        }
    };
    match ReqwestMoodAnalyzer::new(&config) {
        Ok(analyzer) => Some(Arc::new(analyzer)),
        Err(e) => {
            tracing::warn!("gamemood_mcp: could not build analysis client: {e}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `GAMEMOOD_LOG_LEVEL`, then `RUST_LOG`, then `info`.
    let log_env = std::env::var("GAMEMOOD_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let combined_filter = format!("{},rmcp=warn,serve_inner=warn", log_env);
    let env_filter = tracing_subscriber::EnvFilter::try_new(combined_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,rmcp=warn,serve_inner=warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("gamemood_mcp: log filter: {}", log_env);

    let handler = GameMoodMcpHandler::new(build_analyzer());
    tracing::info!(
        "gamemood_mcp: registered {} tools and {} prompts",
        handler.tool_count(),
        handler.prompt_count()
    );

    tracing::info!("gamemood_mcp: starting stdio MCP server...");
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let server = rmcp::serve_server(handler, transport).await?;
    server.waiting().await?;

    Ok(())
}
