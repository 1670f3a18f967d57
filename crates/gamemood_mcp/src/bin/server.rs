use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::info;

use gamemood_core::MoodAnalyzer;
use gamemood_core::config::Config;
use gamemood_core::http_client::ReqwestMoodAnalyzer;
use gamemood_mcp::GameMoodMcpHandler;
use gamemood_mcp::http::{AppState, DEFAULT_MAX_BODY_BYTES, router};

fn body_limit_from(raw: Option<String>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_BODY_BYTES)
}

fn address_from(raw: Option<String>) -> SocketAddr {
    raw.and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)))
}


#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let log_env = std::env::var("GAMEMOOD_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(format!("{log_env},rmcp=warn"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,rmcp=warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!(%log_env, "gamemood_mcp:http: log filter");

    let handle = PrometheusBuilder::new().install_recorder()?;

    let analyzer: Option<Arc<dyn MoodAnalyzer>> = match Config::from_env() {
        Ok(config) => Some(Arc::new(ReqwestMoodAnalyzer::new(&config)?)),
        Err(e) => {
            info!(%e, "mood text analysis disabled");
            None
        }
    };

    let handler = GameMoodMcpHandler::new(analyzer);
    let state = Arc::new(AppState {
        service: handler.service().clone(),
        metrics: handle,
    });

    let max_body_size = body_limit_from(std::env::var("MAX_HTTP_BODY_SIZE").ok());
    let app = router(state, handler, max_body_size);

    let addr = address_from(std::env::var("ADDRESS").ok());
    info!(%addr, max_body_bytes = max_body_size, "starting HTTP server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    let server = axum::serve(listener, app.into_make_service());
    if let Err(e) = server
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
        })
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
