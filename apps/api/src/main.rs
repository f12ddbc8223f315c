mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::session::store::{spawn_sweeper, MemoryStore};
use crate::state::AppState;

const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cover Letter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let completion = OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    )?;
    info!("Completion client initialized (model: {})", completion.model());
    if config.openai_api_key.is_some() {
        info!("OpenAI API key: configured");
    } else {
        warn!("OpenAI API key: missing, generation requests will fail with 401");
    }

    info!("Serving client shell from {}", config.static_dir.display());

    let sessions = Arc::new(MemoryStore::with_limits(
        config.session_idle_ttl,
        config.max_sessions,
    ));
    spawn_sweeper(sessions.clone(), SESSION_SWEEP_PERIOD);
    info!(
        "Form sessions: idle TTL {}s, at most {}",
        config.session_idle_ttl.as_secs(),
        config.max_sessions
    );

    let state = AppState {
        completion: Arc::new(completion),
        sessions,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("Health check: http://localhost:{}/api/health", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
