//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and for chat front ends that only speak HTTP. The workspace's main
//! `pulmo-run` binary runs both gRPC and REST concurrently.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use api_shared::{ApiConfig, ChatService, TranscriptStore};
use pulmo_core::AssistantService;

/// Main entry point for the REST API server
///
/// # Environment Variables
/// - `PULMO_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PULMO_MAX_TRANSCRIPT_TURNS`: Turns kept per session (default: 200)
/// - `PULMO_MAX_SESSIONS`: Sessions kept in memory (default: 1000)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the knowledge base fails to load,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env()?;
    let addr = cfg.rest_addr();

    tracing::info!("-- Starting Pulmo REST API on {}", addr);

    let chat = ChatService::new(
        AssistantService::new()?,
        TranscriptStore::new(cfg.max_transcript_turns(), cfg.max_sessions()),
    );
    let app = router(AppState::new(chat));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
