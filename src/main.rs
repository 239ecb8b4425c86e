use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_grpc::{ApiKeyInterceptor, PulmoService};
use api_rest::AppState;
use api_shared::pb::assistant_server::AssistantServer;
use api_shared::{ApiConfig, ChatService, TranscriptStore, FILE_DESCRIPTOR_SET};
use pulmo_core::AssistantService;

/// Main entry point for the Pulmo assistant
///
/// Starts both gRPC and REST servers concurrently:
/// - gRPC server on port 50051 (configurable via PULMO_ADDR)
/// - REST server on port 3000 (configurable via PULMO_REST_ADDR)
///
/// The gRPC server requires authentication via x-api-key header.
/// The REST server provides open access and keeps per-session chat transcripts in memory.
///
/// # Environment Variables
/// - `PULMO_ADDR`: gRPC server address (default: "0.0.0.0:50051")
/// - `PULMO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PULMO_ENABLE_REFLECTION`: Enable gRPC reflection (default: false)
/// - `PULMO_MAX_TRANSCRIPT_TURNS`: Turns kept per REST session (default: 200)
/// - `PULMO_MAX_SESSIONS`: REST sessions kept in memory (default: 1000)
/// - `API_KEY`: API key for gRPC authentication
///
/// # Returns
/// * `Ok(())` - If servers start and run successfully
/// * `Err(anyhow::Error)` - If configuration, startup or either server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("pulmo=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env()?;
    let grpc_addr = cfg.grpc_addr();
    let rest_addr = cfg.rest_addr();

    tracing::info!("++ Starting Pulmo gRPC on {}", grpc_addr);
    tracing::info!("++ Starting Pulmo REST on {}", rest_addr);

    let assistant = AssistantService::new()?;

    // Start REST server
    let chat = ChatService::new(
        assistant.clone(),
        TranscriptStore::new(cfg.max_transcript_turns(), cfg.max_sessions()),
    );
    let rest_app = api_rest::router(AppState::new(chat));
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    let rest_server = tokio::spawn(async move { axum::serve(listener, rest_app).await });

    // Start gRPC server
    let mut grpc_builder = Server::builder().add_service(AssistantServer::with_interceptor(
        PulmoService::new(assistant),
        ApiKeyInterceptor::new(cfg.api_key()),
    ));
    if cfg.enable_reflection() {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        grpc_builder = grpc_builder.add_service(reflection_service);
    }
    let grpc_server = grpc_builder.serve(grpc_addr);

    // Run both
    let (rest_result, grpc_result) = tokio::join!(rest_server, grpc_server);
    rest_result??;
    grpc_result?;

    Ok(())
}
