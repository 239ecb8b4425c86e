//! Standalone gRPC server binary.
//!
//! ## Purpose
//! Runs the gRPC server on its own.
//!
//! ## Intended use
//! Useful when only the gRPC interface is needed. The workspace's main `pulmo-run` binary runs
//! both gRPC and REST concurrently.

use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_grpc::{pb::assistant_server::AssistantServer, ApiKeyInterceptor, PulmoService};
use api_shared::{ApiConfig, FILE_DESCRIPTOR_SET};
use pulmo_core::AssistantService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_grpc=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env()?;
    let addr = cfg.grpc_addr();

    tracing::info!("-- Starting Pulmo gRPC on {}", addr);

    if cfg.api_key().is_none() {
        tracing::warn!("API_KEY is not set; every gRPC request will be rejected");
    }

    let svc = PulmoService::new(AssistantService::new()?);
    let mut server_builder = Server::builder().add_service(AssistantServer::with_interceptor(
        svc,
        ApiKeyInterceptor::new(cfg.api_key()),
    ));

    if cfg.enable_reflection() {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        server_builder = server_builder.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    } else {
        tracing::info!("gRPC server reflection disabled");
    }

    server_builder.serve(addr).await?;

    Ok(())
}
