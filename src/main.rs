use cloud_facts::{
    api::build_router,
    aws::AwsCredentials,
    config::Config,
    facts::{DynamoFactStore, FactService, FactsState},
    generation::BedrockClient,
    logging::init_tracing,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_tracing(&config.logging);

    let region = config.aws.region.clone();
    let credentials = AwsCredentials::from_config(&config.aws)?;

    let store = DynamoFactStore::new(&config.store, &region, credentials.clone())?;
    info!(table = %config.store.table_name, region = %region, "Initialized fact store");

    let generation_region = config.generation.region_or(&region);
    let generator = BedrockClient::new(&config.generation, generation_region, credentials)?;
    info!(model = %generator.model_id(), region = %generation_region, "Initialized Bedrock client");

    let service = FactService::new(Arc::new(store), Arc::new(generator), config.generation.clone());
    let router = build_router(FactsState {
        service: Arc::new(service),
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
