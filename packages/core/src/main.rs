use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;

use energy_mix_service::api::{create_router, AppState};
use energy_mix_service::cli::Cli;
use energy_mix_service::config::Config;
use energy_mix_service::energy::EnergyService;
use energy_mix_service::error::AppError;
use energy_mix_service::logging::init_logging;
use energy_mix_service::metrics::AppMetrics;
use energy_mix_service::services::carbon_intensity::CarbonIntensityClient;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env().and_then(|config| config.with_cli(&cli));
    let log_level = config
        .as_ref()
        .map(|config| config.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(&log_level);

    let config = config.map_err(AppError::Config).unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });

    if let Err(err) = run(config).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    tracing::info!("Service starting with config: {:?}", config);

    let client = CarbonIntensityClient::new(config.api_base_url.clone());
    let state = AppState {
        service: EnergyService::new(Arc::new(client)),
        metrics: Arc::new(AppMetrics::new()?),
    };
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received. Stopping server.");
}
