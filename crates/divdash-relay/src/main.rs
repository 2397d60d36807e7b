use std::process::ExitCode;
use std::sync::Arc;

use divdash_core::ReqwestHttpClient;
use divdash_relay::{create_app, ProxyRelay, RelayConfig, ServeError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(RelayConfig::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "relay stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: RelayConfig) -> Result<(), ServeError> {
    let relay = ProxyRelay::new(Arc::new(ReqwestHttpClient::new()), config.upstream_base.clone())
        .with_timeout_ms(config.timeout_ms);
    let app = create_app(relay, &config.route_path);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(%addr, path = %config.route_path, upstream = %config.upstream_base, "relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}
