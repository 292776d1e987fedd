use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use lexidraft::{FeatureDispatcher, LexidraftConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 7860;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match LexidraftConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        output_dir = %config.output_dir.display(),
        model = %config.model,
        strict_errors = config.strict_errors,
        "configuration loaded"
    );

    // The blocking HTTP client must be built off the async runtime.
    let built = tokio::task::spawn_blocking(move || FeatureDispatcher::from_config(&config)).await;
    let dispatcher = match built {
        Ok(Ok(dispatcher)) => Arc::new(dispatcher),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "failed to initialise dispatcher");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "dispatcher initialisation panicked");
            std::process::exit(1);
        }
    };

    let app = lexidraft_server::router(dispatcher);

    let host: std::net::IpAddr = env::var("HOST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| [0, 0, 0, 0].into());
    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(host, port);
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to bind on {addr}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
