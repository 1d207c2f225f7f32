use std::path::Path;
use std::sync::Arc;

use event_recurrence::config::{Config, DEFAULT_CONFIG_PATH};
use event_recurrence::models::AppState;
use event_recurrence::{http, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let from_file = Path::new(&config_path).exists();
    let cfg = if from_file {
        Config::load(&config_path)?
    } else {
        Config::default()
    };

    logging::init(cfg.log_level.as_deref());
    if from_file {
        tracing::info!("Loaded configuration from {}", config_path);
    } else {
        tracing::info!("No configuration at {}, using defaults", config_path);
    }

    let app = http::router(Arc::new(AppState::new(cfg.clone())));

    let listener = tokio::net::TcpListener::bind(&cfg.bind).await?;
    tracing::info!("Starting HTTP server on {}", cfg.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
