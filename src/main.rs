use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use merge_cascade::config::Config;
use merge_cascade::processor::LoggingProcessor;
use merge_cascade::server::{AppState, build_router, health_router};
use merge_cascade::worker::spawn_event_worker;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "merge_cascade=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let processor = Arc::new(LoggingProcessor);
    let (events_tx, _worker) = spawn_event_worker(Arc::clone(&processor));
    let state = AppState::new(config.webhook_secret.clone(), events_tx, processor);
    let app = build_router(state, health_router());

    tracing::info!("listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
