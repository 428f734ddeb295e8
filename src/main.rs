use anyhow::Context;
use clap::Parser;
use node_controller::config::ControllerConfig;
use node_controller::controller::{ControllerService, router};
use node_controller::transport::{ChannelPublisher, Publisher};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ControllerConfig::parse();

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    // 1. Transport:
    let channel = Arc::new(ChannelPublisher::new());
    let mut outbound = channel.subscribe();
    tokio::spawn(async move {
        loop {
            match outbound.recv().await {
                Ok(published) => {
                    tracing::info!("[{}] {}", published.topic, published.msg);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Outbound log lagged, skipped {} message(s)", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
    let publisher: Arc<dyn Publisher> = channel;

    // 2. Controller core + reconcile loop:
    let service = ControllerService::new(&config, publisher)
        .context("failed to initialize controller state")?;
    service.clone().start();

    // 3. HTTP ingress:
    let app = router(service);

    tracing::info!(
        "Node controller {} listening on {}",
        env!("CARGO_PKG_VERSION"),
        config.bind
    );
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
