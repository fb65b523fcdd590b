use std::sync::Arc;

use anyhow::Context;

use stockdesk_api::app::{build_app_with, services::AppServices, sweeper::spawn_session_sweeper};
use stockdesk_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    stockdesk_observability::init_with(config.log_format);

    let services = Arc::new(AppServices::in_memory());
    let _sweeper = spawn_session_sweeper(services.sessions(), config.session_idle_timeout);
    let app = build_app_with(services, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
