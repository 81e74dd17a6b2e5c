use anyhow::Context;

use tierpass_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tierpass_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let bind = config.bind;

    let services = tierpass_api::app::services::build_services(&config);
    let app = tierpass_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
