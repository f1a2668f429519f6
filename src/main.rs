//! docsite server binary

use docsite::{config::SiteConfig, handlers, observability, state::SiteState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init()?;

    let config = SiteConfig::load()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = SiteState::from_config(config)?;
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
