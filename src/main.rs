//! A greeting web service with axum.

use axum_greet::{
    app,
    infra::{config, logging},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let config = config::load_config()?;
    let _guard = logging::init_logging(&config.log);
    tracing::debug!("Loaded configuration {:?}", config);

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    app::run_app(listener, config).await?;

    Ok(())
}
