// File: services/bookify_backend/src/main.rs
use std::sync::Arc;

use bookify_backend::{app::build_app, service_factory::BookifyServiceFactory};
use bookify_config::load_config;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            bookify_common::init();
            error!("Failed to load config: {}", err);
            return Err(err.into());
        }
    };
    bookify_common::init();

    let factory = BookifyServiceFactory::new(config.clone()).await?;
    let app = build_app(&factory);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("Authorize the calendar at http://{}/authorize", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
