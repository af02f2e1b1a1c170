mod config;
mod error;
mod models;
mod routes;
mod store;
mod workbook;

use crate::{config::Config, models::AppState};

use tower_http::trace::TraceLayer;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;
    let state = AppState::new(&cfg);

    let app = routes::router(state)
        .layer(routes::cors_layer())
        .layer(TraceLayer::new_for_http());

    tracing::info!(
        max_upload_bytes = cfg.max_upload_bytes,
        "Listening on http://{}",
        cfg.bind_addr
    );
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
