//! Products API - REST server for products and their images

use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_products::LocalImageStorage;
use migration::Migrator;
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = connect_from_config_with_retry(config.postgres.clone(), None).await?;
    run_migrations::<Migrator>(&db, config.app.name).await?;

    let storage = LocalImageStorage::new(config.storage.upload_dir.clone());
    storage.ensure_root().await?;
    info!(upload_dir = %config.storage.upload_dir.display(), "Image storage ready");

    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router
    let api_routes = api::routes(&state, storage);
    let root_routes = health_router(config.app)
        .merge(api::health::router(state.clone()))
        .nest_service("/upload", ServeDir::new(&config.storage.upload_dir));
    let app =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, root_routes, &config.cors)
            .await?;

    info!("Starting Products API on port {}", config.server.port);

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        close_postgres(state.db, "main").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
