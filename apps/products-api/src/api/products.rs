//! Products API routes

use axum::Router;
use domain_products::{LocalImageStorage, PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState, storage: LocalImageStorage) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository, storage);
    handlers::router(service, state.config.storage.body_limit)
}
