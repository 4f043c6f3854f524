//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use domain_products::storage::LocalImageStorage;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState, storage: LocalImageStorage) -> Router {
    products::router(state, storage)
}
