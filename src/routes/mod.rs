pub mod categories;
pub mod products;
pub mod reports;
pub mod transactions;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::health_check;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(categories::routes())
        .merge(products::routes())
        .merge(transactions::routes())
        .merge(reports::routes())
}

/// Full application: API routes, health probe, middleware and state.
pub fn app(state: AppState) -> Router {
    create_router()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
