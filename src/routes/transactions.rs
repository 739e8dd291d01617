use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::transaction;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(transaction::get_transactions))
        .route("/transactions/checkout", post(transaction::checkout))
        .route("/transactions/{id}", get(transaction::get_transaction))
}
