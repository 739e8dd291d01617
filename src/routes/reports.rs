use axum::{routing::get, Router};

use crate::handlers::report;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report", get(report::get_range_report))
        .route("/report/today", get(report::get_today_report))
}
