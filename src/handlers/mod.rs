pub mod category;
pub mod product;
pub mod report;
pub mod transaction;

use axum::Json;

use crate::dtos::ApiResponse;

// GET /health - Liveness probe
pub async fn health_check() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("OK"))
}
