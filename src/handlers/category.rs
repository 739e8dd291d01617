// src/handlers/category.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::instrument;
use validator::Validate;

use crate::dtos::category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::dtos::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

// GET /categories - List all categories
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, AppError> {
    let categories = state.categories.get_all().await?;
    let response = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(ApiResponse::ok(response)))
}

// GET /categories/{id} - Get single category
#[instrument(skip(state, id))]
pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<CategoryResponse>>, AppError> {
    let Path(id) = id?;
    let category = state.categories.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(CategoryResponse::from(category))))
}

// POST /categories - Create new category
#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state.categories.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(CategoryResponse::from(category))
                .with_message("Category created successfully"),
        ),
    ))
}

// PUT /categories/{id} - Update category
#[instrument(skip(state, id, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CategoryResponse>>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state.categories.update(id, payload).await?;

    Ok(Json(
        ApiResponse::ok(CategoryResponse::from(category))
            .with_message("Category updated successfully"),
    ))
}

// DELETE /categories/{id} - Delete category
#[instrument(skip(state, id))]
pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Path(id) = id?;
    state.categories.delete(id).await?;
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}
