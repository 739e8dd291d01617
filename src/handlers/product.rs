// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::instrument;
use validator::Validate;

use crate::dtos::product::{
    CreateProductRequest, ProductListQuery, ProductResponse, UpdateProductRequest,
};
use crate::dtos::ApiResponse;
use crate::error::AppError;
use crate::models::product::ProductFilter;
use crate::state::AppState;

// GET /products - List products, optionally by category_id or name/active filters
#[instrument(skip(state, params))]
pub async fn get_products(
    State(state): State<AppState>,
    params: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, AppError> {
    let Query(params) = params?;
    let products = match params.category_id.as_deref() {
        Some(raw) => {
            let category_id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| AppError::validation("Invalid category ID"))?;
            state.products.get_by_category_id(category_id).await?
        }
        None => {
            let active = params
                .active
                .as_deref()
                .map(|raw| {
                    raw.trim().parse::<bool>().map_err(|_| {
                        AppError::validation("Invalid active flag, expected true or false")
                    })
                })
                .transpose()?;
            let filter = ProductFilter {
                name: params.name.filter(|n| !n.trim().is_empty()),
                active,
            };
            state.products.get_all(&filter).await?
        }
    };

    let response = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(ApiResponse::ok(response)))
}

// GET /products/{id} - Get single product
#[instrument(skip(state, id))]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<ProductResponse>>, AppError> {
    let Path(id) = id?;
    let product = state.products.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(ProductResponse::from(product))))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let product = state.products.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(ProductResponse::from(product))
                .with_message("Product created successfully"),
        ),
    ))
}

// PUT /products/{id} - Update product
#[instrument(skip(state, id, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProductResponse>>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let product = state.products.update(id, payload).await?;

    Ok(Json(
        ApiResponse::ok(ProductResponse::from(product))
            .with_message("Product updated successfully"),
    ))
}

// DELETE /products/{id} - Delete product
#[instrument(skip(state, id))]
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Path(id) = id?;
    state.products.delete(id).await?;
    Ok(Json(ApiResponse::message("Product deleted successfully")))
}
