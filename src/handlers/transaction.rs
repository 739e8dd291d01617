// src/handlers/transaction.rs
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

use crate::dtos::transaction::{CheckoutRequest, TransactionResponse};
use crate::dtos::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

// POST /transactions/checkout - Turn a cart into a transaction
#[instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), AppError> {
    let Json(payload) = payload.map_err(|_| AppError::validation("Invalid request body"))?;
    payload.validate()?;

    let transaction = state.transactions.checkout(&payload.items).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(TransactionResponse::from(transaction))
                .with_message("Transaction created successfully"),
        ),
    ))
}

// GET /transactions - List all transactions with details
#[instrument(skip(state))]
pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, AppError> {
    let transactions = state.transactions.get_all().await?;
    let response = transactions.into_iter().map(TransactionResponse::from).collect();
    Ok(Json(ApiResponse::ok(response)))
}

// GET /transactions/{id} - Get single transaction with details
#[instrument(skip(state, id))]
pub async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<TransactionResponse>>, AppError> {
    let Path(id) = id.map_err(|_| AppError::validation("Invalid transaction ID"))?;
    let transaction = state.transactions.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(TransactionResponse::from(transaction))))
}
