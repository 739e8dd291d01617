// src/handlers/report.rs
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::NaiveDate;
use tracing::instrument;

use crate::dtos::report::{ReportRangeQuery, ReportResponse};
use crate::dtos::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

// GET /report/today - Revenue, count and best seller for today
#[instrument(skip(state))]
pub async fn get_today_report(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReportResponse>>, AppError> {
    let report = state.reports.today().await?;
    Ok(Json(ApiResponse::ok(ReportResponse::from(report))))
}

// GET /report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD - Report for an inclusive range
#[instrument(skip(state, params))]
pub async fn get_range_report(
    State(state): State<AppState>,
    params: Result<Query<ReportRangeQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ReportResponse>>, AppError> {
    let Query(params) = params?;
    let (Some(start), Some(end)) = (params.start_date.as_deref(), params.end_date.as_deref()) else {
        return Err(AppError::validation(
            "start_date and end_date query parameters are required",
        ));
    };

    let start = parse_date("start_date", start)?;
    let end = parse_date("end_date", end)?;

    let report = state.reports.for_range(start, end).await?;
    Ok(Json(ApiResponse::ok(ReportResponse::from(report))))
}

fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid {name} format, expected YYYY-MM-DD")))
}
