//! Visit REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};

use super::dto::{CreateVisitRequest, VisitRangeQuery, VisitResponse};
use crate::domain::Visit;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/pets/{id}/visits",
    tag = "Visits",
    params(("id" = i32, Path, description = "Pet ID"), VisitRangeQuery),
    responses(
        (status = 200, description = "Visits in range, most recent first", body = ApiResponse<Vec<VisitResponse>>),
        (status = 400, description = "Range start after end"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn list_visits(
    State(state): State<AppState>,
    Path(pet_id): Path<i32>,
    Query(range): Query<VisitRangeQuery>,
) -> Result<Json<ApiResponse<Vec<VisitResponse>>>, ApiError> {
    let from = range.from.unwrap_or(NaiveDate::MIN);
    let to = range.to.unwrap_or(NaiveDate::MAX);
    let visits = state
        .pets
        .visits_between(pet_id, from, to)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        visits.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/pets/{id}/visits",
    tag = "Visits",
    params(("id" = i32, Path, description = "Pet ID")),
    request_body = CreateVisitRequest,
    responses(
        (status = 201, description = "Recorded", body = ApiResponse<VisitResponse>),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn add_visit(
    State(state): State<AppState>,
    Path(pet_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<CreateVisitRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VisitResponse>>), ApiError> {
    let date = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let visit = state
        .pets
        .add_visit(pet_id, Visit::new(date, req.description))
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(visit.into()))))
}
