//! Owner REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{OwnerQuery, OwnerRequest, OwnerResponse};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/owners",
    tag = "Owners",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Matching owners", body = ApiResponse<Vec<OwnerResponse>>)
    )
)]
pub async fn list_owners(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<ApiResponse<Vec<OwnerResponse>>>, ApiError> {
    let owners = state
        .owners
        .find_owners(query.last_name.as_deref())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        owners.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/owners",
    tag = "Owners",
    request_body = OwnerRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<OwnerResponse>),
        (status = 422, description = "Invalid owner data")
    )
)]
pub async fn create_owner(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<OwnerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OwnerResponse>>), ApiError> {
    let owner = state.owners.create_owner(req.into()).await.map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(owner.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/owners/{id}",
    tag = "Owners",
    params(("id" = i32, Path, description = "Owner ID")),
    responses(
        (status = 200, description = "Owner with pets", body = ApiResponse<OwnerResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<OwnerResponse>>, ApiError> {
    let owner = state.owners.get_owner(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(owner.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/owners/{id}",
    tag = "Owners",
    params(("id" = i32, Path, description = "Owner ID")),
    request_body = OwnerRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<OwnerResponse>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Invalid owner data")
    )
)]
pub async fn update_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<OwnerRequest>,
) -> Result<Json<ApiResponse<OwnerResponse>>, ApiError> {
    let owner = state
        .owners
        .update_owner(id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(owner.into())))
}
