//! Pet REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};

use super::dto::{CreatePetRequest, PetResponse, PetTypeResponse, UpdatePetRequest};
use crate::domain::{DomainError, Pet};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::AppState;

fn reject_future_birth_date(birth_date: Option<NaiveDate>) -> Result<(), ApiError> {
    match birth_date {
        Some(date) if date > Utc::now().date_naive() => Err(domain_error(DomainError::Validation(
            format!("birth date {} is in the future", date),
        ))),
        _ => Ok(()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/pets/{id}",
    tag = "Pets",
    params(("id" = i32, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet with visits", body = ApiResponse<PetResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PetResponse>>, ApiError> {
    match state.pets.find_pet(id).await.map_err(domain_error)? {
        Some(pet) => Ok(Json(ApiResponse::success(pet.into()))),
        None => Err(domain_error(DomainError::not_found("Pet", id))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-types",
    tag = "Pets",
    responses(
        (status = 200, description = "Known pet types", body = ApiResponse<Vec<PetTypeResponse>>)
    )
)]
pub async fn list_pet_types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PetTypeResponse>>>, ApiError> {
    let types = state.pets.pet_types().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        types.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/owners/{id}/pets",
    tag = "Pets",
    params(("id" = i32, Path, description = "Owner ID")),
    request_body = CreatePetRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<PetResponse>),
        (status = 400, description = "Unknown pet type or future birth date"),
        (status = 404, description = "Owner not found"),
        (status = 409, description = "Owner already has a pet with this name")
    )
)]
pub async fn add_pet(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<CreatePetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PetResponse>>), ApiError> {
    reject_future_birth_date(req.birth_date)?;

    let mut pet = Pet::new(req.name);
    pet.birth_date = req.birth_date;
    if let Some(type_name) = req.pet_type {
        pet.pet_type = Some(
            state
                .pets
                .resolve_pet_type(&type_name)
                .await
                .map_err(domain_error)?,
        );
    }

    let stored = state
        .pets
        .register_pet(owner_id, pet)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(stored.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/owners/{id}/pets/{pet_id}",
    tag = "Pets",
    params(
        ("id" = i32, Path, description = "Owner ID"),
        ("pet_id" = i32, Path, description = "Pet ID")
    ),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<PetResponse>),
        (status = 404, description = "Owner or pet not found"),
        (status = 409, description = "Name taken by another pet of the owner")
    )
)]
pub async fn update_pet(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    ValidatedJson(req): ValidatedJson<UpdatePetRequest>,
) -> Result<Json<ApiResponse<PetResponse>>, ApiError> {
    reject_future_birth_date(req.birth_date)?;

    let pet = state
        .pets
        .update_pet(owner_id, pet_id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(pet.into())))
}
