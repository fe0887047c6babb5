//! Pet DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::PetChanges;
use crate::domain::{Pet, PetType};
use crate::interfaces::http::modules::visits::VisitResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetTypeResponse {
    pub id: Option<i32>,
    pub name: String,
    pub rare: bool,
}

impl From<PetType> for PetTypeResponse {
    fn from(t: PetType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            rare: t.rare,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetResponse {
    pub id: Option<i32>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<PetTypeResponse>,
    pub owner_id: Option<i32>,
    /// Most recent first
    pub visits: Vec<VisitResponse>,
}

impl From<Pet> for PetResponse {
    fn from(p: Pet) -> Self {
        let visits = p.visits().into_iter().map(Into::into).collect();
        Self {
            id: p.id,
            name: p.name,
            birth_date: p.birth_date,
            pet_type: p.pet_type.map(Into::into),
            owner_id: p.owner_id,
            visits,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePetRequest {
    #[validate(length(min = 1, max = 30, message = "name is required"))]
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    /// Pet type name, e.g. `cat` or `snake`
    pub pet_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePetRequest {
    #[validate(length(min = 1, max = 30, message = "name must not be empty"))]
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<String>,
}

impl From<UpdatePetRequest> for PetChanges {
    fn from(req: UpdatePetRequest) -> Self {
        Self {
            name: req.name,
            birth_date: req.birth_date,
            pet_type: req.pet_type,
        }
    }
}
