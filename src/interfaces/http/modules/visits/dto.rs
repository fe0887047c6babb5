//! Visit DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Visit;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitResponse {
    pub id: Option<i32>,
    pub pet_id: Option<i32>,
    pub date: NaiveDate,
    pub description: String,
}

impl From<Visit> for VisitResponse {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            pet_id: v.pet_id,
            date: v.date,
            description: v.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVisitRequest {
    /// Defaults to today
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 255, message = "description is required"))]
    pub description: String,
}

/// Inclusive date range; open ends are unbounded
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VisitRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
