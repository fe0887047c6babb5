//! Owner DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::Owner;
use crate::interfaces::http::modules::pets::PetResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerResponse {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    /// Sorted by name
    pub pets: Vec<PetResponse>,
}

impl From<Owner> for OwnerResponse {
    fn from(o: Owner) -> Self {
        let pets = o.pets().into_iter().map(Into::into).collect();
        Self {
            id: o.id,
            first_name: o.first_name,
            last_name: o.last_name,
            address: o.address,
            city: o.city,
            telephone: o.telephone,
            pets,
        }
    }
}

fn validate_telephone(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.len() <= 10 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("telephone");
        err.message = Some("must be 1 to 10 digits".into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OwnerRequest {
    #[validate(length(min = 1, max = 30, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 255, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 80, message = "city is required"))]
    pub city: String,
    #[validate(custom(function = "validate_telephone"))]
    pub telephone: String,
}

impl From<OwnerRequest> for Owner {
    fn from(req: OwnerRequest) -> Self {
        let mut owner = Owner::new(req.first_name, req.last_name);
        owner.address = req.address;
        owner.city = req.city;
        owner.telephone = req.telephone;
        owner
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    /// Last name prefix, case-insensitive
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telephone_must_be_short_digit_string() {
        assert!(validate_telephone("6085551023").is_ok());
        assert!(validate_telephone("").is_err());
        assert!(validate_telephone("60855510231").is_err());
        assert!(validate_telephone("608-555").is_err());
    }
}
