//! Quote DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CustomerTier, PriceBreakdown};

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    /// `NEW`, `SILVER` or `GOLD`; required by the tier-aware calculators
    #[schema(value_type = Option<String>, example = "GOLD")]
    pub tier: Option<CustomerTier>,
    /// `simple`, `customer_dependent` or `visit_recency`; defaults to the configured one
    pub calculator: Option<String>,
    #[validate(range(min = 0.0, message = "base_charge must be non-negative"))]
    pub base_charge: Option<f64>,
    #[validate(range(min = 0.0, message = "price_per_pet must be non-negative"))]
    pub price_per_pet: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub owner_id: i32,
    pub calculator: String,
    #[schema(value_type = Option<String>, example = "GOLD")]
    pub tier: Option<CustomerTier>,
    pub pet_count: usize,
    pub volume_score: u32,
    pub subtotal: f64,
    pub total: f64,
}

impl QuoteResponse {
    pub fn new(owner_id: i32, tier: Option<CustomerTier>, b: PriceBreakdown) -> Self {
        Self {
            owner_id,
            calculator: b.calculator.to_string(),
            tier,
            pet_count: b.pet_count,
            volume_score: b.volume_score,
            subtotal: b.subtotal,
            total: b.total,
        }
    }
}
