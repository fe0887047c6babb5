//! Quote REST API handler

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{QuoteRequest, QuoteResponse};
use crate::application::QuoteOverrides;
use crate::domain::{CalculatorKind, RateParameters};
use crate::interfaces::http::common::{bad_request, domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::AppState;

fn overrides_from(req: &QuoteRequest, defaults: RateParameters) -> Result<QuoteOverrides, ApiError> {
    let calculator = req
        .calculator
        .as_deref()
        .map(str::parse::<CalculatorKind>)
        .transpose()
        .map_err(|e| bad_request(e.to_string()))?;

    let rates = match (req.base_charge, req.price_per_pet) {
        (None, None) => None,
        (base, per_pet) => Some(RateParameters::new(
            base.unwrap_or(defaults.base_charge),
            per_pet.unwrap_or(defaults.price_per_pet),
        )),
    };

    Ok(QuoteOverrides { calculator, rates })
}

#[utoipa::path(
    post,
    path = "/api/v1/owners/{id}/quote",
    tag = "Pricing",
    params(("id" = i32, Path, description = "Owner ID")),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Price quote", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Missing tier, unknown calculator or owner without pets"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn quote_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, ApiError> {
    let overrides = overrides_from(&req, state.pricing.default_rates())?;

    let breakdown = state
        .pricing
        .quote_for_owner(owner_id, req.tier, overrides)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(QuoteResponse::new(
        owner_id,
        req.tier,
        breakdown,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rate_override_fills_in_defaults() {
        let req = QuoteRequest {
            price_per_pet: Some(10.0),
            ..QuoteRequest::default()
        };
        let overrides = overrides_from(&req, RateParameters::new(30.0, 40.0)).unwrap();
        assert_eq!(overrides.rates, Some(RateParameters::new(30.0, 10.0)));
        assert_eq!(overrides.calculator, None);
    }

    #[test]
    fn unknown_calculator_is_rejected() {
        let req = QuoteRequest {
            calculator: Some("fancy".to_string()),
            ..QuoteRequest::default()
        };
        assert!(overrides_from(&req, RateParameters::new(30.0, 40.0)).is_err());
    }
}
