//! Pricing service for quoting visits of an owner's pets

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::domain::{
    CalculatorKind, CustomerTier, DomainError, DomainResult, Pet, PriceBreakdown, PriceCalculator,
    PricingError, RateParameters, RepositoryProvider,
};

/// Per-request deviations from the configured calculator and rates
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteOverrides {
    pub calculator: Option<CalculatorKind>,
    pub rates: Option<RateParameters>,
}

/// Service for price quotes
pub struct PricingService {
    repos: Arc<dyn RepositoryProvider>,
    calculator: PriceCalculator,
    rates: RateParameters,
}

impl PricingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, calculator: PriceCalculator, rates: RateParameters) -> Self {
        Self {
            repos,
            calculator,
            rates,
        }
    }

    pub fn calculator_kind(&self) -> CalculatorKind {
        self.calculator.kind()
    }

    pub fn default_rates(&self) -> RateParameters {
        self.rates
    }

    /// Price `pets` as of today
    pub fn quote(
        &self,
        pets: &[Pet],
        tier: Option<CustomerTier>,
        overrides: QuoteOverrides,
    ) -> DomainResult<PriceBreakdown> {
        self.quote_at(pets, tier, overrides, Utc::now().date_naive())
    }

    /// Price `pets` as of `today`
    pub fn quote_at(
        &self,
        pets: &[Pet],
        tier: Option<CustomerTier>,
        overrides: QuoteOverrides,
        today: NaiveDate,
    ) -> DomainResult<PriceBreakdown> {
        let rates = overrides.rates.unwrap_or(self.rates);
        let breakdown = match overrides.calculator {
            Some(kind) if kind != self.calculator.kind() => {
                PriceCalculator::from_kind(kind).calculate_breakdown(pets, rates, tier, today)?
            }
            _ => self.calculator.calculate_breakdown(pets, rates, tier, today)?,
        };

        info!(
            calculator = %breakdown.calculator,
            pets = breakdown.pet_count,
            tier = ?tier,
            total = breakdown.total,
            "quote calculated"
        );

        Ok(breakdown)
    }

    /// Price every pet of an owner as of today
    ///
    /// # Errors
    /// `NotFound` for an unknown owner, a pricing error when the owner has
    /// no pets or the request is incomplete.
    pub async fn quote_for_owner(
        &self,
        owner_id: i32,
        tier: Option<CustomerTier>,
        overrides: QuoteOverrides,
    ) -> DomainResult<PriceBreakdown> {
        self.quote_for_owner_at(owner_id, tier, overrides, Utc::now().date_naive())
            .await
    }

    pub async fn quote_for_owner_at(
        &self,
        owner_id: i32,
        tier: Option<CustomerTier>,
        overrides: QuoteOverrides,
        today: NaiveDate,
    ) -> DomainResult<PriceBreakdown> {
        let owner = self
            .repos
            .owners()
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Owner", owner_id))?;

        let pets = owner.pets();
        if pets.is_empty() {
            return Err(PricingError::InvalidInput(format!("owner {} has no pets to price", owner_id)).into());
        }

        info!(owner_id, pets = pets.len(), "quote for owner");
        self.quote_at(&pets, tier, overrides, today)
    }
}

// ── Tests ──────────────────────────────────────────────────────
