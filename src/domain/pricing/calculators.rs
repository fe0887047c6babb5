//! Pricing strategies
//!
//! Three interchangeable calculators behind the [`PriceCalculator`] enum.
//! All of them are pure: the result depends only on the pets, the rates,
//! the tier and the `today` passed in.

use chrono::NaiveDate;

use super::classifier::{InfancyRule, PetAttributes};
use super::coefficients::CoefficientTable;
use super::model::{CalculatorKind, CustomerTier, PriceBreakdown, RateParameters};
use super::policy::{RecencyPolicy, TierPolicy};
use crate::domain::pet::Pet;
use crate::shared::types::{PricingError, PricingResult};

/// The simple strategy prices every group as a single-pet volume bucket
const SIMPLE_VOLUME_SCORE: u32 = 1;

fn validate_request(pets: &[Pet], rates: &RateParameters) -> PricingResult<()> {
    if pets.is_empty() {
        return Err(PricingError::InvalidInput(
            "at least one pet is required".to_string(),
        ));
    }
    rates.validate()
}

fn require_tier(tier: Option<CustomerTier>, kind: CalculatorKind) -> PricingResult<CustomerTier> {
    tier.ok_or_else(|| {
        PricingError::InvalidInput(format!("the {} calculator needs a customer tier", kind))
    })
}

fn breakdown(
    calculator: CalculatorKind,
    pets: &[Pet],
    volume_score: u32,
    subtotal: f64,
    total: f64,
) -> PriceBreakdown {
    PriceBreakdown {
        calculator,
        pet_count: pets.len(),
        volume_score,
        subtotal,
        total: total.max(0.0),
    }
}

// ── Simple ─────────────────────────────────────────────────────

/// `(base_charge + price_per_pet × Σ rarity) × tier multiplier`
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePriceCalculator {
    coefficients: CoefficientTable,
    policy: TierPolicy,
}

impl SimplePriceCalculator {
    pub fn new() -> Self {
        Self::with_tables(CoefficientTable::rarity(), TierPolicy::simple())
    }

    pub fn with_tables(coefficients: CoefficientTable, policy: TierPolicy) -> Self {
        Self {
            coefficients,
            policy,
        }
    }

    pub fn calculate_breakdown(
        &self,
        pets: &[Pet],
        rates: RateParameters,
        tier: Option<CustomerTier>,
        today: NaiveDate,
    ) -> PricingResult<PriceBreakdown> {
        validate_request(pets, &rates)?;
        let tier = require_tier(tier, CalculatorKind::Simple)?;

        let subtotal: f64 = pets
            .iter()
            .map(|pet| {
                let attrs = PetAttributes::classify(pet, today, None);
                rates.price_per_pet * self.coefficients.lookup(&attrs).value
            })
            .sum();

        let total = self
            .policy
            .adjustment_for(tier, SIMPLE_VOLUME_SCORE)
            .apply(subtotal, rates.base_charge);

        Ok(breakdown(
            CalculatorKind::Simple,
            pets,
            SIMPLE_VOLUME_SCORE,
            subtotal,
            total,
        ))
    }
}

impl Default for SimplePriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Customer dependent ─────────────────────────────────────────

/// Rarity and infancy coefficients, then a tier × volume adjustment
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDependentPriceCalculator {
    infancy: InfancyRule,
    coefficients: CoefficientTable,
    policy: TierPolicy,
}

impl CustomerDependentPriceCalculator {
    /// Pets younger than two years are infants
    pub const INFANCY: InfancyRule = InfancyRule::up_to_years(1);

    pub fn new() -> Self {
        Self::with_tables(
            Self::INFANCY,
            CoefficientTable::rarity_and_infancy(),
            TierPolicy::customer_dependent(),
        )
    }

    pub fn with_tables(infancy: InfancyRule, coefficients: CoefficientTable, policy: TierPolicy) -> Self {
        Self {
            infancy,
            coefficients,
            policy,
        }
    }

    pub fn calculate_breakdown(
        &self,
        pets: &[Pet],
        rates: RateParameters,
        tier: Option<CustomerTier>,
        today: NaiveDate,
    ) -> PricingResult<PriceBreakdown> {
        validate_request(pets, &rates)?;
        let tier = require_tier(tier, CalculatorKind::CustomerDependent)?;

        let (subtotal, volume_score) =
            pets.iter().fold((0.0, 0u32), |(subtotal, score), pet| {
                let attrs = PetAttributes::classify(pet, today, Some(self.infancy));
                let coefficient = self.coefficients.lookup(&attrs);
                (
                    subtotal + rates.price_per_pet * coefficient.value,
                    score + coefficient.volume_score,
                )
            });

        let total = self.policy.price(
            tier,
            volume_score,
            subtotal,
            rates.base_charge,
            rates.price_per_pet * self.coefficients.max_coefficient_per_score(),
        );

        Ok(breakdown(
            CalculatorKind::CustomerDependent,
            pets,
            volume_score,
            subtotal,
            total,
        ))
    }
}

impl Default for CustomerDependentPriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Visit recency ──────────────────────────────────────────────

/// Infancy coefficients with a running-total adjustment driven by how
/// recently each pet was seen. Ignores customer tiers.
///
/// Pets are processed in the given order. Once the accumulated volume score
/// reaches the policy floor, the running total is adjusted by the current
/// pet's recency bucket before that pet's own price is added.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitRecencyPriceCalculator {
    infancy: InfancyRule,
    coefficients: CoefficientTable,
    policy: RecencyPolicy,
}

impl VisitRecencyPriceCalculator {
    /// Two-year-old pets are still infants
    pub const INFANCY: InfancyRule = InfancyRule::up_to_years(2);

    pub fn new() -> Self {
        Self::with_tables(
            Self::INFANCY,
            CoefficientTable::infancy(),
            RecencyPolicy::standard(),
        )
    }

    pub fn with_tables(infancy: InfancyRule, coefficients: CoefficientTable, policy: RecencyPolicy) -> Self {
        Self {
            infancy,
            coefficients,
            policy,
        }
    }

    pub fn calculate_breakdown(
        &self,
        pets: &[Pet],
        rates: RateParameters,
        today: NaiveDate,
    ) -> PricingResult<PriceBreakdown> {
        validate_request(pets, &rates)?;

        let mut subtotal = 0.0;
        let mut total = 0.0;
        let mut volume_score = 0u32;

        for pet in pets {
            let attrs = PetAttributes::classify(pet, today, Some(self.infancy));
            let coefficient = self.coefficients.lookup(&attrs);
            let price = rates.price_per_pet * coefficient.value;

            volume_score += coefficient.volume_score;
            if volume_score >= self.policy.min_score() {
                total = self
                    .policy
                    .adjustment_for(attrs.days_since_last_visit)
                    .apply(total, rates.base_charge);
            }

            subtotal += price;
            total += price;
        }

        Ok(breakdown(
            CalculatorKind::VisitRecency,
            pets,
            volume_score,
            subtotal,
            total,
        ))
    }
}

impl Default for VisitRecencyPriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Selector ───────────────────────────────────────────────────

/// Closed set of pricing strategies
#[derive(Debug, Clone, PartialEq)]
pub enum PriceCalculator {
    Simple(SimplePriceCalculator),
    CustomerDependent(CustomerDependentPriceCalculator),
    VisitRecency(VisitRecencyPriceCalculator),
}

impl PriceCalculator {
    /// Strategy with its calibrated tables
    pub fn from_kind(kind: CalculatorKind) -> Self {
        match kind {
            CalculatorKind::Simple => Self::Simple(SimplePriceCalculator::new()),
            CalculatorKind::CustomerDependent => {
                Self::CustomerDependent(CustomerDependentPriceCalculator::new())
            }
            CalculatorKind::VisitRecency => Self::VisitRecency(VisitRecencyPriceCalculator::new()),
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        match self {
            Self::Simple(_) => CalculatorKind::Simple,
            Self::CustomerDependent(_) => CalculatorKind::CustomerDependent,
            Self::VisitRecency(_) => CalculatorKind::VisitRecency,
        }
    }

    pub fn requires_tier(&self) -> bool {
        !matches!(self, Self::VisitRecency(_))
    }

    /// Price a group of pets
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for an empty group, a negative or
    /// non-finite rate, or a missing tier on a tier-aware strategy.
    pub fn calculate(
        &self,
        pets: &[Pet],
        rates: RateParameters,
        tier: Option<CustomerTier>,
        today: NaiveDate,
    ) -> PricingResult<f64> {
        self.calculate_breakdown(pets, rates, tier, today)
            .map(|b| b.total)
    }

    pub fn calculate_breakdown(
        &self,
        pets: &[Pet],
        rates: RateParameters,
        tier: Option<CustomerTier>,
        today: NaiveDate,
    ) -> PricingResult<PriceBreakdown> {
        match self {
            Self::Simple(c) => c.calculate_breakdown(pets, rates, tier, today),
            Self::CustomerDependent(c) => c.calculate_breakdown(pets, rates, tier, today),
            Self::VisitRecency(c) => c.calculate_breakdown(pets, rates, today),
        }
    }
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self::from_kind(CalculatorKind::default())
    }
}

// ── Tests ──────────────────────────────────────────────────────
