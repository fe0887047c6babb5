//! Pricing engine
//!
//! Pure calculators mapping `(pets, rates, [tier], today)` to a price.
//!
//! - [`classifier`]: rarity, infancy and visit recency of a pet
//! - [`coefficients`]: attribute combination → per-pet coefficient
//! - [`policy`]: tier × volume and recency adjustments
//! - [`calculators`]: the strategies and the [`PriceCalculator`] selector

pub mod calculators;
pub mod classifier;
pub mod coefficients;
pub mod model;
pub mod policy;

pub use calculators::{
    CustomerDependentPriceCalculator, PriceCalculator, SimplePriceCalculator,
    VisitRecencyPriceCalculator,
};
pub use classifier::{InfancyRule, PetAttributes};
pub use coefficients::{Coefficient, CoefficientRule, CoefficientTable};
pub use model::{CalculatorKind, CustomerTier, PriceBreakdown, RateParameters};
pub use policy::{Adjustment, BaseChargeMode, RecencyBucket, RecencyPolicy, TierBucket, TierPolicy};
