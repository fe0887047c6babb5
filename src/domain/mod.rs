pub mod owner;
pub mod pet;
pub mod pricing;
pub mod repositories;

// Re-export commonly used types
pub use owner::{Owner, OwnerRepository};
pub use pet::{Pet, PetRepository, PetType, Visit, VisitRepository};
pub use pricing::{CalculatorKind, CustomerTier, PriceBreakdown, PriceCalculator, RateParameters};
pub use repositories::RepositoryProvider;

pub use crate::shared::types::errors::{DomainError, DomainResult, PricingError, PricingResult};
