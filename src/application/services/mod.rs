//! Application services

mod owners;
mod pet_manager;
mod pricing;

pub use owners::OwnerService;
pub use pet_manager::{PetChanges, PetManager};
pub use pricing::{PricingService, QuoteOverrides};
