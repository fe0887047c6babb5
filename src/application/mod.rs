//! Application layer - use cases over the domain and storage

pub mod services;

pub use services::{OwnerService, PetChanges, PetManager, PricingService, QuoteOverrides};
