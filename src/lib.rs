//! # Vet Clinic
//!
//! Owner, pet and visit registry with a visit pricing engine.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Owners, pets, visits and the pure pricing calculators
//! - **application**: Use cases over the repositories and the pet cache
//! - **infrastructure**: In-memory storage and the time-bounded pet cache
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Error types and graceful shutdown
//! - **server**: Service bootstrap and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use domain::{
    CalculatorKind, CustomerTier, PriceBreakdown, PriceCalculator, RateParameters,
};
pub use interfaces::create_api_router;
