//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping and the validated JSON extractor
//! - `modules`: DTOs and handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;
mod state;

pub use router::{create_api_router, ApiDoc};
pub use state::AppState;
