//! Interface layer - adapters exposing the application to the outside

pub mod http;

pub use http::{create_api_router, AppState};
