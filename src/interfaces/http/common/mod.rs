//! Shared HTTP building blocks

mod api_response;
mod error;
mod validated_json;

pub use api_response::ApiResponse;
pub use error::{bad_request, domain_error, status_for, ApiError};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
