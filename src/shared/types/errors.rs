use thiserror::Error;

/// Errors raised by the pricing engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Invalid pricing input: {0}")]
    InvalidInput(String),

    /// A pet record lacks an attribute the classifier needs.
    /// Recovered locally by the lenient classifier.
    #[error("Pet {pet} has no {attribute}")]
    UndefinedAttribute {
        pet: String,
        attribute: &'static str,
    },
}

pub type PricingResult<T> = Result<T, PricingError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
