//! Owner aggregate

pub mod model;
pub mod repository;

pub use model::Owner;
pub use repository::OwnerRepository;
