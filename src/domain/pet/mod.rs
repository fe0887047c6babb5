//! Pet aggregate
//!
//! Pets, their species descriptor and visit history.

pub mod model;
pub mod repository;

pub use model::{Pet, PetType, Visit};
pub use repository::{PetRepository, VisitRepository};
