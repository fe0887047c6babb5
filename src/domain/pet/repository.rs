//! Pet & visit repository interfaces

use async_trait::async_trait;

use super::model::{Pet, PetType, Visit};
use crate::domain::DomainResult;

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Pet>>;
    async fn find_by_owner(&self, owner_id: i32) -> DomainResult<Vec<Pet>>;
    async fn find_pet_types(&self) -> DomainResult<Vec<PetType>>;
    /// Insert a new pet or update an existing one; returns the stored pet
    async fn save(&self, pet: Pet) -> DomainResult<Pet>;
}

#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn find_by_pet_id(&self, pet_id: i32) -> DomainResult<Vec<Visit>>;
    async fn save(&self, visit: Visit) -> DomainResult<Visit>;
}
