//! Owner repository interface

use async_trait::async_trait;

use super::model::Owner;
use crate::domain::DomainResult;

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Owner with its pets loaded
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Owner>>;
    /// Owners whose last name starts with `last_name`, ignoring case
    async fn find_by_last_name(&self, last_name: &str) -> DomainResult<Vec<Owner>>;
    async fn find_all(&self) -> DomainResult<Vec<Owner>>;
    /// Insert or update the owner's own fields; pets are stored separately
    async fn save(&self, owner: Owner) -> DomainResult<Owner>;
}
