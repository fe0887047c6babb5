//! Owner registry use cases

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, Owner, RepositoryProvider};

/// Service for owner lookup and registration
pub struct OwnerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl OwnerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Owners whose last name starts with `last_name`; all owners when absent
    pub async fn find_owners(&self, last_name: Option<&str>) -> DomainResult<Vec<Owner>> {
        match last_name.map(str::trim).filter(|s| !s.is_empty()) {
            Some(prefix) => self.repos.owners().find_by_last_name(prefix).await,
            None => self.repos.owners().find_all().await,
        }
    }

    pub async fn get_owner(&self, owner_id: i32) -> DomainResult<Owner> {
        self.repos
            .owners()
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Owner", owner_id))
    }

    pub async fn create_owner(&self, mut owner: Owner) -> DomainResult<Owner> {
        owner.id = None;
        let stored = self.repos.owners().save(owner).await?;
        info!(owner_id = ?stored.id, last_name = %stored.last_name, "owner created");
        Ok(stored)
    }

    /// Replace the owner's contact details; pets are left untouched
    pub async fn update_owner(&self, owner_id: i32, owner: Owner) -> DomainResult<Owner> {
        self.get_owner(owner_id).await?;
        let stored = self.repos.owners().save(owner.with_id(owner_id)).await?;
        info!(owner_id, "owner updated");
        Ok(stored)
    }
}

// ── Tests ──────────────────────────────────────────────────────
