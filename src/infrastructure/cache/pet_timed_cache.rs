//! Time-bounded pet cache
//!
//! Read-through cache in front of the pet repository. Entries older than
//! the configured TTL are reloaded on access and dropped by the sweeper.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::{DomainResult, Pet, RepositoryProvider};
use crate::shared::ShutdownSignal;

struct CachedPet {
    pet: Pet,
    cached_at: Instant,
}

impl CachedPet {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }
}

pub struct PetTimedCache {
    repos: Arc<dyn RepositoryProvider>,
    entries: DashMap<i32, CachedPet>,
    ttl: Duration,
}

impl PetTimedCache {
    pub fn new(repos: Arc<dyn RepositoryProvider>, ttl: Duration) -> Self {
        Self {
            repos,
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached pet if still fresh, otherwise loaded from the repository
    pub async fn get(&self, id: i32) -> DomainResult<Option<Pet>> {
        let cached = self
            .entries
            .get(&id)
            .and_then(|entry| entry.is_fresh(self.ttl).then(|| entry.pet.clone()));
        if let Some(pet) = cached {
            return Ok(Some(pet));
        }

        debug!(pet_id = id, "Pet cache miss");
        match self.repos.pets().find_by_id(id).await? {
            Some(pet) => {
                self.insert(id, pet.clone());
                Ok(Some(pet))
            }
            None => {
                self.entries.remove(&id);
                Ok(None)
            }
        }
    }

    /// Write through to the repository and cache the stored pet
    pub async fn save(&self, pet: Pet) -> DomainResult<Pet> {
        let stored = self.repos.pets().save(pet).await?;
        if let Some(id) = stored.id {
            self.insert(id, stored.clone());
        }
        Ok(stored)
    }

    pub fn invalidate(&self, id: i32) {
        self.entries.remove(&id);
    }

    /// Drop stale entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(self.ttl));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Purge expired entries every `interval` until `shutdown` fires
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration, shutdown: ShutdownSignal) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let purged = cache.purge_expired();
                        if purged > 0 {
                            debug!(purged, remaining = cache.len(), "Purged expired pets from cache");
                        }
                    }
                    _ = shutdown.wait() => {
                        debug!("Pet cache sweeper stopped");
                        break;
                    }
                }
            }
        })
    }

    fn insert(&self, id: i32, pet: Pet) {
        self.entries.insert(
            id,
            CachedPet {
                pet,
                cached_at: Instant::now(),
            },
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────
