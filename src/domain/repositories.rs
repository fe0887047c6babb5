//! Repository access point
//!
//! Services depend on a single `Arc<dyn RepositoryProvider>` instead of one
//! handle per aggregate.

use super::owner::OwnerRepository;
use super::pet::{PetRepository, VisitRepository};

pub trait RepositoryProvider: Send + Sync {
    fn owners(&self) -> &dyn OwnerRepository;
    fn pets(&self) -> &dyn PetRepository;
    fn visits(&self) -> &dyn VisitRepository;
}
