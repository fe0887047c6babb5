//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use crate::application::{OwnerService, PetManager, PricingService};
use crate::config::PricingConfig;
use crate::domain::{PriceCalculator, RepositoryProvider};
use crate::infrastructure::PetTimedCache;

#[derive(Clone)]
pub struct AppState {
    pub owners: Arc<OwnerService>,
    pub pets: Arc<PetManager>,
    pub pricing: Arc<PricingService>,
    pub cache: Arc<PetTimedCache>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        cache: Arc<PetTimedCache>,
        pricing: &PricingConfig,
    ) -> Self {
        Self {
            owners: Arc::new(OwnerService::new(repos.clone())),
            pets: Arc::new(PetManager::new(repos.clone(), cache.clone())),
            pricing: Arc::new(PricingService::new(
                repos,
                PriceCalculator::from_kind(pricing.calculator),
                pricing.rates(),
            )),
            cache,
            started_at: Instant::now(),
        }
    }
}
