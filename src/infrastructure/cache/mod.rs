//! In-process caches

mod pet_timed_cache;

pub use pet_timed_cache::PetTimedCache;
