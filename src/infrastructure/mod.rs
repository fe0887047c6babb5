//! Infrastructure layer - external concerns

pub mod cache;
pub mod storage;

pub use cache::PetTimedCache;
pub use storage::InMemoryStorage;
