//! Pet and visit use cases

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Owner, Pet, PetType, RepositoryProvider, Visit,
};
use crate::infrastructure::PetTimedCache;

/// Changes applied to a registered pet
#[derive(Debug, Clone, Default)]
pub struct PetChanges {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<String>,
}

/// Service for pet, pet type and visit operations
pub struct PetManager {
    repos: Arc<dyn RepositoryProvider>,
    cache: Arc<PetTimedCache>,
}

impl PetManager {
    pub fn new(repos: Arc<dyn RepositoryProvider>, cache: Arc<PetTimedCache>) -> Self {
        Self { repos, cache }
    }

    pub async fn find_owner(&self, owner_id: i32) -> DomainResult<Option<Owner>> {
        info!(owner_id, "find owner");
        self.repos.owners().find_by_id(owner_id).await
    }

    /// Attach an empty pet to `owner` and return it
    pub fn new_pet(&self, owner: &mut Owner) -> Pet {
        info!(owner_id = ?owner.id, "add pet for owner");
        let mut pet = Pet::new("");
        pet.owner_id = owner.id;
        owner.add_pet(pet.clone());
        pet
    }

    pub async fn find_pet(&self, pet_id: i32) -> DomainResult<Option<Pet>> {
        info!(pet_id, "find pet by id");
        self.cache.get(pet_id).await
    }

    /// Add `pet` to `owner` and store it through the cache
    pub async fn save_pet(&self, mut pet: Pet, owner: &mut Owner) -> DomainResult<Pet> {
        info!(pet_id = ?pet.id, owner_id = ?owner.id, "save pet");
        pet.owner_id = owner.id;
        owner.add_pet(pet.clone());
        let stored = self.cache.save(pet).await?;
        owner.replace_pet(stored.clone());
        Ok(stored)
    }

    /// Register a new pet for an existing owner
    ///
    /// # Errors
    /// `NotFound` for an unknown owner, `Conflict` when the owner already
    /// has a pet with the same name.
    pub async fn register_pet(&self, owner_id: i32, pet: Pet) -> DomainResult<Pet> {
        let mut owner = self.require_owner(owner_id).await?;
        if pet.name.trim().is_empty() {
            return Err(DomainError::Validation("pet name must not be blank".to_string()));
        }
        if owner.get_pet_ignoring_new(&pet.name, true).is_some() {
            return Err(DomainError::Conflict(format!(
                "owner {} already has a pet named '{}'",
                owner_id, pet.name
            )));
        }
        self.save_pet(pet, &mut owner).await
    }

    /// Apply `changes` to one of the owner's pets, keeping its visit history
    pub async fn update_pet(&self, owner_id: i32, pet_id: i32, changes: PetChanges) -> DomainResult<Pet> {
        let mut owner = self.require_owner(owner_id).await?;
        let mut pet = owner
            .pets()
            .into_iter()
            .find(|p| p.id == Some(pet_id))
            .ok_or_else(|| DomainError::not_found("Pet", pet_id))?;

        if let Some(name) = changes.name {
            let taken = owner
                .get_pet_ignoring_new(&name, true)
                .is_some_and(|other| other.id != Some(pet_id));
            if taken {
                return Err(DomainError::Conflict(format!(
                    "owner {} already has a pet named '{}'",
                    owner_id, name
                )));
            }
            pet.name = name;
        }
        if let Some(birth_date) = changes.birth_date {
            pet.birth_date = Some(birth_date);
        }
        if let Some(type_name) = changes.pet_type {
            pet.pet_type = Some(self.resolve_pet_type(&type_name).await?);
        }

        self.save_pet(pet, &mut owner).await
    }

    pub async fn pet_types(&self) -> DomainResult<Vec<PetType>> {
        self.repos.pets().find_pet_types().await
    }

    /// Pet type with the given name, ignoring case
    pub async fn resolve_pet_type(&self, name: &str) -> DomainResult<PetType> {
        let wanted = name.trim().to_lowercase();
        self.pet_types()
            .await?
            .into_iter()
            .find(|t| t.name.to_lowercase() == wanted)
            .ok_or_else(|| DomainError::Validation(format!("unknown pet type '{}'", name)))
    }

    /// The owner's pets sorted by name
    pub async fn owner_pets(&self, owner_id: i32) -> DomainResult<Vec<Pet>> {
        self.require_owner(owner_id).await?;
        let mut pets = self.repos.pets().find_by_owner(owner_id).await?;
        pets.sort_by_key(|p| p.name.to_lowercase());
        Ok(pets)
    }

    /// Distinct species among the owner's pets
    pub async fn owner_pet_types(&self, owner_id: i32) -> DomainResult<Vec<PetType>> {
        let mut types = BTreeMap::new();
        for pet_type in self.owner_pets(owner_id).await?.into_iter().filter_map(|p| p.pet_type) {
            types.entry(pet_type.name.clone()).or_insert(pet_type);
        }
        Ok(types.into_values().collect())
    }

    /// Visits of a pet within `[start, end]`, most recent first
    pub async fn visits_between(&self, pet_id: i32, start: NaiveDate, end: NaiveDate) -> DomainResult<Vec<Visit>> {
        if start > end {
            return Err(DomainError::Validation(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        let pet = self.require_pet(pet_id).await?;
        Ok(pet.visits_between(start, end))
    }

    pub async fn add_visit(&self, pet_id: i32, mut visit: Visit) -> DomainResult<Visit> {
        self.require_pet(pet_id).await?;
        visit.pet_id = Some(pet_id);
        let saved = self.repos.visits().save(visit).await?;
        self.cache.invalidate(pet_id);
        info!(pet_id, visit_id = ?saved.id, date = %saved.date, "visit recorded");
        Ok(saved)
    }

    async fn require_owner(&self, owner_id: i32) -> DomainResult<Owner> {
        self.find_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Owner", owner_id))
    }

    async fn require_pet(&self, pet_id: i32) -> DomainResult<Pet> {
        self.find_pet(pet_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pet", pet_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OwnerRepository, PetRepository};
    use crate::infrastructure::InMemoryStorage;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn manager_with(storage: Arc<InMemoryStorage>) -> PetManager {
        let cache = Arc::new(PetTimedCache::new(storage.clone(), Duration::from_secs(60)));
        PetManager::new(storage, cache)
    }

    async fn setup() -> (Arc<InMemoryStorage>, PetManager, Owner) {
        let storage = Arc::new(InMemoryStorage::new());
        let owner = OwnerRepository::save(storage.as_ref(), Owner::new("George", "Franklin"))
            .await
            .unwrap();
        let manager = manager_with(storage.clone());
        (storage, manager, owner)
    }

    #[tokio::test]
    async fn find_owner_returns_existing_owner() {
        let (_, manager, owner) = setup().await;
        let found = manager.find_owner(owner.id.unwrap()).await.unwrap();
        assert_eq!(found.unwrap().last_name, "Franklin");
    }

    #[tokio::test]
    async fn find_owner_returns_none_for_unknown_id() {
        let (_, manager, _) = setup().await;
        assert!(manager.find_owner(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn new_pet_adds_exactly_one_pet() {
        let (_, manager, mut owner) = setup().await;
        owner.add_pet(Pet::new("farshid"));
        owner.add_pet(Pet::new("faramarz"));

        let pet = manager.new_pet(&mut owner);

        assert_eq!(owner.pet_count(), 3);
        assert!(pet.is_new());
        assert_eq!(pet.owner_id, owner.id);
    }

    #[tokio::test]
    async fn find_pet_by_id_table() {
        let storage = Arc::new(InMemoryStorage::new());
        let names = ["lovely cat", "farshid", "faramarz", "fereydoon", "annoying dog"];
        let mut ids = Vec::new();
        for name in names {
            let pet = PetRepository::save(storage.as_ref(), Pet::new(name)).await.unwrap();
            ids.push(pet.id.unwrap());
        }
        let manager = manager_with(storage);

        for (id, name) in ids.iter().zip(names) {
            let found = manager.find_pet(*id).await.unwrap().unwrap();
            assert_eq!(found.name, name);
            assert_eq!(found.id, Some(*id));
        }
        assert!(manager.find_pet(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_pet_adds_pet_to_owner_in_name_order() {
        let (storage, manager, mut owner) = setup().await;
        owner.add_pet(Pet::new("farshid"));

        let stored = manager.save_pet(Pet::new("faramarz"), &mut owner).await.unwrap();

        let names: Vec<String> = owner.pets().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["faramarz", "farshid"]);
        assert!(stored.id.is_some());
        let persisted = PetRepository::find_by_id(storage.as_ref(), stored.id.unwrap()).await.unwrap();
        assert_eq!(persisted.unwrap().owner_id, owner.id);
    }

    #[tokio::test]
    async fn register_pet_rejects_duplicate_name() {
        let (_, manager, owner) = setup().await;
        let owner_id = owner.id.unwrap();

        manager.register_pet(owner_id, Pet::new("Leo")).await.unwrap();
        let result = manager.register_pet(owner_id, Pet::new("leo")).await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn register_pet_for_unknown_owner_fails() {
        let (_, manager, _) = setup().await;
        let result = manager.register_pet(77, Pet::new("Leo")).await;
        assert!(matches!(result, Err(DomainError::NotFound { entity: "Owner", .. })));
    }

    #[tokio::test]
    async fn update_pet_keeps_visits_and_changes_fields() {
        let (_, manager, owner) = setup().await;
        let owner_id = owner.id.unwrap();
        let pet = manager.register_pet(owner_id, Pet::new("Leo")).await.unwrap();
        let pet_id = pet.id.unwrap();
        manager
            .add_visit(pet_id, Visit::new(date(2024, 1, 5), "checkup"))
            .await
            .unwrap();

        let changes = PetChanges {
            name: Some("Leonard".to_string()),
            birth_date: Some(date(2020, 2, 2)),
            pet_type: Some("Snake".to_string()),
        };
        let updated = manager.update_pet(owner_id, pet_id, changes).await.unwrap();

        assert_eq!(updated.name, "Leonard");
        assert_eq!(updated.birth_date, Some(date(2020, 2, 2)));
        assert!(updated.pet_type.as_ref().unwrap().rare);
        assert_eq!(updated.visit_count(), 1);
    }

    #[tokio::test]
    async fn update_pet_rejects_name_of_sibling() {
        let (_, manager, owner) = setup().await;
        let owner_id = owner.id.unwrap();
        manager.register_pet(owner_id, Pet::new("Leo")).await.unwrap();
        let basil = manager.register_pet(owner_id, Pet::new("Basil")).await.unwrap();

        let changes = PetChanges {
            name: Some("LEO".to_string()),
            ..PetChanges::default()
        };
        let result = manager.update_pet(owner_id, basil.id.unwrap(), changes).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn unknown_pet_type_is_a_validation_error() {
        let (_, manager, _) = setup().await;
        let result = manager.resolve_pet_type("dragon").await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(manager.resolve_pet_type("DOG").await.unwrap().name, "dog");
    }

    #[tokio::test]
    async fn owner_pet_types_are_distinct() {
        let (_, manager, owner) = setup().await;
        let owner_id = owner.id.unwrap();
        let cat = manager.resolve_pet_type("cat").await.unwrap();
        let snake = manager.resolve_pet_type("snake").await.unwrap();
        for (name, pet_type) in [("a", &cat), ("b", &cat), ("c", &snake)] {
            manager
                .register_pet(owner_id, Pet::new(name).with_type(pet_type.clone()))
                .await
                .unwrap();
        }
        manager.register_pet(owner_id, Pet::new("untyped")).await.unwrap();

        let types = manager.owner_pet_types(owner_id).await.unwrap();
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["cat", "snake"]);
    }

    #[tokio::test]
    async fn owner_pets_are_sorted_by_name() {
        let (_, manager, owner) = setup().await;
        let owner_id = owner.id.unwrap();
        for name in ["rosy", "Leo", "basil"] {
            manager.register_pet(owner_id, Pet::new(name)).await.unwrap();
        }

        let pets = manager.owner_pets(owner_id).await.unwrap();
        let names: Vec<&str> = pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["basil", "Leo", "rosy"]);
        assert!(pets.iter().all(|p| p.owner_id == Some(owner_id)));
    }

    #[tokio::test]
    async fn owner_pets_for_unknown_owner_fails() {
        let (_, manager, _) = setup().await;
        assert!(matches!(
            manager.owner_pets(42).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn added_visit_is_visible_through_cache() {
        let (_, manager, owner) = setup().await;
        let pet = manager
            .register_pet(owner.id.unwrap(), Pet::new("Rosy"))
            .await
            .unwrap();
        let pet_id = pet.id.unwrap();
        manager.find_pet(pet_id).await.unwrap();

        manager
            .add_visit(pet_id, Visit::new(date(2024, 3, 4), "spayed"))
            .await
            .unwrap();
        manager
            .add_visit(pet_id, Visit::new(date(2023, 1, 1), "shots"))
            .await
            .unwrap();

        let visits = manager
            .visits_between(pet_id, date(2024, 1, 1), date(2024, 12, 31))
            .await
            .unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].description, "spayed");
    }

    #[tokio::test]
    async fn visits_between_rejects_inverted_range() {
        let (_, manager, _) = setup().await;
        let result = manager
            .visits_between(1, date(2024, 2, 1), date(2024, 1, 1))
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn add_visit_to_unknown_pet_fails() {
        let (_, manager, _) = setup().await;
        let result = manager.add_visit(9, Visit::new(date(2024, 1, 1), "x")).await;
        assert!(matches!(result, Err(DomainError::NotFound { entity: "Pet", .. })));
    }
}
