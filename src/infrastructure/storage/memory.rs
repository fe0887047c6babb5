//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, Owner, OwnerRepository, Pet, PetRepository, PetType,
    RepositoryProvider, Visit, VisitRepository,
};

/// Species available out of the box; lizards and snakes are rare
const DEFAULT_PET_TYPES: [(&str, bool); 6] = [
    ("cat", false),
    ("dog", false),
    ("lizard", true),
    ("snake", true),
    ("bird", false),
    ("hamster", false),
];

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    owners: DashMap<i32, Owner>,
    pets: DashMap<i32, Pet>,
    pet_types: DashMap<i32, PetType>,
    owner_counter: AtomicI32,
    pet_counter: AtomicI32,
    visit_counter: AtomicI32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        let storage = Self {
            owners: DashMap::new(),
            pets: DashMap::new(),
            pet_types: DashMap::new(),
            owner_counter: AtomicI32::new(1),
            pet_counter: AtomicI32::new(1),
            visit_counter: AtomicI32::new(1),
        };

        for (index, (name, rare)) in DEFAULT_PET_TYPES.iter().enumerate() {
            let id = index as i32 + 1;
            let mut pet_type = PetType::new(*name, *rare);
            pet_type.id = Some(id);
            storage.pet_types.insert(id, pet_type);
        }

        storage
    }

    fn next_id(counter: &AtomicI32) -> i32 {
        counter.fetch_add(1, Ordering::SeqCst)
    }

    fn pets_of(&self, owner_id: i32) -> Vec<Pet> {
        let mut pets: Vec<Pet> = self
            .pets
            .iter()
            .filter(|e| e.value().owner_id == Some(owner_id))
            .map(|e| e.value().clone())
            .collect();
        pets.sort_by_key(|p| p.id);
        pets
    }

    fn with_pets(&self, mut owner: Owner) -> Owner {
        if let Some(id) = owner.id {
            owner.set_pets(self.pets_of(id));
        }
        owner
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn owners(&self) -> &dyn OwnerRepository {
        self
    }

    fn pets(&self) -> &dyn PetRepository {
        self
    }

    fn visits(&self) -> &dyn VisitRepository {
        self
    }
}

#[async_trait]
impl OwnerRepository for InMemoryStorage {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Owner>> {
        let owner = self.owners.get(&id).map(|o| o.clone());
        Ok(owner.map(|o| self.with_pets(o)))
    }

    async fn find_by_last_name(&self, last_name: &str) -> DomainResult<Vec<Owner>> {
        let prefix = last_name.to_lowercase();
        let mut owners: Vec<Owner> = self
            .owners
            .iter()
            .filter(|e| e.value().last_name.to_lowercase().starts_with(&prefix))
            .map(|e| e.value().clone())
            .collect();
        owners.sort_by_key(|o| o.id);
        Ok(owners.into_iter().map(|o| self.with_pets(o)).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Owner>> {
        self.find_by_last_name("").await
    }

    async fn save(&self, mut owner: Owner) -> DomainResult<Owner> {
        let id = match owner.id {
            Some(id) if self.owners.contains_key(&id) => id,
            Some(id) => return Err(DomainError::not_found("Owner", id)),
            None => Self::next_id(&self.owner_counter),
        };
        owner.id = Some(id);
        owner.set_pets(Vec::new());
        self.owners.insert(id, owner.clone());
        Ok(self.with_pets(owner))
    }
}

#[async_trait]
impl PetRepository for InMemoryStorage {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Pet>> {
        Ok(self.pets.get(&id).map(|p| p.clone()))
    }

    async fn find_by_owner(&self, owner_id: i32) -> DomainResult<Vec<Pet>> {
        Ok(self.pets_of(owner_id))
    }

    async fn find_pet_types(&self) -> DomainResult<Vec<PetType>> {
        let mut types: Vec<PetType> = self.pet_types.iter().map(|e| e.value().clone()).collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn save(&self, mut pet: Pet) -> DomainResult<Pet> {
        if let Some(owner_id) = pet.owner_id {
            if !self.owners.contains_key(&owner_id) {
                return Err(DomainError::not_found("Owner", owner_id));
            }
        }

        let id = match pet.id {
            Some(id) if self.pets.contains_key(&id) => id,
            Some(id) => return Err(DomainError::not_found("Pet", id)),
            None => Self::next_id(&self.pet_counter),
        };
        pet.id = Some(id);
        pet.assign_visit_pet_ids();
        for visit in pet.visits_mut().iter_mut().filter(|v| v.is_new()) {
            visit.id = Some(Self::next_id(&self.visit_counter));
        }

        self.pets.insert(id, pet.clone());
        Ok(pet)
    }
}

#[async_trait]
impl VisitRepository for InMemoryStorage {
    async fn find_by_pet_id(&self, pet_id: i32) -> DomainResult<Vec<Visit>> {
        Ok(self
            .pets
            .get(&pet_id)
            .map(|p| p.visits())
            .unwrap_or_default())
    }

    async fn save(&self, mut visit: Visit) -> DomainResult<Visit> {
        let pet_id = visit
            .pet_id
            .ok_or_else(|| DomainError::Validation("visit is not linked to a pet".to_string()))?;
        let mut pet = self
            .pets
            .get_mut(&pet_id)
            .ok_or_else(|| DomainError::not_found("Pet", pet_id))?;

        if visit.is_new() {
            visit.id = Some(Self::next_id(&self.visit_counter));
            pet.add_visit(visit.clone());
        } else if let Some(existing) = pet.visits_mut().iter_mut().find(|v| v.id == visit.id) {
            *existing = visit.clone();
        } else {
            return Err(DomainError::NotFound {
                entity: "Visit",
                field: "id",
                value: format!("{:?}", visit.id),
            });
        }

        Ok(visit)
    }
}

// ── Tests ──────────────────────────────────────────────────────
