//! Owner aggregate root

use crate::domain::pet::Pet;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Owner {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pets: Vec<Pet>,
}

impl Owner {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Pets sorted by name, case-insensitively
    pub fn pets(&self) -> Vec<Pet> {
        let mut pets = self.pets.clone();
        pets.sort_by_key(|p| p.name.to_lowercase());
        pets
    }

    pub fn pet_count(&self) -> usize {
        self.pets.len()
    }

    /// Attach `pet` to this owner.
    ///
    /// Only pets that have not been persisted yet join the collection;
    /// the owner link is set either way. Returns whether the pet was added.
    pub fn add_pet(&mut self, mut pet: Pet) -> bool {
        pet.owner_id = self.id;
        if pet.is_new() {
            self.pets.push(pet);
            true
        } else {
            false
        }
    }

    pub fn remove_pet(&mut self, name: &str) -> Option<Pet> {
        let index = self.pets.iter().position(|p| p.name == name)?;
        Some(self.pets.remove(index))
    }

    /// Case-insensitive lookup by name
    pub fn get_pet(&self, name: &str) -> Option<&Pet> {
        self.get_pet_ignoring_new(name, false)
    }

    /// Case-insensitive lookup by name, skipping unsaved pets when `ignore_new`
    pub fn get_pet_ignoring_new(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets
            .iter()
            .filter(|p| !ignore_new || !p.is_new())
            .find(|p| p.name.to_lowercase() == wanted)
    }

    /// Put a freshly stored pet in place of its previous version.
    ///
    /// Matches by id first, then by name among unsaved pets; a pet with
    /// no match is appended.
    pub fn replace_pet(&mut self, mut stored: Pet) {
        stored.owner_id = self.id;
        let slot = self
            .pets
            .iter()
            .position(|p| p.id.is_some() && p.id == stored.id)
            .or_else(|| {
                let name = stored.name.to_lowercase();
                self.pets
                    .iter()
                    .position(|p| p.is_new() && p.name.to_lowercase() == name)
            });

        match slot {
            Some(index) => self.pets[index] = stored,
            None => self.pets.push(stored),
        }
    }

    /// Replace the whole pet collection, e.g. when loading from storage
    pub(crate) fn set_pets(&mut self, pets: Vec<Pet>) {
        self.pets = pets;
    }
}

// ── Tests ──────────────────────────────────────────────────────
