//! Pet attribute classification
//!
//! Derives the pricing-relevant attributes of a pet relative to a given day.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::domain::pet::Pet;
use crate::shared::types::{PricingError, PricingResult};

/// A pet is an infant while its whole-year age is at most `max_age_years`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfancyRule {
    pub max_age_years: u32,
}

impl InfancyRule {
    pub const fn up_to_years(max_age_years: u32) -> Self {
        Self { max_age_years }
    }

    pub fn is_infant(&self, birth_date: NaiveDate, today: NaiveDate) -> bool {
        age_in_years(birth_date, today) <= self.max_age_years
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetAttributes {
    pub is_rare: bool,
    pub is_infant: bool,
    pub days_since_last_visit: Option<i64>,
}

impl PetAttributes {
    /// Classify `pet`, defaulting a missing species to "not rare" and a
    /// missing birth date to "not infant".
    ///
    /// `infancy` is `None` for strategies that ignore age.
    pub fn classify(pet: &Pet, today: NaiveDate, infancy: Option<InfancyRule>) -> Self {
        if let Err(err) = check_defined(pet, infancy) {
            warn!(pet = %pet.name, error = %err, "Pricing pet with default attributes");
        }
        derive(pet, today, infancy)
    }

    /// Like [`classify`](Self::classify), but refuses incomplete records
    pub fn try_classify(
        pet: &Pet,
        today: NaiveDate,
        infancy: Option<InfancyRule>,
    ) -> PricingResult<Self> {
        check_defined(pet, infancy)?;
        Ok(derive(pet, today, infancy))
    }
}

fn check_defined(pet: &Pet, infancy: Option<InfancyRule>) -> PricingResult<()> {
    if pet.pet_type.is_none() {
        return Err(PricingError::UndefinedAttribute {
            pet: pet.name.clone(),
            attribute: "species",
        });
    }
    if infancy.is_some() && pet.birth_date.is_none() {
        return Err(PricingError::UndefinedAttribute {
            pet: pet.name.clone(),
            attribute: "birth date",
        });
    }
    Ok(())
}

fn derive(pet: &Pet, today: NaiveDate, infancy: Option<InfancyRule>) -> PetAttributes {
    let is_rare = pet.pet_type.as_ref().map(|t| t.rare).unwrap_or(false);
    let is_infant = match (infancy, pet.birth_date) {
        (Some(rule), Some(birth)) => rule.is_infant(birth, today),
        _ => false,
    };
    let days_since_last_visit = pet
        .last_visit_date()
        .map(|last| (today - last).num_days());

    PetAttributes {
        is_rare,
        is_infant,
        days_since_last_visit,
    }
}

/// Completed years between `birth` and `today`; 0 for future birth dates
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> u32 {
    if birth >= today {
        return 0;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
