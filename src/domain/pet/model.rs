//! Pet domain entities

use chrono::NaiveDate;

/// Species descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetType {
    pub id: Option<i32>,
    pub name: String,
    /// Rare species are priced with an uplift
    pub rare: bool,
}

impl PetType {
    pub fn new(name: impl Into<String>, rare: bool) -> Self {
        Self {
            id: None,
            name: name.into(),
            rare,
        }
    }
}

/// A single visit of a pet to the clinic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: Option<i32>,
    pub pet_id: Option<i32>,
    pub date: NaiveDate,
    pub description: String,
}

impl Visit {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: None,
            pet_id: None,
            date,
            description: description.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pet {
    /// `None` until the pet has been persisted
    pub id: Option<i32>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<PetType>,
    pub owner_id: Option<i32>,
    visits: Vec<Visit>,
}

impl Pet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_type(mut self, pet_type: PetType) -> Self {
        self.pet_type = Some(pet_type);
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn add_visit(&mut self, mut visit: Visit) {
        visit.pet_id = self.id;
        self.visits.push(visit);
    }

    /// Visits ordered by date, most recent first
    pub fn visits(&self) -> Vec<Visit> {
        let mut visits = self.visits.clone();
        visits.sort_by(|a, b| b.date.cmp(&a.date));
        visits
    }

    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    pub fn last_visit_date(&self) -> Option<NaiveDate> {
        self.visits.iter().map(|v| v.date).max()
    }

    /// Visits within `[start, end]`, most recent first
    pub fn visits_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Visit> {
        self.visits()
            .into_iter()
            .filter(|v| v.date >= start && v.date <= end)
            .collect()
    }

    /// Propagate the pet id to visits recorded before it was persisted
    pub(crate) fn assign_visit_pet_ids(&mut self) {
        for visit in &mut self.visits {
            visit.pet_id = self.id;
        }
    }

    pub(crate) fn visits_mut(&mut self) -> &mut Vec<Visit> {
        &mut self.visits
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pet_with_visits(dates: &[NaiveDate]) -> Pet {
        let mut pet = Pet::new("Leo");
        for d in dates {
            pet.add_visit(Visit::new(*d, "checkup"));
        }
        pet
    }

    #[test]
    fn visits_are_returned_most_recent_first() {
        let batches: [&[NaiveDate]; 3] = [
            &[date(2021, 10, 13), date(2015, 8, 12), date(2018, 10, 11), date(1983, 10, 20)],
            &[date(2000, 3, 2), date(1983, 10, 23), date(2018, 9, 10)],
            &[date(1999, 2, 3)],
        ];

        for dates in batches {
            let pet = pet_with_visits(dates);
            let returned: Vec<NaiveDate> = pet.visits().iter().map(|v| v.date).collect();

            let mut expected = dates.to_vec();
            expected.sort_by(|a, b| b.cmp(a));
            assert_eq!(returned, expected);
        }
    }

    #[test]
    fn visits_contain_every_added_visit() {
        let dates = [date(2018, 10, 11), date(1983, 10, 20), date(1999, 2, 3)];
        let pet = pet_with_visits(&dates);
        let returned = pet.visits();

        assert_eq!(returned.len(), dates.len());
        for d in dates {
            assert!(returned.iter().any(|v| v.date == d), "missing visit on {d}");
        }
    }

    #[test]
    fn last_visit_date_is_the_maximum() {
        let pet = pet_with_visits(&[date(2015, 8, 12), date(2021, 10, 13), date(2018, 1, 1)]);
        assert_eq!(pet.last_visit_date(), Some(date(2021, 10, 13)));
        assert_eq!(Pet::new("Nobody").last_visit_date(), None);
    }

    #[test]
    fn visits_between_is_inclusive() {
        let pet = pet_with_visits(&[date(2020, 1, 1), date(2020, 6, 1), date(2021, 1, 1)]);
        let found = pet.visits_between(date(2020, 1, 1), date(2020, 6, 1));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, date(2020, 6, 1));
    }

    #[test]
    fn add_visit_links_visit_to_pet() {
        let mut pet = Pet::new("Max").with_id(3);
        pet.add_visit(Visit::new(date(2022, 2, 2), "rabies shot"));
        assert_eq!(pet.visits()[0].pet_id, Some(3));
    }

    #[test]
    fn new_pet_has_no_id() {
        assert!(Pet::new("Max").is_new());
        assert!(!Pet::new("Max").with_id(0).is_new());
    }
}
