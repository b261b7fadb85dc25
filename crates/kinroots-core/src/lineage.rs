//! Lineage collection: the person snapshot queried by the kinship graph

use crate::person::{Person, PersonId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The full person collection of a community tree
///
/// Kept as a plain ordered list; collection order defines the scan order of
/// derived relations and therefore the tie-breaking of equal-length paths.
/// Id uniqueness is assumed, not enforced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineage {
    pub people: Vec<Person>,
}

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_people(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.people.iter()
    }

    /// Look up a person by id (linear scan)
    pub fn find(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.find(id).is_some()
    }

    /// Insert or replace a person by id, then back-link the spouse record
    ///
    /// When the saved person names a spouse, the spouse record is updated to
    /// point back unless it already does. Mirrors the save flow of the
    /// hosting application so spouse links stay symmetric on the happy path;
    /// the graph still tolerates asymmetric links in foreign data.
    pub fn upsert(&mut self, mut person: Person) {
        person.updated_at = Utc::now();
        let spouse_id = person.spouse_id.clone();
        let person_id = person.id.clone();

        match self.people.iter_mut().find(|p| p.id == person.id) {
            Some(existing) => *existing = person,
            None => self.people.push(person),
        }

        if let Some(spouse_id) = spouse_id {
            if let Some(spouse) = self.people.iter_mut().find(|p| p.id == spouse_id) {
                if spouse.spouse_id.as_ref() != Some(&person_id) {
                    spouse.spouse_id = Some(person_id);
                    spouse.updated_at = Utc::now();
                }
            }
        }
    }

    /// Remove a person by id; references from other records are left dangling
    pub fn remove(&mut self, id: &PersonId) -> bool {
        let before = self.people.len();
        self.people.retain(|p| &p.id != id);
        self.people.len() != before
    }
}

impl IntoIterator for Lineage {
    type Item = Person;
    type IntoIter = std::vec::IntoIter<Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.into_iter()
    }
}

impl<'a> IntoIterator for &'a Lineage {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Gender;

    #[test]
    fn test_find_by_id() {
        let lineage = Lineage::from_people(vec![
            Person::new("Rajesh", "Sharma", Gender::Male).with_id("1"),
            Person::new("Sunita", "Sharma", Gender::Female).with_id("2"),
        ]);

        assert_eq!(lineage.find(&"2".into()).unwrap().first_name, "Sunita");
        assert!(lineage.find(&"99".into()).is_none());
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut lineage = Lineage::from_people(vec![
            Person::new("Rajesh", "Sharma", Gender::Male).with_id("1"),
        ]);

        let mut updated = Person::new("Rajesh", "Sharma", Gender::Male).with_id("1");
        updated.profession = Some("Civil Engineer".to_string());
        lineage.upsert(updated);

        assert_eq!(lineage.len(), 1);
        assert_eq!(
            lineage.find(&"1".into()).unwrap().profession.as_deref(),
            Some("Civil Engineer")
        );
    }

    #[test]
    fn test_upsert_back_links_spouse() {
        let mut lineage = Lineage::from_people(vec![
            Person::new("Rajesh", "Sharma", Gender::Male).with_id("1"),
        ]);

        lineage.upsert(
            Person::new("Sunita", "Sharma", Gender::Female)
                .with_id("2")
                .with_spouse("1"),
        );

        let rajesh = lineage.find(&"1".into()).unwrap();
        assert_eq!(rajesh.spouse_id, Some("2".into()));
    }

    #[test]
    fn test_remove_leaves_references_dangling() {
        let mut lineage = Lineage::from_people(vec![
            Person::new("Rajesh", "Sharma", Gender::Male).with_id("1"),
            Person::new("Amit", "Sharma", Gender::Male)
                .with_id("3")
                .with_father("1"),
        ]);

        assert!(lineage.remove(&"1".into()));
        assert!(!lineage.remove(&"1".into()));
        assert_eq!(lineage.len(), 1);
        // The child still points at the removed father
        assert_eq!(
            lineage.find(&"3".into()).unwrap().father_id,
            Some("1".into())
        );
    }
}
