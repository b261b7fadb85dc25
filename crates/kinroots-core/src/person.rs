//! Person (family member) types and operations

use crate::error::Error;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for a person
///
/// Opaque string. Freshly minted ids are ULIDs; ids imported from legacy
/// data may be any unique string (e.g. "1", "2").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    /// Mint a fresh unique id
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Gender of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            other => Err(Error::InvalidGender(other.to_string())),
        }
    }
}

/// A member of the community lineage
///
/// Parent and spouse fields are plain back-references to other person ids,
/// not ownership relations; no cascading lifecycle. Dangling references are
/// tolerated by every consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    pub first_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    pub last_name: String,

    pub gender: Gender,

    /// Date of birth (ISO calendar date)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestral_home: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gotra: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Photo URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_id: Option<PersonId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<PersonId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<PersonId>,

    #[serde(default = "default_true")]
    pub is_living: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Person {
    /// Create a new person with a freshly minted id
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PersonId::generate(),
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            gender,
            dob: None,
            current_location: None,
            place_of_birth: None,
            ancestral_home: None,
            gotra: None,
            profession: None,
            bio: None,
            photo: None,
            father_id: None,
            mother_id: None,
            spouse_id: None,
            is_living: true,
            education: None,
            hobbies: None,
            achievements: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the generated id (legacy/imported data)
    pub fn with_id(mut self, id: impl Into<PersonId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_father(mut self, id: impl Into<PersonId>) -> Self {
        self.father_id = Some(id.into());
        self
    }

    pub fn with_mother(mut self, id: impl Into<PersonId>) -> Self {
        self.mother_id = Some(id.into());
        self
    }

    pub fn with_spouse(mut self, id: impl Into<PersonId>) -> Self {
        self.spouse_id = Some(id.into());
        self
    }

    pub fn with_dob(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    /// Full display name: first, middle and last names joined, empties skipped
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}
