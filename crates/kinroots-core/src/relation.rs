//! Kinship relation labels and path types

use crate::person::PersonId;
use serde::{Deserialize, Serialize};

/// Relation connecting two persons in the kinship graph
///
/// Closed set: consumers can match exhaustively. Father/Mother edges come
/// from the subject's own parent references; Child is their inverse; Spouse
/// comes from either direction of `spouse_id`; Sibling from a shared parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KinRelation {
    Father,
    Mother,
    Spouse,
    Child,
    Sibling,
}

impl KinRelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            KinRelation::Father => "Father",
            KinRelation::Mother => "Mother",
            KinRelation::Spouse => "Spouse",
            KinRelation::Child => "Child",
            KinRelation::Sibling => "Sibling",
        }
    }
}

impl std::fmt::Display for KinRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hop in a kinship path: the person arrived at and the relation used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub person_id: PersonId,
    pub relation: KinRelation,
}

impl PathStep {
    pub fn new(person_id: impl Into<PersonId>, relation: KinRelation) -> Self {
        Self {
            person_id: person_id.into(),
            relation,
        }
    }
}

/// Ordered hops from a start person (exclusive) to an end person (inclusive)
///
/// An empty path means "start equals end". Unreachability is expressed by
/// the resolver returning no path at all, never by an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinPath {
    pub steps: Vec<PathStep>,
}

impl KinPath {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// Number of hops
    pub fn hops(&self) -> usize {
        self.steps.len()
    }

    /// True when start and end are the same person
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep> {
        self.steps.iter()
    }
}
