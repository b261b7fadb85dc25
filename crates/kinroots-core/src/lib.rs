//! KinRoots Core - Kinship graph engine
//!
//! This crate provides the person data model and the pure kinship
//! queries: neighbor derivation and shortest-path resolution over a
//! lineage snapshot.

pub mod error;
pub mod graph;
pub mod lineage;
pub mod person;
pub mod relation;

pub use error::{Error, Result};
pub use graph::KinshipGraph;
pub use lineage::Lineage;
pub use person::{Gender, Person, PersonId};
pub use relation::{KinPath, KinRelation, PathStep};
