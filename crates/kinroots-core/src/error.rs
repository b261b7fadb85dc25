//! Error types for KinRoots Core

use thiserror::Error;

/// Result type alias using KinRoots' Error
pub type Result<T> = std::result::Result<T, Error>;

/// KinRoots error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Invalid gender: {0} (expected Male, Female or Other)")]
    InvalidGender(String),
}
