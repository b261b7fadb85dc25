//! KinRoots Translate - Kinship term resolution
//!
//! Frames a resolved kinship path as a natural-language question for an
//! external text-classification service and interprets the returned label.
//! The collaborator is treated as unreliable: every failure degrades to a
//! fixed sentinel term instead of propagating.

pub mod error;
pub mod gemini;
pub mod prompt;
pub mod traits;
pub mod translator;

pub use error::{TranslateError, TranslateResult};
pub use gemini::GeminiClassifier;
pub use prompt::{chain_description, duplicate_prompt, kinship_prompt, UNRECORDED_RELATIVE};
pub use traits::{DuplicateDetector, KinshipClassifier, KinshipLabel, MatchCandidate};
pub use translator::{DuplicateResolver, Translator, SAME_PERSON, UNKNOWN_RELATION};
