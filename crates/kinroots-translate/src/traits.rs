//! External classifier traits

use crate::error::TranslateResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A kinship term with the classifier's reasoning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinshipLabel {
    pub term: String,
    pub explanation: String,
}

/// A duplicate-match judgment for a new person record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    #[serde(rename = "matchId")]
    pub match_id: String,
    /// Confidence score, 0-100
    pub confidence: f64,
}

/// Text classifier resolving a relationship description to a kinship term
///
/// Implementations make at most one external call per invocation; retry
/// policy, if any, belongs to the implementation, not the caller.
#[async_trait]
pub trait KinshipClassifier: Send + Sync {
    async fn classify(&self, prompt: &str) -> TranslateResult<KinshipLabel>;
}

/// Classifier judging whether a person profile duplicates an existing record
#[async_trait]
pub trait DuplicateDetector: Send + Sync {
    async fn detect(&self, prompt: &str) -> TranslateResult<MatchCandidate>;
}
