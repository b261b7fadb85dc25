//! Term translation and duplicate resolution with degraded fallbacks

use crate::prompt::{chain_description, duplicate_prompt, kinship_prompt};
use crate::traits::{DuplicateDetector, KinshipClassifier};
use kinroots_core::{KinPath, Lineage, Person};

/// Sentinel returned whenever the external classifier fails
pub const UNKNOWN_RELATION: &str = "Unknown Relation";

/// Returned for the empty path without consulting the classifier
pub const SAME_PERSON: &str = "Same Person";

/// Minimum confidence (0-100) for accepting a duplicate match
const CONFIDENCE_THRESHOLD: f64 = 70.0;

/// Turns a resolved path into a human kinship label
pub struct Translator<C: KinshipClassifier> {
    classifier: C,
}

impl<C: KinshipClassifier> Translator<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Describe the relationship between two persons along a resolved path
    ///
    /// Makes at most one external call; the empty path makes none. Any
    /// classifier failure degrades to [`UNKNOWN_RELATION`] - callers never
    /// see an error.
    pub async fn describe(
        &self,
        lineage: &Lineage,
        start: &Person,
        end: &Person,
        path: &KinPath,
    ) -> String {
        if path.is_empty() {
            return SAME_PERSON.to_string();
        }

        let chain = chain_description(lineage, start, path);
        let prompt = kinship_prompt(start, end, &chain);

        match self.classifier.classify(&prompt).await {
            Ok(label) => format!("{} ({})", label.term, label.explanation),
            Err(e) => {
                tracing::warn!(error = %e, "kinship classification failed");
                UNKNOWN_RELATION.to_string()
            }
        }
    }
}

/// Judges whether a new person record duplicates an existing one
pub struct DuplicateResolver<D: DuplicateDetector> {
    detector: D,
}

impl<D: DuplicateDetector> DuplicateResolver<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    /// Returns the matched record and confidence, or `None`
    ///
    /// Low confidence, an unknown match id, and every detector failure all
    /// resolve to "no match".
    pub async fn resolve(&self, candidate: &Person, existing: &Lineage) -> Option<(Person, f64)> {
        let prompt = duplicate_prompt(candidate, &existing.people);

        match self.detector.detect(&prompt).await {
            Ok(judgment) => {
                let matched = existing.find(&judgment.match_id.clone().into());
                match matched {
                    Some(person) if judgment.confidence > CONFIDENCE_THRESHOLD => {
                        Some((person.clone(), judgment.confidence))
                    }
                    _ => None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "duplicate detection failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TranslateError, TranslateResult};
    use crate::traits::{KinshipLabel, MatchCandidate};
    use async_trait::async_trait;
    use kinroots_core::{Gender, KinRelation, KinshipGraph, PathStep};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedClassifier {
        label: Option<KinshipLabel>,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn succeeding(term: &str, explanation: &str) -> Self {
            Self {
                label: Some(KinshipLabel {
                    term: term.to_string(),
                    explanation: explanation.to_string(),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                label: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl KinshipClassifier for FixedClassifier {
        async fn classify(&self, _prompt: &str) -> TranslateResult<KinshipLabel> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.label
                .clone()
                .ok_or_else(|| TranslateError::MalformedResponse("boom".to_string()))
        }
    }

    struct FixedDetector {
        result: TranslateResult<MatchCandidate>,
    }

    #[async_trait]
    impl DuplicateDetector for FixedDetector {
        async fn detect(&self, _prompt: &str) -> TranslateResult<MatchCandidate> {
            match &self.result {
                Ok(m) => Ok(m.clone()),
                Err(_) => Err(TranslateError::MalformedResponse("boom".to_string())),
            }
        }
    }

    fn household() -> Lineage {
        Lineage::from_people(vec![
            Person::new("Arun", "Verma", Gender::Male).with_id("A"),
            Person::new("Bina", "Verma", Gender::Female)
                .with_id("B")
                .with_spouse("A"),
        ])
    }

    #[tokio::test]
    async fn test_successful_classification_formats_term() {
        let lineage = household();
        let start = lineage.find(&"A".into()).unwrap().clone();
        let end = lineage.find(&"B".into()).unwrap().clone();
        let path = KinshipGraph::new(&lineage)
            .find_path(&start.id, &end.id)
            .unwrap();

        let translator = Translator::new(FixedClassifier::succeeding("Patni", "wife"));
        let result = translator.describe(&lineage, &start, &end, &path).await;
        assert_eq!(result, "Patni (wife)");
    }

    #[tokio::test]
    async fn test_classifier_failure_degrades_to_sentinel() {
        let lineage = household();
        let start = lineage.find(&"A".into()).unwrap().clone();
        let end = lineage.find(&"B".into()).unwrap().clone();
        let path = KinPath::new(vec![PathStep::new("B", KinRelation::Spouse)]);

        let translator = Translator::new(FixedClassifier::failing());
        let result = translator.describe(&lineage, &start, &end, &path).await;
        assert_eq!(result, UNKNOWN_RELATION);
    }

    #[tokio::test]
    async fn test_empty_path_makes_no_external_call() {
        let lineage = household();
        let person = lineage.find(&"A".into()).unwrap().clone();

        let classifier = FixedClassifier::succeeding("ignored", "ignored");
        let translator = Translator::new(classifier);
        let result = translator
            .describe(&lineage, &person, &person, &KinPath::default())
            .await;

        assert_eq!(result, SAME_PERSON);
        assert_eq!(translator.classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exactly_one_call_per_describe() {
        let lineage = household();
        let start = lineage.find(&"A".into()).unwrap().clone();
        let end = lineage.find(&"B".into()).unwrap().clone();
        let path = KinPath::new(vec![PathStep::new("B", KinRelation::Spouse)]);

        let translator = Translator::new(FixedClassifier::succeeding("Patni", "wife"));
        translator.describe(&lineage, &start, &end, &path).await;
        assert_eq!(translator.classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_confident_match_resolves() {
        let lineage = household();
        let candidate = Person::new("Arun", "Verma", Gender::Male);

        let resolver = DuplicateResolver::new(FixedDetector {
            result: Ok(MatchCandidate {
                match_id: "A".to_string(),
                confidence: 92.0,
            }),
        });

        let (matched, confidence) = resolver.resolve(&candidate, &lineage).await.unwrap();
        assert_eq!(matched.id, "A".into());
        assert_eq!(confidence, 92.0);
    }

    #[tokio::test]
    async fn test_low_confidence_is_no_match() {
        let lineage = household();
        let candidate = Person::new("Arun", "Verma", Gender::Male);

        let resolver = DuplicateResolver::new(FixedDetector {
            result: Ok(MatchCandidate {
                match_id: "A".to_string(),
                confidence: 55.0,
            }),
        });

        assert!(resolver.resolve(&candidate, &lineage).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_match_id_is_no_match() {
        let lineage = household();
        let candidate = Person::new("Arun", "Verma", Gender::Male);

        let resolver = DuplicateResolver::new(FixedDetector {
            result: Ok(MatchCandidate {
                match_id: "nobody".to_string(),
                confidence: 99.0,
            }),
        });

        assert!(resolver.resolve(&candidate, &lineage).await.is_none());
    }

    #[tokio::test]
    async fn test_detector_failure_is_no_match() {
        let lineage = household();
        let candidate = Person::new("Arun", "Verma", Gender::Male);

        let resolver = DuplicateResolver::new(FixedDetector {
            result: Err(TranslateError::MalformedResponse("boom".to_string())),
        });

        assert!(resolver.resolve(&candidate, &lineage).await.is_none());
    }
}
