//! Prompt framing: path-to-text conversion owned by this crate

use kinroots_core::{KinPath, Lineage, Person};

/// Placeholder name for a path step whose id has no record in the lineage
pub const UNRECORDED_RELATIVE: &str = "an unrecorded relative";

/// How many existing records a duplicate-check prompt includes at most
const DUPLICATE_CONTEXT_LIMIT: usize = 20;

/// Render a path as a relationship chain
///
/// Each hop names the person arrived at; a dangling id substitutes a
/// neutral placeholder rather than failing the whole chain.
pub fn chain_description(lineage: &Lineage, start: &Person, path: &KinPath) -> String {
    let mut parts = vec![start.full_name()];
    for step in path.iter() {
        let name = lineage
            .find(&step.person_id)
            .map(|p| p.full_name())
            .unwrap_or_else(|| UNRECORDED_RELATIVE.to_string());
        parts.push(format!("is the {} of {}", step.relation, name));
    }
    parts.join(" -> ")
}

/// Frame the kinship question for the classifier
///
/// Includes both endpoint names and genders; the term is requested from the
/// start person's perspective.
pub fn kinship_prompt(start: &Person, end: &Person, chain: &str) -> String {
    format!(
        "Target relationship: How is {} ({}) related to {} ({})? \
         Path: {}. \
         Please provide the specific Indian (Hindi) kinship term from the perspective of {}.",
        end.full_name(),
        end.gender,
        start.full_name(),
        start.gender,
        chain,
        start.full_name(),
    )
}

/// Frame the duplicate-record question for the classifier
pub fn duplicate_prompt(candidate: &Person, existing: &[Person]) -> String {
    let context = &existing[..existing.len().min(DUPLICATE_CONTEXT_LIMIT)];
    let candidate_json =
        serde_json::to_string(candidate).unwrap_or_else(|_| "{}".to_string());
    let existing_json = serde_json::to_string(context).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Analyze if the following person profile is a duplicate of any existing records.\n\
         New Person: {}\n\
         Existing Records: {}\n\n\
         Return the match ID and confidence score (0-100) based on Name, DOB, and Locations.",
        candidate_json, existing_json,
    )
}
