//! Output formatting utilities

use kinroots_core::Person;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// One-line summary of a person
pub fn person_line(person: &Person) -> String {
    let mut extras = Vec::new();
    if let Some(dob) = person.dob {
        extras.push(format!("b. {}", dob));
    }
    if let Some(profession) = &person.profession {
        extras.push(profession.clone());
    }
    if !person.is_living {
        extras.push("deceased".to_string());
    }

    if extras.is_empty() {
        format!("{}  [{}] ({})", person.full_name(), person.id, person.gender)
    } else {
        format!(
            "{}  [{}] ({}) - {}",
            person.full_name(),
            person.id,
            person.gender,
            extras.join(", ")
        )
    }
}

/// Render a person list in the requested format
pub fn format_people(people: &[Person], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(people).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Table => people
            .iter()
            .map(person_line)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
