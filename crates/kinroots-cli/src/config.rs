//! CLI configuration

use serde::Deserialize;
use std::path::Path;

/// Optional configuration loaded from `config.toml` in the data directory
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Remote lineage API endpoint; local storage is used when unset
    pub endpoint: Option<String>,

    /// Gemini model for kinship classification
    pub gemini_model: Option<String>,
}

impl Config {
    /// Load the config file, falling back to defaults when it is absent
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(config.endpoint.is_none());
        assert!(config.gemini_model.is_none());
    }

    #[test]
    fn test_parses_fields() {
        let config: Config = toml::from_str(
            r#"
            endpoint = "https://roots.example.com/api/lineage"
            gemini_model = "gemini-2.5-pro"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://roots.example.com/api/lineage")
        );
        assert_eq!(config.gemini_model.as_deref(), Some("gemini-2.5-pro"));
    }
}
