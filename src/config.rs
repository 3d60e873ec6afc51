//! Gate configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::error::{GateError, Result};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::messages::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Similarity score (0-100) at which a request counts as a repeat
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 88;

/// Requests with fewer tokens than this may be flagged as too simple
pub const DEFAULT_SIMPLE_MAX_TOKENS: usize = 6;

/// Non-CS hits must exceed CS hits by more than this factor
pub const DEFAULT_DOMAIN_RATIO: f64 = 2.0;

/// Search link prefix; the URL-encoded prompt is appended
pub const DEFAULT_SEARCH_URL: &str = "https://letmegooglethat.com/?q=";

/// Main gate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Number of recent requests remembered for repetition detection
    pub history_capacity: usize,

    /// Minimum similarity score for a repeat
    pub similarity_threshold: u8,

    /// Token limit for definitional questions
    pub simple_max_tokens: usize,

    /// Out-of-domain dominance factor
    pub domain_ratio: f64,

    /// Search engine prefix used in "too simple" replies
    pub search_url: String,

    /// Message catalog language
    pub language: Language,

    /// Keyword resource locations; the bundled vocabularies are used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceConfig>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            simple_max_tokens: DEFAULT_SIMPLE_MAX_TOKENS,
            domain_ratio: DEFAULT_DOMAIN_RATIO,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            language: Language::default(),
            resources: None,
        }
    }
}

impl GateConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GateError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: GateConfig = serde_json::from_str(&content).map_err(|e| {
            GateError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Gate config loaded");
        Ok(config)
    }

    /// Reject values that would disable or break a check
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(GateError::Config(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.similarity_threshold > 100 {
            return Err(GateError::Config(format!(
                "similarity_threshold must be within 0..=100, got {}",
                self.similarity_threshold
            )));
        }
        if self.simple_max_tokens == 0 {
            return Err(GateError::Config(
                "simple_max_tokens must be at least 1".to_string(),
            ));
        }
        if !(self.domain_ratio.is_finite() && self.domain_ratio > 0.0) {
            return Err(GateError::Config(format!(
                "domain_ratio must be a positive number, got {}",
                self.domain_ratio
            )));
        }
        Ok(())
    }
}

/// Locations of the four keyword resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub politeness: PathBuf,
    pub cs_keywords: PathBuf,
    pub non_cs_keywords: PathBuf,
    pub bash_commands: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            politeness: PathBuf::from("keywords/politeness.json"),
            cs_keywords: PathBuf::from("keywords/computer_science.json"),
            non_cs_keywords: PathBuf::from("keywords/non_computer_science.json"),
            bash_commands: PathBuf::from("keywords/bash_commands.json"),
        }
    }
}

impl ResourceConfig {
    /// Resolve relative paths against `base`; absolute paths are kept
    pub fn resolve(&self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };
        Self {
            politeness: join(&self.politeness),
            cs_keywords: join(&self.cs_keywords),
            non_cs_keywords: join(&self.non_cs_keywords),
            bash_commands: join(&self.bash_commands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.similarity_threshold, 88);
        assert_eq!(config.simple_max_tokens, 6);
        assert_eq!(config.language, Language::Fr);
        assert!(config.resources.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: GateConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config: GateConfig = serde_json::from_str(
            r#"{"history_capacity": 4, "language": "en", "resources": {"politeness": "p.json"}}"#,
        )
        .unwrap();
        assert_eq!(config.history_capacity, 4);
        assert_eq!(config.language, Language::En);
        let resources = config.resources.unwrap();
        assert_eq!(resources.politeness, PathBuf::from("p.json"));
        assert_eq!(
            resources.bash_commands,
            PathBuf::from("keywords/bash_commands.json")
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GateConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.history_capacity = 10;
        config.similarity_threshold = 101;
        assert!(config.validate().is_err());

        config.similarity_threshold = 88;
        config.domain_ratio = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gate.json");
        std::fs::write(&path, r#"{"similarity_threshold": 90}"#).unwrap();

        let config = GateConfig::from_file(&path).unwrap();
        assert_eq!(config.similarity_threshold, 90);
    }

    #[test]
    fn test_unset_resources_not_serialized() {
        let json = serde_json::to_value(GateConfig::default()).unwrap();
        assert!(json.get("resources").is_none());

        let config = GateConfig {
            resources: Some(ResourceConfig::default()),
            ..Default::default()
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["resources"]["politeness"], "keywords/politeness.json");
    }

    #[test]
    fn test_from_file_missing() {
        let err = GateConfig::from_file("/nonexistent/a3s-gate.json").unwrap_err();
        assert!(matches!(err, GateError::Config(_)));
    }

    #[test]
    fn test_resolve_relative_paths() {
        let resolved = ResourceConfig::default().resolve("/srv/gate");
        assert_eq!(
            resolved.cs_keywords,
            PathBuf::from("/srv/gate/keywords/computer_science.json")
        );
    }
}
