//! Keyword and phrase resources
//!
//! Vocabularies are plain JSON lists loaded once at startup. All four
//! resources are attempted before failing, so a broken deployment reports
//! every bad file at once instead of one per restart.

use crate::config::ResourceConfig;
use crate::error::{GateError, ResourceError, ResourceFailure, ResourceKind, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

const BUNDLED_POLITENESS: &str = include_str!("../keywords/politeness.json");
const BUNDLED_CS_KEYWORDS: &str = include_str!("../keywords/computer_science.json");
const BUNDLED_NON_CS_KEYWORDS: &str = include_str!("../keywords/non_computer_science.json");
const BUNDLED_BASH_COMMANDS: &str = include_str!("../keywords/bash_commands.json");

/// Immutable set of lower-cased words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(HashSet<String>);

impl KeywordSet {
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of `tokens` that are members of this set
    pub fn overlap<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> usize {
        tokens.into_iter().filter(|t| self.0.contains(*t)).count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| s.as_ref().to_lowercase()).collect())
    }
}

/// Ordered list of lower-cased phrases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseList(Vec<String>);

impl PhraseList {
    /// First phrase occurring anywhere in `text`
    pub fn find_in(&self, text: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|phrase| text.contains(phrase.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PhraseList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// The four vocabularies the gate runs on
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    pub politeness: PhraseList,
    pub cs_keywords: KeywordSet,
    pub non_cs_keywords: KeywordSet,
    pub bash_commands: KeywordSet,
}

impl Keywords {
    /// Vocabularies shipped with the crate
    pub fn bundled() -> Result<Self> {
        let bundled = |kind, location, content: &str| (kind, location, Ok(content.to_string()));
        Self::from_sources([
            bundled(ResourceKind::Politeness, "bundled:politeness.json", BUNDLED_POLITENESS),
            bundled(ResourceKind::CsKeywords, "bundled:computer_science.json", BUNDLED_CS_KEYWORDS),
            bundled(
                ResourceKind::NonCsKeywords,
                "bundled:non_computer_science.json",
                BUNDLED_NON_CS_KEYWORDS,
            ),
            bundled(ResourceKind::BashCommands, "bundled:bash_commands.json", BUNDLED_BASH_COMMANDS),
        ])
    }

    /// Load every resource named in `config`
    pub fn load(config: &ResourceConfig) -> Result<Self> {
        let read = |kind: ResourceKind, path: &Path| {
            let location = path.display().to_string();
            let content = std::fs::read_to_string(path).map_err(|e| e.to_string());
            (kind, location, content)
        };

        let sources = [
            read(ResourceKind::Politeness, config.politeness.as_path()),
            read(ResourceKind::CsKeywords, config.cs_keywords.as_path()),
            read(ResourceKind::NonCsKeywords, config.non_cs_keywords.as_path()),
            read(ResourceKind::BashCommands, config.bash_commands.as_path()),
        ];
        Self::from_sources(sources.iter().map(|(k, l, c)| (*k, l.as_str(), c.clone())))
    }

    /// Parse already-read resources. A source whose content is `Err` is
    /// reported as missing with the given detail.
    pub fn from_sources<'a, L>(
        sources: impl IntoIterator<Item = (ResourceKind, L, std::result::Result<String, String>)>,
    ) -> Result<Self>
    where
        L: Into<std::borrow::Cow<'a, str>>,
    {
        let mut keywords = Keywords::default();
        let mut failures = Vec::new();

        for (kind, location, content) in sources {
            let location = location.into();
            let items = content
                .map_err(ResourceFailure::Missing)
                .and_then(|c| parse_list(&c, &location));
            match items {
                Ok(items) => keywords.assign(kind, items),
                Err(failure) => {
                    tracing::error!(resource = %kind, location = %location, error = %failure, "Keyword resource failed to load");
                    failures.push(ResourceError {
                        kind,
                        location: location.into_owned(),
                        failure,
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(GateError::Resources(failures));
        }
        Ok(keywords)
    }

    fn assign(&mut self, kind: ResourceKind, items: Vec<String>) {
        match kind {
            ResourceKind::Politeness => self.politeness = items.into_iter().collect(),
            ResourceKind::CsKeywords => self.cs_keywords = items.into_iter().collect(),
            ResourceKind::NonCsKeywords => self.non_cs_keywords = items.into_iter().collect(),
            ResourceKind::BashCommands => self.bash_commands = items.into_iter().collect(),
        }
    }
}

/// Parse a JSON list into lower-cased strings.
///
/// Scalars are taken by their JSON text; nested values are skipped.
fn parse_list(content: &str, location: &str) -> std::result::Result<Vec<String>, ResourceFailure> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ResourceFailure::Parse(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ResourceFailure::NotAList {
                found: json_type(&other),
            })
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => out.push(s.to_lowercase()),
            Value::Number(n) => out.push(n.to_string()),
            Value::Bool(b) => out.push(b.to_string()),
            other => {
                tracing::warn!(location, found = json_type(&other), "Skipping non-scalar keyword entry");
            }
        }
    }
    Ok(out)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::create_dir_all(dir.join("keywords")).unwrap();
        std::fs::write(dir.join("keywords").join(name), content).unwrap();
    }

    #[test]
    fn test_bundled_resources_load() {
        let keywords = Keywords::bundled().unwrap();
        assert!(!keywords.politeness.is_empty());
        assert!(keywords.cs_keywords.contains("algorithm"));
        assert!(keywords.non_cs_keywords.contains("history"));
        assert!(keywords.bash_commands.contains("grep"));
        assert!(!keywords.bash_commands.contains("python"));
    }

    #[test]
    fn test_bundled_commands_are_not_topic_words() {
        let keywords = Keywords::bundled().unwrap();
        let commands: Vec<&String> = keywords.bash_commands.0.iter().collect();
        for command in commands {
            assert!(
                !keywords.non_cs_keywords.contains(command),
                "{} is both a command and an off-topic word",
                command
            );
            assert!(
                !keywords.cs_keywords.contains(command),
                "{} is both a command and a CS keyword",
                command
            );
        }
        for word in ["history", "free", "cut", "find", "date", "which", "make", "sort"] {
            assert!(!keywords.bash_commands.contains(word), "{}", word);
        }
    }

    #[test]
    fn test_keyword_set_lowercases_and_dedups() {
        let set: KeywordSet = ["TCP", "tcp", "Udp"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("tcp"));
        assert!(set.contains("udp"));
        assert!(!set.contains("Udp"));
    }

    #[test]
    fn test_overlap_counts_members() {
        let set: KeywordSet = ["tcp", "udp", "socket"].into_iter().collect();
        assert_eq!(set.overlap(["tcp", "and", "udp"]), 2);
        assert_eq!(set.overlap(Vec::<&str>::new()), 0);
    }

    #[test]
    fn test_phrase_list_drops_empty_and_matches_substring() {
        let phrases: PhraseList = ["Thank you", "", "please"].into_iter().collect();
        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases.find_in("could you please help"), Some("please"));
        assert_eq!(phrases.find_in("explain tcp"), None);
    }

    #[test]
    fn test_parse_list_converts_scalars() {
        let items = parse_list(r#"["LS", 42, true, null, ["x"]]"#, "test").unwrap();
        assert_eq!(items, vec!["ls", "42", "true"]);
    }

    #[test]
    fn test_parse_list_rejects_non_list() {
        let failure = parse_list(r#"{"words": []}"#, "test").unwrap_err();
        assert_eq!(failure, ResourceFailure::NotAList { found: "object" });
    }

    #[test]
    fn test_parse_list_rejects_invalid_json() {
        let failure = parse_list("[\"unterminated", "test").unwrap_err();
        assert!(matches!(failure, ResourceFailure::Parse(_)));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "politeness.json", r#"["please"]"#);
        write(dir.path(), "computer_science.json", r#"["tcp"]"#);
        write(dir.path(), "non_computer_science.json", r#"["rome"]"#);
        write(dir.path(), "bash_commands.json", r#"["grep"]"#);

        let keywords = Keywords::load(&ResourceConfig::default().resolve(dir.path())).unwrap();
        assert_eq!(keywords.politeness.len(), 1);
        assert!(keywords.cs_keywords.contains("tcp"));
        assert!(keywords.non_cs_keywords.contains("rome"));
        assert!(keywords.bash_commands.contains("grep"));
    }

    #[test]
    fn test_load_reports_every_failing_resource() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "politeness.json", r#"["please"]"#);
        write(dir.path(), "computer_science.json", r#"{"not": "a list"}"#);
        write(dir.path(), "non_computer_science.json", "not json");
        // bash_commands.json is missing

        let err = Keywords::load(&ResourceConfig::default().resolve(dir.path())).unwrap_err();
        let GateError::Resources(failures) = err else {
            panic!("expected resource error, got {:?}", err);
        };

        assert_eq!(failures.len(), 3);
        assert_eq!(failures[0].kind, ResourceKind::CsKeywords);
        assert!(matches!(failures[0].failure, ResourceFailure::NotAList { .. }));
        assert_eq!(failures[1].kind, ResourceKind::NonCsKeywords);
        assert!(matches!(failures[1].failure, ResourceFailure::Parse(_)));
        assert_eq!(failures[2].kind, ResourceKind::BashCommands);
        assert!(matches!(failures[2].failure, ResourceFailure::Missing(_)));
        assert!(failures[2].location.ends_with("bash_commands.json"));
    }
}
