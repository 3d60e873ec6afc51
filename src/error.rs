//! Error types for a3s-gate

use std::fmt;
use thiserror::Error;

/// Errors that can occur while building or configuring the gate
#[derive(Debug, Error)]
pub enum GateError {
    /// One or more keyword resources could not be loaded
    #[error("Failed to load keyword resources: {}", list_failures(.0))]
    Resources(Vec<ResourceError>),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A detection pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(String),

    /// IO failure outside of resource loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for gate operations
pub type Result<T> = std::result::Result<T, GateError>;

/// Which keyword resource a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Politeness,
    CsKeywords,
    NonCsKeywords,
    BashCommands,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Politeness => "politeness phrases",
            Self::CsKeywords => "computer science keywords",
            Self::NonCsKeywords => "non computer science keywords",
            Self::BashCommands => "bash commands",
        };
        f.write_str(name)
    }
}

/// Why a single resource failed to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceFailure {
    /// The resource does not exist or could not be read
    Missing(String),
    /// The resource parsed, but its top-level value is not a list
    NotAList { found: &'static str },
    /// The resource is not valid JSON
    Parse(String),
}

impl fmt::Display for ResourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(detail) => write!(f, "not found ({})", detail),
            Self::NotAList { found } => write!(f, "expected a JSON list, got {}", found),
            Self::Parse(detail) => write!(f, "invalid JSON ({})", detail),
        }
    }
}

/// A failed keyword resource, with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceError {
    pub kind: ResourceKind,
    pub location: String,
    pub failure: ResourceFailure,
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}': {}", self.kind, self.location, self.failure)
    }
}

fn list_failures(failures: &[ResourceError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
