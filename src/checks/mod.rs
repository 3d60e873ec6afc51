//! Admission checks
//!
//! Each check looks at one request and either lets it through, blocks it
//! with a terminal verdict, or attaches an advisory. The pipeline runs them
//! in a fixed priority order and stops at the first block.
//!
//! ## Checks, in evaluation order
//!
//! - `RepetitionDetector`: near-duplicate of a recent request
//! - `CommandDetector`: question about a single shell utility
//! - `SimplicityDetector`: short definitional question
//! - `DomainClassifier`: off-topic for a computer science assistant
//! - `PolitenessAnnotator`: advisory only, never blocks

pub mod command;
pub mod domain;
pub mod politeness;
pub mod repetition;
pub mod simplicity;

pub use command::CommandDetector;
pub use domain::{DomainClassifier, DomainScore};
pub use politeness::PolitenessAnnotator;
pub use repetition::RepetitionDetector;
pub use simplicity::{search_link, SimplicityDetector};

use crate::error::{GateError, Result};
use crate::history::History;
use crate::normalize::NormalizedRequest;
use crate::verdict::Verdict;
use regex::Regex;

/// A request as seen by the checks
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// Text exactly as the user sent it
    pub raw: &'a str,
    /// Canonical form used for every comparison
    pub normalized: &'a NormalizedRequest,
}

/// What a check decided about a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No opinion; run the next check
    Continue,
    /// Stop the pipeline with this verdict
    Block(Verdict),
    /// Keep going, but surface this advisory if the request is forwarded
    Advise(Verdict),
}

/// A single admission heuristic.
///
/// Checks are pure given the request and the history snapshot they are
/// handed; the pipeline owns all mutation.
pub trait Check: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Inspect a request against the current history
    fn check(&self, request: &Request<'_>, history: &History) -> CheckOutcome;

    /// Whether a request blocked by this check is still remembered in
    /// history. A repeat is already there, so the repetition detector
    /// opts out.
    fn records_blocked(&self) -> bool {
        true
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| GateError::Pattern(format!("{}: {}", name, e)))
}
