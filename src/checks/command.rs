//! Shell utility questions
//!
//! "man grep", "how to use tar", or just "ls" are better answered by the
//! manual page than by a generation call.

use super::{compile, Check, CheckOutcome, Request};
use crate::error::Result;
use crate::history::History;
use crate::keywords::KeywordSet;
use crate::messages::Messages;
use crate::normalize::NormalizedRequest;
use crate::verdict::{Reason, Verdict};
use regex::Regex;

/// Tried in order against the whole normalized request
const COMMAND_PATTERNS: &[(&str, &str)] = &[
    (
        "command_question",
        r"^(?:what is|what does|how to use|options for|man page for|man)\s+`?([a-zA-Z0-9_-]+)`?\b",
    ),
    ("command_with_question_mark", r"^`?([a-zA-Z0-9_-]+)`?\s+\?$"),
    ("bare_command", r"^`?([a-zA-Z0-9_-]+)`?$"),
];

pub struct CommandDetector {
    patterns: Vec<Regex>,
    commands: KeywordSet,
    messages: Messages,
}

impl CommandDetector {
    pub fn new(commands: KeywordSet, messages: Messages) -> Result<Self> {
        let patterns = COMMAND_PATTERNS
            .iter()
            .map(|(name, pattern)| compile(name, pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            commands,
            messages,
        })
    }

    /// Utility name referenced by `normalized`, if it is a known command.
    ///
    /// A pattern that captures an unknown word does not stop the scan; later
    /// patterns still get a chance.
    pub fn extract<'a>(&self, normalized: &'a NormalizedRequest) -> Option<&'a str> {
        self.patterns.iter().find_map(|re| {
            let name = re.captures(normalized.as_str())?.get(1)?.as_str();
            let name = name.trim_matches('`');
            self.commands.contains(name).then_some(name)
        })
    }

    pub fn detect(&self, normalized: &NormalizedRequest) -> Option<Verdict> {
        let command = self.extract(normalized)?;
        tracing::debug!(command, "Shell command reference detected");
        Some(Verdict::reject(
            Reason::BashCommand,
            self.messages.bash_command(command),
        ))
    }
}

impl Check for CommandDetector {
    fn name(&self) -> &'static str {
        "command"
    }

    fn check(&self, request: &Request<'_>, _history: &History) -> CheckOutcome {
        match self.detect(request.normalized) {
            Some(verdict) => CheckOutcome::Block(verdict),
            None => CheckOutcome::Continue,
        }
    }
}
