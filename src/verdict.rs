//! Verdict types returned by the gate
//!
//! A verdict is the only thing the serving layer sees. It serializes with
//! snake_case names and omits absent fields, e.g.
//! `{"action":"reject","reason":"bash_command","message":"..."}` or
//! `{"action":"pass","original_prompt":"..."}`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the serving layer should do with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Refuse the request
    Reject,
    /// Advisory only; produced by non-terminal checks
    Inform,
    /// Forward the request, with an advisory for the user
    InformAndPass,
    /// Forward the request unchanged
    Pass,
}

/// Why a check produced its verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    EmptyPrompt,
    RepeatedRequest,
    BashCommand,
    TooSimple,
    NonCsDomain,
    Politeness,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyPrompt => "empty_prompt",
            Self::RepeatedRequest => "repeated_request",
            Self::BashCommand => "bash_command",
            Self::TooSimple => "too_simple",
            Self::NonCsDomain => "non_cs_domain",
            Self::Politeness => "politeness",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The gate's decision for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub action: Action,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,

    /// Human-readable explanation; absent for a plain pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Unmodified user text, present whenever the request is forwarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_prompt: Option<String>,
}

impl Verdict {
    pub fn reject(reason: Reason, message: impl Into<String>) -> Self {
        Self {
            action: Action::Reject,
            reason: Some(reason),
            message: Some(message.into()),
            original_prompt: None,
        }
    }

    pub fn inform(reason: Reason, message: impl Into<String>) -> Self {
        Self {
            action: Action::Inform,
            reason: Some(reason),
            message: Some(message.into()),
            original_prompt: None,
        }
    }

    pub fn inform_and_pass(message: impl Into<String>, original_prompt: impl Into<String>) -> Self {
        Self {
            action: Action::InformAndPass,
            reason: None,
            message: Some(message.into()),
            original_prompt: Some(original_prompt.into()),
        }
    }

    pub fn pass(original_prompt: impl Into<String>) -> Self {
        Self {
            action: Action::Pass,
            reason: None,
            message: None,
            original_prompt: Some(original_prompt.into()),
        }
    }

    /// Whether the serving layer must refuse the request
    pub fn is_rejected(&self) -> bool {
        matches!(self.action, Action::Reject | Action::Inform)
    }

    /// Whether the request goes on to the generation backend
    pub fn forwards(&self) -> bool {
        matches!(self.action, Action::Pass | Action::InformAndPass)
    }

    /// Text to hand to the generation backend, if the request is forwarded.
    ///
    /// With `with_advisory`, an `inform_and_pass` message is prepended on its
    /// own line.
    pub fn forwarded_prompt(&self, with_advisory: bool) -> Option<String> {
        if !self.forwards() {
            return None;
        }
        let prompt = self.original_prompt.as_deref()?;
        match (&self.message, with_advisory) {
            (Some(message), true) => Some(format!("{}\n{}", message, prompt)),
            _ => Some(prompt.to_string()),
        }
    }
}
