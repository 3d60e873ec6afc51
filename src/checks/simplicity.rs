//! Short definitional questions
//!
//! "What is X?" style questions a search engine answers instantly. The
//! reply carries a ready-made search link built from the user's own text.

use super::{compile, Check, CheckOutcome, Request};
use crate::error::Result;
use crate::history::History;
use crate::messages::Messages;
use crate::normalize::NormalizedRequest;
use crate::verdict::{Reason, Verdict};
use regex::Regex;

const DEFINITIONAL_PREFIX: &str =
    r"^(what is|what's|define|who is|who's|where is|where's|capital of)\s+";

pub struct SimplicityDetector {
    prefix: Regex,
    max_tokens: usize,
    search_url: String,
    messages: Messages,
}

impl SimplicityDetector {
    pub fn new(max_tokens: usize, search_url: impl Into<String>, messages: Messages) -> Result<Self> {
        Ok(Self {
            prefix: compile("definitional_prefix", DEFINITIONAL_PREFIX)?,
            max_tokens,
            search_url: search_url.into(),
            messages,
        })
    }

    /// Fewer than `max_tokens` tokens and a definitional opening
    pub fn is_simple(&self, normalized: &NormalizedRequest) -> bool {
        normalized.token_count() < self.max_tokens && self.prefix.is_match(normalized.as_str())
    }

    pub fn detect(&self, raw: &str, normalized: &NormalizedRequest) -> Option<Verdict> {
        if !self.is_simple(normalized) {
            return None;
        }

        let link = search_link(&self.search_url, raw);
        match &link {
            Some(link) => tracing::debug!(link = %link, "Simple definitional query detected"),
            None => tracing::warn!(
                search_url = %self.search_url,
                "Simple definitional query detected, but no search link could be built"
            ),
        }
        Some(Verdict::reject(
            Reason::TooSimple,
            self.messages.too_simple(link.as_deref()),
        ))
    }
}

impl Check for SimplicityDetector {
    fn name(&self) -> &'static str {
        "simplicity"
    }

    fn check(&self, request: &Request<'_>, _history: &History) -> CheckOutcome {
        match self.detect(request.raw, request.normalized) {
            Some(verdict) => CheckOutcome::Block(verdict),
            None => CheckOutcome::Continue,
        }
    }
}

/// Search link for `query`, form-encoded (spaces become `+`).
///
/// Returns `None` when `base` is not an absolute http(s) URL, so the caller
/// can fall back to a reply without a link.
pub fn search_link(base: &str, query: &str) -> Option<String> {
    let base = base.trim();
    let scheme_ok = base.starts_with("https://") || base.starts_with("http://");
    let has_host = base
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'))
        .unwrap_or(false);
    if !scheme_ok || !has_host {
        return None;
    }

    let encoded = urlencoding::encode(query).replace("%20", "+");
    Some(format!("{}{}", base, encoded))
}
