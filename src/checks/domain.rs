//! Computer science domain filter
//!
//! Coarse lexical overlap: count how many distinct words of the request fall
//! in the in-domain and out-of-domain vocabularies and refuse only when the
//! out-of-domain signal clearly dominates. Ambiguous requests pass.

use super::{compile, Check, CheckOutcome, Request};
use crate::error::Result;
use crate::history::History;
use crate::keywords::KeywordSet;
use crate::normalize::NormalizedRequest;
use crate::verdict::{Reason, Verdict};
use regex::Regex;
use std::collections::HashSet;

/// Keyword hits for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainScore {
    /// Distinct words in the request
    pub tokens: usize,
    pub cs: usize,
    pub non_cs: usize,
}

impl DomainScore {
    /// `true` when the request looks off-topic.
    ///
    /// No CS hit and at least one non-CS hit, or non-CS hits exceeding `ratio`
    /// times the CS hits. No tokens, or no hits at all, is in-domain.
    pub fn is_out_of_domain(&self, ratio: f64) -> bool {
        if self.tokens == 0 {
            return false;
        }
        if self.cs == 0 {
            return self.non_cs >= 1;
        }
        self.non_cs as f64 > self.cs as f64 * ratio
    }
}

pub struct DomainClassifier {
    word: Regex,
    cs_keywords: KeywordSet,
    non_cs_keywords: KeywordSet,
    ratio: f64,
    message: String,
}

impl DomainClassifier {
    pub fn new(
        cs_keywords: KeywordSet,
        non_cs_keywords: KeywordSet,
        ratio: f64,
        message: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            word: compile("word", r"\b\w+\b")?,
            cs_keywords,
            non_cs_keywords,
            ratio,
            message: message.into(),
        })
    }

    pub fn score(&self, normalized: &NormalizedRequest) -> DomainScore {
        let tokens: HashSet<&str> = self
            .word
            .find_iter(normalized.as_str())
            .map(|m| m.as_str())
            .collect();

        DomainScore {
            tokens: tokens.len(),
            cs: self.cs_keywords.overlap(tokens.iter().copied()),
            non_cs: self.non_cs_keywords.overlap(tokens.iter().copied()),
        }
    }

    pub fn detect(&self, normalized: &NormalizedRequest) -> Option<Verdict> {
        let score = self.score(normalized);
        if !score.is_out_of_domain(self.ratio) {
            return None;
        }
        tracing::debug!(cs = score.cs, non_cs = score.non_cs, "Non-CS domain detected");
        Some(Verdict::reject(Reason::NonCsDomain, self.message.clone()))
    }
}

impl Check for DomainClassifier {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn check(&self, request: &Request<'_>, _history: &History) -> CheckOutcome {
        match self.detect(request.normalized) {
            Some(verdict) => CheckOutcome::Block(verdict),
            None => CheckOutcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> DomainClassifier {
        DomainClassifier::new(
            ["tcp", "udp", "algorithm", "graph", "code"].into_iter().collect(),
            ["history", "rome", "war", "recipe", "cheese", "wine"].into_iter().collect(),
            2.0,
            "off topic",
        )
        .unwrap()
    }

    fn score(input: &str) -> DomainScore {
        classifier().score(&NormalizedRequest::new(input))
    }

    #[test]
    fn test_score_counts_distinct_words() {
        let s = score("TCP vs UDP: tcp, again tcp.");
        assert_eq!(s.cs, 2);
        assert_eq!(s.non_cs, 0);
        assert_eq!(s.tokens, 4);
    }

    #[test]
    fn test_no_cs_with_non_cs_is_out() {
        assert!(score("Tell me about the history of Rome.").is_out_of_domain(2.0));
    }

    #[test]
    fn test_non_cs_must_exceed_twice_cs() {
        // 1 cs, 2 non-cs: exactly 2x, stays in-domain
        assert!(!score("code for a wine and cheese shop").is_out_of_domain(2.0));
        // 1 cs, 3 non-cs
        assert!(score("code a recipe for wine and cheese").is_out_of_domain(2.0));
    }

    #[test]
    fn test_no_hits_is_in_domain() {
        let s = score("something entirely unrelated");
        assert_eq!((s.cs, s.non_cs), (0, 0));
        assert!(!s.is_out_of_domain(2.0));
    }

    #[test]
    fn test_empty_tokens_is_in_domain() {
        let s = score("?!");
        assert_eq!(s.tokens, 0);
        assert!(!s.is_out_of_domain(2.0));
    }

    #[test]
    fn test_detect_verdict() {
        let verdict = classifier()
            .detect(&NormalizedRequest::new("the war of rome"))
            .unwrap();
        assert_eq!(verdict.reason, Some(Reason::NonCsDomain));
        assert!(classifier()
            .detect(&NormalizedRequest::new("graph algorithm"))
            .is_none());
    }
}
