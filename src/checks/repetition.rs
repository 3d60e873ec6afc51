//! Near-duplicate request detection
//!
//! Users who do not get the answer they wanted tend to resend the same
//! request with small edits. Each candidate is scored against the rolling
//! history and refused once it is close enough to something already asked.

use super::{Check, CheckOutcome, Request};
use crate::config::DEFAULT_SIMILARITY_THRESHOLD;
use crate::history::History;
use crate::normalize::NormalizedRequest;
use crate::similarity::ratio;
use crate::verdict::{Reason, Verdict};

pub struct RepetitionDetector {
    threshold: u8,
    message: String,
}

impl RepetitionDetector {
    pub fn new(threshold: u8, message: impl Into<String>) -> Self {
        Self {
            threshold,
            message: message.into(),
        }
    }

    /// Scan history oldest to newest; the first entry at or above the
    /// threshold wins.
    pub fn detect(&self, normalized: &NormalizedRequest, history: &History) -> Option<Verdict> {
        for previous in history.entries() {
            let score = ratio(normalized.as_str(), previous.as_str());
            if score >= self.threshold {
                tracing::debug!(score, threshold = self.threshold, "Repeated request detected");
                return Some(Verdict::reject(
                    Reason::RepeatedRequest,
                    self.message.clone(),
                ));
            }
        }
        None
    }
}

impl Default for RepetitionDetector {
    fn default() -> Self {
        Self::new(
            DEFAULT_SIMILARITY_THRESHOLD,
            crate::messages::Messages::default().repeated_request,
        )
    }
}

impl Check for RepetitionDetector {
    fn name(&self) -> &'static str {
        "repetition"
    }

    fn check(&self, request: &Request<'_>, history: &History) -> CheckOutcome {
        match self.detect(request.normalized, history) {
            Some(verdict) => CheckOutcome::Block(verdict),
            None => CheckOutcome::Continue,
        }
    }

    fn records_blocked(&self) -> bool {
        false
    }
}
