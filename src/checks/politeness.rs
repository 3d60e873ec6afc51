//! Politeness advisory
//!
//! Greetings and pleasantries cost generation tokens without changing the
//! answer. Never blocks; the user only gets a hint alongside the response.

use super::{Check, CheckOutcome, Request};
use crate::history::History;
use crate::keywords::PhraseList;
use crate::normalize::NormalizedRequest;
use crate::verdict::{Reason, Verdict};

pub struct PolitenessAnnotator {
    phrases: PhraseList,
    message: String,
}

impl PolitenessAnnotator {
    pub fn new(phrases: PhraseList, message: impl Into<String>) -> Self {
        Self {
            phrases,
            message: message.into(),
        }
    }

    pub fn detect(&self, normalized: &NormalizedRequest) -> Option<Verdict> {
        let phrase = self.phrases.find_in(normalized.as_str())?;
        tracing::debug!(phrase, "Politeness phrase detected");
        Some(Verdict::inform(Reason::Politeness, self.message.clone()))
    }
}

impl Check for PolitenessAnnotator {
    fn name(&self) -> &'static str {
        "politeness"
    }

    fn check(&self, request: &Request<'_>, _history: &History) -> CheckOutcome {
        match self.detect(request.normalized) {
            Some(verdict) => CheckOutcome::Advise(verdict),
            None => CheckOutcome::Continue,
        }
    }
}
