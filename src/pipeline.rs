//! Admission pipeline
//!
//! `Pipeline` owns the vocabularies, the ordered check chain and the rolling
//! history. One call to [`Pipeline::evaluate`] produces exactly one verdict:
//!
//! 1. empty input is refused without touching history
//! 2. repeats are refused without being recorded again
//! 3. command, simplicity and domain checks refuse and record
//! 4. anything else is recorded and forwarded, with the politeness advisory
//!    when one fired

use crate::checks::{
    Check, CheckOutcome, CommandDetector, DomainClassifier, PolitenessAnnotator, Request,
    RepetitionDetector, SimplicityDetector,
};
use crate::config::GateConfig;
use crate::error::Result;
use crate::history::History;
use crate::keywords::Keywords;
use crate::messages::Messages;
use crate::normalize::NormalizedRequest;
use crate::verdict::{Action, Reason, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Evaluation counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateStats {
    /// Requests evaluated
    pub total: u64,
    /// Forwarded unchanged
    pub passed: u64,
    /// Forwarded with an advisory
    pub informed: u64,
    /// Refusals by reason
    pub rejected: BTreeMap<Reason, u64>,
}

impl GateStats {
    fn record(&mut self, verdict: &Verdict) {
        self.total += 1;
        match verdict.action {
            Action::Pass => self.passed += 1,
            Action::InformAndPass => self.informed += 1,
            Action::Reject | Action::Inform => {
                if let Some(reason) = verdict.reason {
                    *self.rejected.entry(reason).or_insert(0) += 1;
                }
            }
        }
    }

    /// Total refusals across all reasons
    pub fn rejected_total(&self) -> u64 {
        self.rejected.values().sum()
    }
}

/// Ordered chain of admission checks over a bounded request history
pub struct Pipeline {
    checks: Vec<Box<dyn Check>>,
    history: History,
    messages: Messages,
    stats: GateStats,
}

impl Pipeline {
    /// Build the standard check chain from loaded vocabularies
    pub fn new(config: &GateConfig, keywords: Keywords) -> Result<Self> {
        config.validate()?;
        let messages = Messages::for_language(config.language);

        tracing::info!(
            history_capacity = config.history_capacity,
            similarity_threshold = config.similarity_threshold,
            politeness_phrases = keywords.politeness.len(),
            cs_keywords = keywords.cs_keywords.len(),
            non_cs_keywords = keywords.non_cs_keywords.len(),
            bash_commands = keywords.bash_commands.len(),
            "Admission pipeline initialized"
        );

        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(RepetitionDetector::new(
                config.similarity_threshold,
                messages.repeated_request,
            )),
            Box::new(CommandDetector::new(
                keywords.bash_commands,
                messages.clone(),
            )?),
            Box::new(SimplicityDetector::new(
                config.simple_max_tokens,
                config.search_url.clone(),
                messages.clone(),
            )?),
            Box::new(DomainClassifier::new(
                keywords.cs_keywords,
                keywords.non_cs_keywords,
                config.domain_ratio,
                messages.non_cs_domain,
            )?),
            Box::new(PolitenessAnnotator::new(
                keywords.politeness,
                messages.politeness,
            )),
        ];

        Ok(Self::with_checks(config.history_capacity, checks, messages))
    }

    /// Pipeline over the vocabularies shipped with the crate
    pub fn bundled(config: &GateConfig) -> Result<Self> {
        Self::new(config, Keywords::bundled()?)
    }

    /// Pipeline over keyword files, relative paths resolved against `base_dir`.
    ///
    /// Files missing from `config.resources` take their default location.
    pub fn from_dir(config: &GateConfig, base_dir: impl AsRef<Path>) -> Result<Self> {
        let resources = config.resources.clone().unwrap_or_default();
        let keywords = Keywords::load(&resources.resolve(base_dir))?;
        Self::new(config, keywords)
    }

    /// Pipeline over the resources `config` names, or the bundled
    /// vocabularies when it names none. `base_dir` anchors relative paths,
    /// usually the directory of the config file.
    pub fn from_config(config: &GateConfig, base_dir: impl AsRef<Path>) -> Result<Self> {
        match &config.resources {
            Some(resources) => {
                tracing::debug!(base_dir = %base_dir.as_ref().display(), "Loading configured keyword resources");
                Self::new(config, Keywords::load(&resources.resolve(base_dir))?)
            }
            None => Self::bundled(config),
        }
    }

    /// Pipeline over a custom check chain, evaluated in the given order
    pub fn with_checks(
        history_capacity: usize,
        checks: Vec<Box<dyn Check>>,
        messages: Messages,
    ) -> Self {
        Self {
            checks,
            history: History::new(history_capacity),
            messages,
            stats: GateStats::default(),
        }
    }

    /// Decide what to do with one raw request
    pub fn evaluate(&mut self, prompt: &str) -> Verdict {
        let verdict = self.run(prompt);
        self.stats.record(&verdict);
        tracing::debug!(
            action = ?verdict.action,
            reason = verdict.reason.map(Reason::as_str),
            history = self.history.len(),
            "Request evaluated"
        );
        verdict
    }

    fn run(&mut self, prompt: &str) -> Verdict {
        let normalized = NormalizedRequest::new(prompt);
        if normalized.is_empty() {
            return Verdict::reject(Reason::EmptyPrompt, self.messages.empty_prompt);
        }

        let request = Request {
            raw: prompt,
            normalized: &normalized,
        };

        let mut advisory: Option<Verdict> = None;
        for check in &self.checks {
            match check.check(&request, &self.history) {
                CheckOutcome::Continue => {}
                CheckOutcome::Block(verdict) => {
                    tracing::debug!(check = check.name(), "Request blocked");
                    if check.records_blocked() {
                        self.history.append(normalized.clone());
                    }
                    return verdict;
                }
                CheckOutcome::Advise(verdict) => {
                    advisory.get_or_insert(verdict);
                }
            }
        }

        self.history.append(normalized);

        match advisory.and_then(|v| v.message) {
            Some(message) => Verdict::inform_and_pass(message, prompt),
            None => Verdict::pass(prompt),
        }
    }

    /// Snapshot of the evaluation counters
    pub fn stats(&self) -> GateStats {
        self.stats.clone()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Forget remembered requests; counters are kept
    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    /// Check names in evaluation order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }
}
