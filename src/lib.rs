//! # a3s-gate
//!
//! Request admission for A3S assistants: decide, before an expensive
//! generation call, whether a prompt should be refused, forwarded with an
//! advisory, or forwarded unchanged.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_gate::{Action, GateConfig, Pipeline, Reason};
//!
//! # fn example() -> a3s_gate::Result<()> {
//! let mut gate = Pipeline::bundled(&GateConfig::default())?;
//!
//! let verdict = gate.evaluate("man grep");
//! assert_eq!(verdict.action, Action::Reject);
//! assert_eq!(verdict.reason, Some(Reason::BashCommand));
//!
//! let verdict = gate.evaluate("Why does my TCP server leak sockets under load?");
//! assert_eq!(verdict.action, Action::Pass);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Checks
//!
//! Evaluated in this order; the first refusal wins:
//!
//! - **repetition**: near-duplicate of one of the last 10 requests
//! - **command**: question about a single shell utility
//! - **simplicity**: short definitional question
//! - **domain**: off-topic for a computer science assistant
//! - **politeness**: advisory only, never refuses
//!
//! ## Architecture
//!
//! - **Check** trait: one heuristic, pure over request + history
//! - **Pipeline**: ordered check chain, history owner, counters
//! - **GateService**: cloneable async handle for concurrent callers
//! - **Verdict**: the single record handed to the serving layer

pub mod checks;
pub mod config;
pub mod error;
pub mod history;
pub mod keywords;
pub mod messages;
pub mod normalize;
pub mod pipeline;
pub mod service;
pub mod similarity;
pub mod verdict;

// Re-export core types
pub use checks::{Check, CheckOutcome, Request};
pub use config::{GateConfig, ResourceConfig};
pub use error::{GateError, ResourceError, ResourceFailure, ResourceKind, Result};
pub use history::History;
pub use keywords::{KeywordSet, Keywords, PhraseList};
pub use messages::{Language, Messages};
pub use normalize::{normalize, NormalizedRequest};
pub use pipeline::{GateStats, Pipeline};
pub use service::GateService;
pub use verdict::{Action, Reason, Verdict};
