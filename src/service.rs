//! Shareable gate handle
//!
//! Request handlers run concurrently, but history scan and append must
//! happen as one step or two near-identical requests could both slip
//! through. `GateService` serializes evaluations behind a single lock.

use crate::history::History;
use crate::pipeline::{GateStats, Pipeline};
use crate::verdict::Verdict;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle to one pipeline instance
#[derive(Clone)]
pub struct GateService {
    pipeline: Arc<Mutex<Pipeline>>,
}

impl GateService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(Mutex::new(pipeline)),
        }
    }

    /// Evaluate one request; concurrent callers are served one at a time
    pub async fn evaluate(&self, prompt: &str) -> Verdict {
        let mut pipeline = self.pipeline.lock().await;
        pipeline.evaluate(prompt)
    }

    pub async fn stats(&self) -> GateStats {
        self.pipeline.lock().await.stats()
    }

    pub async fn history_len(&self) -> usize {
        self.pipeline.lock().await.history().len()
    }

    /// Copy of the current history, oldest first
    pub async fn history_snapshot(&self) -> History {
        self.pipeline.lock().await.history().clone()
    }

    pub async fn reset_history(&self) {
        self.pipeline.lock().await.reset_history();
        tracing::info!("Gate history reset");
    }
}
