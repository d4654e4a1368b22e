use serde::Serialize;

use super::ScoringError;

/// Text-generation client capability. Injected into the runner so tests can
/// substitute a mock; production uses [`super::GeminiClient`].
pub trait LlmClient {
    /// Send one prompt, return the raw reply text.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ScoringError>;
}

/// How a batch ended up: scored from a real reply, or degraded to all-blank
/// results because the generation call itself failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    Scored,
    Degraded,
}

/// Summary of a full scoring run, for CLI reporting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub rows_processed: usize,
    pub batches_completed: usize,
    /// Batches whose generation call failed and were filled with blanks.
    pub batches_degraded: usize,
    pub duration_ms: u64,
}
