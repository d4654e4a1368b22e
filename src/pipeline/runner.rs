//! Orchestration: batches are scored strictly sequentially, one in-flight
//! request at a time, with a pacing sleep between batches to respect external
//! rate limits. A failed generation call degrades that whole batch to blanks
//! and the run continues; nothing above batch scope aborts the run.

use std::time::Instant;

use super::batch::batches;
use super::parser::{parse_fragment, split_reply};
use super::prompt::build_scoring_prompt;
use super::reconcile::reconcile;
use super::types::{BatchOutcome, LlmClient, RunSummary};
use super::ScoringError;
use crate::config::ScoringConfig;
use crate::events::{EventSink, ScoringEvent};
use crate::rubric::{Rubric, ScoreResult};

pub struct ScoringRunner {
    config: ScoringConfig,
    rubric: Rubric,
}

impl ScoringRunner {
    /// Configuration problems are fatal here, before any batch is sent.
    pub fn new(config: ScoringConfig, rubric: Rubric) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config, rubric })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Score one batch: build the prompt, call the service, split and parse
    /// the reply, reconcile counts. A service-level failure yields one blank
    /// result per record and `BatchOutcome::Degraded`.
    pub fn score_batch(
        &self,
        dialogues: &[String],
        llm: &dyn LlmClient,
        events: &dyn EventSink,
    ) -> (Vec<ScoreResult>, BatchOutcome) {
        let prompt = build_scoring_prompt(dialogues, &self.rubric, &self.config.delimiter);

        match llm.generate(&self.config.model, &prompt) {
            Ok(reply) => {
                let fragments = split_reply(&reply, &self.config.delimiter);
                let parsed: Vec<ScoreResult> = fragments
                    .iter()
                    .map(|fragment| parse_fragment(fragment, &self.rubric, events))
                    .collect();
                let results = reconcile(parsed, dialogues.len(), &self.rubric);
                (results, BatchOutcome::Scored)
            }
            Err(e) => {
                events.emit(&ScoringEvent::Error {
                    message: format!("generation call failed, batch degraded to blanks: {e}"),
                });
                let results = (0..dialogues.len())
                    .map(|_| self.rubric.blank_result())
                    .collect();
                (results, BatchOutcome::Degraded)
            }
        }
    }

    /// Score every record. `on_batch` receives each batch's starting record
    /// index and reconciled results as soon as they exist, so the caller can
    /// write output incrementally; an error from it is the only thing that
    /// stops the run early.
    pub fn score_all<F>(
        &self,
        dialogues: &[String],
        llm: &dyn LlmClient,
        events: &dyn EventSink,
        mut on_batch: F,
    ) -> Result<RunSummary, ScoringError>
    where
        F: FnMut(usize, &[ScoreResult]) -> Result<(), ScoringError>,
    {
        let start = Instant::now();
        let total = dialogues.len();
        let groups = batches(dialogues, self.config.batch_size);
        let batch_count = groups.len();
        let mut summary = RunSummary::default();

        for (i, group) in groups.into_iter().enumerate() {
            let (results, outcome) = self.score_batch(group, llm, events);
            on_batch(i * self.config.batch_size, &results)?;

            summary.rows_processed += group.len();
            summary.batches_completed += 1;
            if outcome == BatchOutcome::Degraded {
                summary.batches_degraded += 1;
            }
            events.emit(&ScoringEvent::Progress {
                processed: summary.rows_processed,
                total,
            });

            if i + 1 < batch_count && !self.config.pacing.is_zero() {
                std::thread::sleep(self.config.pacing);
            }
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        Ok(summary)
    }
}
