//! Pipeline configuration.
//!
//! Everything the runner needs is carried explicitly in [`ScoringConfig`];
//! nothing is read from ambient state at scoring time. Validation failures
//! are fatal and surface before any batch is sent.

use std::time::Duration;

use crate::pipeline::ScoringError;

pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Delimiter separating per-record replies. A dash run is unlikely to occur
/// in transcript text.
pub const DEFAULT_DELIMITER: &str = "-----";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Cooperative throttle between batches, to stay under external rate limits.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Records per outbound request.
    pub batch_size: usize,
    /// Literal marker between per-record replies.
    pub delimiter: String,
    /// Sleep inserted between consecutive batches.
    pub pacing: Duration,
    /// Model handle passed to the generation service.
    pub model: String,
    /// HTTP timeout for one generation call.
    pub timeout_secs: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            delimiter: DEFAULT_DELIMITER.to_string(),
            pacing: DEFAULT_PACING,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.batch_size == 0 {
            return Err(ScoringError::InvalidConfig(
                "batch size must be at least 1".into(),
            ));
        }
        if self.delimiter.trim().is_empty() {
            return Err(ScoringError::InvalidConfig(
                "delimiter must not be empty".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ScoringError::InvalidConfig(
                "model name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
