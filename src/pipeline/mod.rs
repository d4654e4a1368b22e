pub mod batch;
pub mod gemini;
pub mod parser;
pub mod prompt;
pub mod reconcile;
pub mod runner;
pub mod types;

pub use batch::*;
pub use gemini::*;
pub use parser::*;
pub use prompt::*;
pub use reconcile::*;
pub use runner::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("generation service is unreachable at {0}")]
    ServiceConnection(String),

    #[error("generation service returned error (status {status}): {body}")]
    ServiceError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("malformed service reply: {0}")]
    MalformedReply(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
