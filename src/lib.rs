//! coachscore — batch scoring of 1:1 dialogue transcripts against a coaching
//! rubric via a hosted text-generation API.
//!
//! The pipeline reads transcripts from a CSV table, partitions them into
//! fixed-size batches, sends each batch as one prompt, parses the
//! delimiter-separated JSON fragments in the reply, and reconciles counts so
//! every input row gets exactly one result — degrading to blanks on parse or
//! service failures instead of aborting.

pub mod config;
pub mod events;
pub mod pipeline;
pub mod rubric;
pub mod suggestions;
pub mod table;
