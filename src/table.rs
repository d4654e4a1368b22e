//! CSV input and incremental scored output.
//!
//! Input: header row plus one transcript per row; the transcript column is
//! auto-selected from a fixed preference list. Output: all original columns
//! plus one column per rubric item, BOM-prefixed UTF-8, header written once
//! and rows appended batch by batch.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::events::{EventSink, ScoringEvent};
use crate::pipeline::ScoringError;
use crate::rubric::{Rubric, ScoreResult};

/// Column names checked, in order, when picking the transcript column.
pub const PREFERRED_COLUMNS: &[&str] = &["text", "utterance", "content", "dialogue", "Dialogue"];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One parsed input table, read fully at process start.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl InputTable {
    pub fn read(path: &Path) -> Result<Self, ScoringError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    /// Index of the transcript column: the first preference-list hit, else
    /// column 0 (reported as an update event).
    pub fn select_dialogue_column(&self, events: &dyn EventSink) -> usize {
        for name in PREFERRED_COLUMNS {
            if let Some(idx) = self.headers.iter().position(|h| h == name) {
                return idx;
            }
        }
        events.emit(&ScoringEvent::Update {
            message: format!(
                "no transcript column among {:?}, using first column {:?}",
                PREFERRED_COLUMNS,
                self.headers.first().map(String::as_str).unwrap_or("")
            ),
        });
        0
    }

    /// Trimmed transcript texts from the given column, one per row. Rows too
    /// short for the column yield an empty transcript.
    pub fn dialogues(&self, column: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.get(column)
                    .map(|cell| cell.trim().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Incremental writer for the scored table. The UTF-8 BOM and the header
/// (original columns + rubric items) go out on creation; each
/// [`ScoredWriter::append_batch`] writes and flushes that batch's rows, so a
/// partial run still leaves a readable file.
pub struct ScoredWriter {
    writer: csv::Writer<File>,
    headers: Vec<String>,
    rubric: Rubric,
}

impl ScoredWriter {
    pub fn create(path: &Path, headers: &[String], rubric: &Rubric) -> Result<Self, ScoringError> {
        let mut file = File::create(path)?;
        file.write_all(UTF8_BOM)?;
        let mut writer = csv::WriterBuilder::new().from_writer(file);

        let mut header: Vec<&str> = headers.iter().map(String::as_str).collect();
        header.extend(rubric.items().iter().map(String::as_str));
        writer.write_record(&header)?;
        writer.flush()?;

        Ok(Self {
            writer,
            headers: headers.to_vec(),
            rubric: rubric.clone(),
        })
    }

    /// Append one batch of rows with their reconciled results. Rows and
    /// results are positional pairs; the runner guarantees count parity.
    pub fn append_batch(
        &mut self,
        rows: &[Vec<String>],
        results: &[ScoreResult],
    ) -> Result<(), ScoringError> {
        for (row, result) in rows.iter().zip(results) {
            let mut record: Vec<&str> = Vec::with_capacity(self.headers.len() + self.rubric.len());
            for i in 0..self.headers.len() {
                record.push(row.get(i).map(String::as_str).unwrap_or(""));
            }
            for item in self.rubric.items() {
                record.push(result.get(item));
            }
            self.writer.write_record(&record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
