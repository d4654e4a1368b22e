//! Scoring rubric: the ordered set of named dimensions a transcript is
//! evaluated against, and the per-record result mapping.
//!
//! The rubric is read-only configuration shared by the prompt builder and the
//! reply parser. Results are positional: the Nth `ScoreResult` belongs to the
//! Nth input record, never matched by content.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default rubric for supervisor/employee 1:1 dialogues. The final item is a
/// free-text note column rather than a 1/blank mark.
pub const DEFAULT_ITEMS: &[&str] = &[
    "明確目標設定",
    "提供具體反饋",
    "積極傾聽",
    "鼓勵參與",
    "解決問題",
    "情感支持",
    "確認理解",
    "連結工作意義",
    "開放式提問",
    "備註",
];

/// Ordered list of scoring dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    items: Vec<String>,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            items: DEFAULT_ITEMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Rubric {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// All items, in output-column order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Items that carry a 1/blank mark — everything except the trailing
    /// note column.
    pub fn scored_items(&self) -> &[String] {
        match self.items.len() {
            0 => &self.items,
            n => &self.items[..n - 1],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    /// A result with every item present and blank — the degraded shape used
    /// for parse and service failures.
    pub fn blank_result(&self) -> ScoreResult {
        let mut result = ScoreResult::default();
        result.fill_missing(self);
        result
    }
}

/// Scores for one record: rubric item name → `"1"`, `""`, or free text for
/// the note item. After [`ScoreResult::fill_missing`] every rubric item is
/// present as a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    values: HashMap<String, String>,
}

impl ScoreResult {
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Value for an item; `""` if absent.
    pub fn get(&self, item: &str) -> &str {
        self.values.get(item).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, item: &str, value: &str) {
        self.values.insert(item.to_string(), value.to_string());
    }

    /// Insert `""` for every rubric item not already present.
    pub fn fill_missing(&mut self, rubric: &Rubric) {
        for item in rubric.items() {
            self.values.entry(item.clone()).or_default();
        }
    }

    /// Whether the item carries the `"1"` mark.
    pub fn is_marked(&self, item: &str) -> bool {
        self.get(item) == "1"
    }

    /// Whether every rubric item is blank (the degraded shape).
    pub fn is_blank(&self, rubric: &Rubric) -> bool {
        rubric.items().iter().all(|item| self.get(item).is_empty())
    }
}
