//! Reply splitting and lenient JSON extraction.
//!
//! The generation service promises one JSON object per record, separated by
//! the configured delimiter, but in practice replies arrive wrapped in
//! markdown fences and padded with prose. Parsing runs in two explicit
//! stages — fence stripping, then brace-span extraction — followed by a
//! strict `serde_json` decode. A fragment that fails any stage degrades to an
//! all-blank result for that one record; siblings in the batch are unaffected.

use std::collections::HashMap;

use serde_json::Value;

use super::ScoringError;
use crate::events::{EventSink, ScoringEvent};
use crate::rubric::{Rubric, ScoreResult};

/// Split a raw reply on the literal delimiter, dropping whitespace-only
/// fragments.
pub fn split_reply<'a>(reply: &'a str, delimiter: &str) -> Vec<&'a str> {
    reply
        .split(delimiter)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Stage 1: remove enclosing markdown code-fence markers, if present.
/// Handles a leading ```` ```json ```` or bare ```` ``` ```` and a trailing
/// ```` ``` ````.
pub fn strip_code_fences(fragment: &str) -> &str {
    let mut cleaned = fragment.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest.trim_start();
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.trim_start();
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim_end();
    }
    cleaned
}

/// Stage 2: locate the JSON object span inside possibly-prose-padded text.
/// Keeps lines from the first line beginning with `{` through the first
/// retained line ending in `}`; everything outside is discarded.
pub fn extract_json_span(text: &str) -> Option<String> {
    let mut kept = Vec::new();
    let mut in_json = false;
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('{') {
            in_json = true;
        }
        if in_json {
            kept.push(line);
            if line.ends_with('}') {
                break;
            }
        }
    }
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("\n"))
    }
}

/// Strict decode of the retained span into item → value strings. Non-string
/// JSON values are coerced to their string rendering.
fn decode_scores(json: &str) -> Result<HashMap<String, String>, ScoringError> {
    let decoded: HashMap<String, Value> =
        serde_json::from_str(json).map_err(|e| ScoringError::JsonParsing(e.to_string()))?;
    Ok(decoded
        .into_iter()
        .map(|(key, value)| (key, coerce_value(value)))
        .collect())
}

fn coerce_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse one fragment into a complete result, or fail with the stage that
/// rejected it.
pub fn try_parse_fragment(fragment: &str, rubric: &Rubric) -> Result<ScoreResult, ScoringError> {
    let cleaned = strip_code_fences(fragment);
    let span = extract_json_span(cleaned).ok_or_else(|| {
        ScoringError::MalformedReply("no JSON object found in fragment".into())
    })?;
    let mut result = ScoreResult::from_map(decode_scores(&span)?);
    result.fill_missing(rubric);
    Ok(result)
}

/// Parse one fragment, degrading to an all-blank result on failure. The
/// failure is reported to the event sink with the raw fragment attached and
/// never aborts the batch.
pub fn parse_fragment(fragment: &str, rubric: &Rubric, events: &dyn EventSink) -> ScoreResult {
    match try_parse_fragment(fragment, rubric) {
        Ok(result) => result,
        Err(e) => {
            events.emit(&ScoringEvent::Error {
                message: format!("failed to parse reply fragment: {e}\nraw fragment: {fragment}"),
            });
            rubric.blank_result()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MemorySink, NullSink};

    fn rubric() -> Rubric {
        Rubric::default()
    }

    #[test]
    fn split_drops_empty_fragments() {
        let fragments = split_reply("a----- -----b-----", "-----");
        assert_eq!(fragments, vec!["a", "b"]);
    }

    #[test]
    fn split_without_delimiter_is_one_fragment() {
        let fragments = split_reply("just one reply", "-----");
        assert_eq!(fragments.len(), 1);
    }

    #[test]
    fn strips_json_fence() {
        assert_eq!(
            strip_code_fences("```json\n{\"a\": \"1\"}\n```"),
            "{\"a\": \"1\"}"
        );
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fences("```\n{\"a\": \"1\"}\n```"), "{\"a\": \"1\"}");
    }

    #[test]
    fn unfenced_text_unchanged() {
        assert_eq!(strip_code_fences("{\"a\": \"1\"}"), "{\"a\": \"1\"}");
    }

    #[test]
    fn fenced_and_unfenced_parse_identically() {
        let plain = "{\"積極傾聽\": \"1\"}";
        let json_fenced = format!("```json\n{plain}\n```");
        let bare_fenced = format!("```\n{plain}\n```");
        let expected = try_parse_fragment(plain, &rubric()).unwrap();
        assert_eq!(try_parse_fragment(&json_fenced, &rubric()).unwrap(), expected);
        assert_eq!(try_parse_fragment(&bare_fenced, &rubric()).unwrap(), expected);
    }

    #[test]
    fn span_extraction_discards_surrounding_prose() {
        let text = "Here is the result:\n{\n\"a\": \"1\"\n}\nHope this helps!";
        assert_eq!(extract_json_span(text).unwrap(), "{\n\"a\": \"1\"\n}");
    }

    #[test]
    fn span_extraction_none_without_brace() {
        assert!(extract_json_span("no json here at all").is_none());
    }

    #[test]
    fn well_formed_object_round_trips() {
        let rubric = rubric();
        let json: Vec<String> = rubric
            .items()
            .iter()
            .map(|item| format!("\"{item}\": \"1\""))
            .collect();
        let fragment = format!("{{{}}}", json.join(", "));
        let result = try_parse_fragment(&fragment, &rubric).unwrap();
        for item in rubric.items() {
            assert_eq!(result.get(item), "1");
        }
    }

    #[test]
    fn missing_keys_completed_with_blank() {
        let result = try_parse_fragment("{\"明確目標設定\": \"1\"}", &rubric()).unwrap();
        assert_eq!(result.get("明確目標設定"), "1");
        assert_eq!(result.get("解決問題"), "");
        assert_eq!(result.get("備註"), "");
    }

    #[test]
    fn non_string_values_coerced() {
        let result = try_parse_fragment("{\"明確目標設定\": 1, \"備註\": null}", &rubric()).unwrap();
        assert_eq!(result.get("明確目標設定"), "1");
        assert_eq!(result.get("備註"), "");
    }

    #[test]
    fn prose_fragment_degrades_to_blank_without_raising() {
        let rubric = rubric();
        let sink = MemorySink::new();
        let result = parse_fragment("抱歉，我無法評分這段對話。", &rubric, &sink);
        assert!(result.is_blank(&rubric));
        let errors = sink.messages_on("error");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("抱歉"), "diagnostic carries the raw fragment");
    }

    #[test]
    fn malformed_json_degrades_to_blank() {
        let rubric = rubric();
        let result = parse_fragment("{not valid json}", &rubric, &NullSink);
        assert!(result.is_blank(&rubric));
    }

    #[test]
    fn successful_parse_emits_nothing() {
        let sink = MemorySink::new();
        parse_fragment("{\"積極傾聽\": \"1\"}", &rubric(), &sink);
        assert!(sink.events().is_empty());
    }
}
