//! Prompt construction for one batch.
//!
//! Pure string building: the rubric preamble, the marking rule, the reply
//! delimiter announcement with an example per-record JSON shape, then the
//! batch's transcripts joined by the same delimiter.

use crate::rubric::Rubric;

/// Build the outbound prompt for a batch of transcripts.
pub fn build_scoring_prompt(dialogues: &[String], rubric: &Rubric, delimiter: &str) -> String {
    let items = rubric.items().join("\n");
    let first_example = example_object(rubric, &["1", "", "1"]);
    let second_example = example_object(rubric, &["", "1", ""]);

    let preamble = format!(
        "你是一位管理與溝通分析專家，請根據以下評分項目評估主管與員工 1:1 對話中的每一句話，\n\
         {items}\n\n\
         請依據評估結果，對每個項目：若主管的發言觸及該項則標記為 1，否則留空。\
         請對每筆逐字稿產生 JSON 格式回覆，並在各筆結果間用下列分隔線隔開：\n\
         {delimiter}\n\
         僅回傳 JSON 格式結果，不要包含額外的文字或 Markdown 標記，例如：\n\
         {first_example}\n\
         {delimiter}\n\
         {second_example}\n"
    );

    let joined = dialogues.join(&format!("\n{delimiter}\n"));
    format!("{preamble}\n\n{joined}")
}

/// Render an example per-record JSON object from the first rubric items, with
/// a trailing ellipsis line standing in for the rest.
fn example_object(rubric: &Rubric, marks: &[&str]) -> String {
    let mut lines = vec!["{".to_string()];
    for (item, mark) in rubric.items().iter().zip(marks) {
        lines.push(format!("  \"{item}\": \"{mark}\","));
    }
    if rubric.len() > marks.len() {
        lines.push("  ...".to_string());
    } else if lines.len() > 1 {
        // No trailing comma when the example covers the whole rubric.
        if let Some(last) = lines.last_mut() {
            last.pop();
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_every_rubric_item() {
        let rubric = Rubric::default();
        let prompt = build_scoring_prompt(&["對話內容".to_string()], &rubric, "-----");
        for item in rubric.items() {
            assert!(prompt.contains(item.as_str()), "missing item {item}");
        }
    }

    #[test]
    fn prompt_announces_delimiter_and_marking_rule() {
        let rubric = Rubric::default();
        let prompt = build_scoring_prompt(&["text".to_string()], &rubric, "=====");
        assert!(prompt.contains("====="));
        assert!(prompt.contains("標記為 1"));
    }

    #[test]
    fn transcripts_joined_by_delimiter() {
        let rubric = Rubric::default();
        let dialogues = vec!["第一筆".to_string(), "第二筆".to_string()];
        let prompt = build_scoring_prompt(&dialogues, &rubric, "-----");
        assert!(prompt.contains("第一筆\n-----\n第二筆"));
    }

    #[test]
    fn example_shows_json_shape() {
        let rubric = Rubric::default();
        let prompt = build_scoring_prompt(&["t".to_string()], &rubric, "-----");
        assert!(prompt.contains("\"明確目標設定\": \"1\""));
        assert!(prompt.contains("  ..."));
    }

    #[test]
    fn small_rubric_example_has_no_ellipsis() {
        let rubric = Rubric::new(vec!["a".into(), "b".into()]);
        let example = example_object(&rubric, &["1", "", "1"]);
        assert!(!example.contains("..."));
        assert!(example.ends_with("\"b\": \"\"\n}"));
    }
}
