//! Post-run coaching suggestions.
//!
//! After scoring, rubric items marked in fewer than 30 % of rows are treated
//! as weak spots. The LLM is asked for concrete advice on those items; if the
//! call fails or comes back empty, canned per-item templates are used
//! instead.

use crate::config::ScoringConfig;
use crate::events::{EventSink, ScoringEvent};
use crate::pipeline::types::LlmClient;
use crate::rubric::{Rubric, ScoreResult};

/// An item is "low-score" when marked in fewer than this share of rows.
pub const LOW_SCORE_RATIO: f64 = 0.3;

const ALL_GOOD_MESSAGE: &str = "對話表現良好，繼續保持！";

const GENERIC_SUGGESTION: &str = "請多關注此項目，與員工進行更深入的討論。";

/// Fallback advice per rubric item, used when the generation call fails.
const SUGGESTION_TEMPLATES: &[(&str, &str)] = &[
    (
        "明確目標設定",
        "多與員工共同設定具體且可衡量的目標，例如『本週完成報告的初稿』。",
    ),
    (
        "提供具體反饋",
        "在反饋時提供具體的例子，例如『你在簡報中提到的數據很有說服力，但可以再補充一些圖表』。",
    ),
    (
        "積極傾聽",
        "多重述員工的意見以確認理解，例如『你的意思是想調整專案進度，對嗎？』。",
    ),
    ("鼓勵參與", "鼓勵員工提出想法，例如『你對這個專案有什麼建議？』。"),
    ("解決問題", "針對員工提出的問題，提供具體的解決方案或行動計劃。"),
    (
        "情感支持",
        "多表達對員工努力的認可，例如『我知道你這週很忙，感謝你的努力』。",
    ),
    (
        "確認理解",
        "在對話結束時確認雙方的共識，例如『我們同意下週一提交報告，對吧？』。",
    ),
    (
        "連結工作意義",
        "將員工的工作與更大的目標連結，例如『你的報告將幫助我們爭取更多資源』。",
    ),
    (
        "開放式提問",
        "多使用開放式問題促進討論，例如『你覺得目前的進度如何？』。",
    ),
];

/// Scored items (the note column excluded) marked in fewer than
/// [`LOW_SCORE_RATIO`] of rows, in rubric order.
pub fn low_score_items(results: &[ScoreResult], rubric: &Rubric) -> Vec<String> {
    let threshold = results.len() as f64 * LOW_SCORE_RATIO;
    rubric
        .scored_items()
        .iter()
        .filter(|item| {
            let marked = results.iter().filter(|r| r.is_marked(item.as_str())).count();
            (marked as f64) < threshold
        })
        .cloned()
        .collect()
}

/// Build the advice prompt listing the low-score items.
pub fn build_suggestions_prompt(low_items: &[String]) -> String {
    let listed: Vec<String> = low_items.iter().map(|item| format!("- {item}")).collect();
    format!(
        "你是一位管理與溝通專家，請根據以下主管與員工 1:1 對話的評分結果，提供改進建議。\n\
         以下項目得分較低（表示主管在對話中未充分觸及該項）:\n\
         {}\n\n\
         請針對每個低得分項目，提供具體且可行的建議，幫助主管改進。格式如下：\n\
         建議加強「項目名稱」，例如具體建議。\n\
         例如：\n\
         建議加強「情感支持」，例如多表達對員工努力的認可，例如『我知道你這週很忙，感謝你的努力』。\n",
        listed.join("\n")
    )
}

/// Generate suggestions for a finished run. Returns the all-good message when
/// nothing scored low; otherwise asks the LLM and falls back to the canned
/// templates on failure or an empty reply.
pub fn generate_suggestions(
    results: &[ScoreResult],
    rubric: &Rubric,
    config: &ScoringConfig,
    llm: &dyn LlmClient,
    events: &dyn EventSink,
) -> String {
    let low = low_score_items(results, rubric);
    if low.is_empty() {
        return ALL_GOOD_MESSAGE.to_string();
    }

    let prompt = build_suggestions_prompt(&low);
    match llm.generate(&config.model, &prompt) {
        Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
        Ok(_) => fallback_suggestions(&low, events, "service returned an empty reply"),
        Err(e) => fallback_suggestions(&low, events, &e.to_string()),
    }
}

fn fallback_suggestions(low_items: &[String], events: &dyn EventSink, reason: &str) -> String {
    events.emit(&ScoringEvent::Update {
        message: format!("suggestion generation failed ({reason}), using canned templates"),
    });
    low_items
        .iter()
        .map(|item| {
            let template = SUGGESTION_TEMPLATES
                .iter()
                .find(|(name, _)| *name == item.as_str())
                .map(|(_, text)| *text)
                .unwrap_or(GENERIC_SUGGESTION);
            format!("建議加強「{item}」，{template}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
